use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{AddressSource, LookupRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Address, ProviderId};

const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";

/// BrasilAPI adapter: `GET {base}/api/cep/v1/{cep}`.
#[derive(Clone)]
pub struct BrasilApiAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl BrasilApiAdapter {
    pub fn new() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, req: LookupRequest) -> Result<Address, SourceError> {
        let endpoint = format!(
            "{}/api/cep/v1/{}",
            self.base_url.trim_end_matches('/'),
            req.postal_code.as_str()
        );

        let request = HttpRequest::get(endpoint).with_timeout_ms(req.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                SourceError::timeout(format!("brasilapi deadline exceeded: {}", e.message()))
            } else {
                SourceError::transport(format!("brasilapi transport error: {}", e.message()))
            }
        })?;

        if !response.is_success() {
            return Err(SourceError::status(ProviderId::Brasilapi, response.status));
        }

        let payload: BrasilApiPayload = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::decode(format!("brasilapi response: {e}")))?;

        Ok(normalize(payload))
    }
}

impl Default for BrasilApiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSource for BrasilApiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Brasilapi
    }

    fn lookup<'a>(
        &'a self,
        req: LookupRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Address, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch(req))
    }
}

/// BrasilAPI `cep/v1` response schema; fields not consumed by the canonical
/// record (`service`) are ignored and optional fields default to empty.
#[derive(Debug, Deserialize)]
struct BrasilApiPayload {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    street: String,
}

fn normalize(payload: BrasilApiPayload) -> Address {
    Address::new(
        payload.cep,
        payload.street,
        payload.neighborhood,
        payload.city,
        payload.state,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "cep": "01153000",
        "state": "SP",
        "city": "São Paulo",
        "neighborhood": "Barra Funda",
        "street": "Rua Vitorino Carmilo",
        "service": "widenet"
    }"#;

    #[test]
    fn normalizes_well_formed_payload() {
        let payload: BrasilApiPayload = serde_json::from_str(WELL_FORMED).expect("must parse");
        let address = normalize(payload);

        assert_eq!(address.postal_code, "01153000");
        assert_eq!(address.street, "Rua Vitorino Carmilo");
        assert_eq!(address.neighborhood, "Barra Funda");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
    }

    #[test]
    fn missing_optional_fields_become_empty_strings() {
        let payload: BrasilApiPayload =
            serde_json::from_str(r#"{"cep": "01153000", "state": "SP"}"#).expect("must parse");
        let address = normalize(payload);

        assert_eq!(address.street, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.city, "");
    }
}

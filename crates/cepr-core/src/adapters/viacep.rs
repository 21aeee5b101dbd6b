use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{AddressSource, LookupRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Address, PostalCode, ProviderId};

const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// ViaCEP adapter: `GET {base}/ws/{cep}/json`.
#[derive(Clone)]
pub struct ViaCepAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl ViaCepAdapter {
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
            "{}/ws/{}/json",
            self.base_url.trim_end_matches('/'),
            req.postal_code.as_str()
        );

        let request = HttpRequest::get(endpoint).with_timeout_ms(req.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                SourceError::timeout(format!("viacep deadline exceeded: {}", e.message()))
            } else {
                SourceError::transport(format!("viacep transport error: {}", e.message()))
            }
        })?;

        if !response.is_success() {
            return Err(SourceError::status(ProviderId::Viacep, response.status));
        }

        let payload: ViaCepPayload = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::decode(format!("viacep response: {e}")))?;

        // ViaCEP reports an unknown CEP as status 200 with {"erro": true}.
        if payload.erro {
            return Err(SourceError::not_found(ProviderId::Viacep, &req.postal_code));
        }

        Ok(normalize(payload, &req.postal_code))
    }
}

impl Default for ViaCepAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSource for ViaCepAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Viacep
    }

    fn lookup<'a>(
        &'a self,
        req: LookupRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Address, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch(req))
    }
}

/// ViaCEP `ws` response schema. `complemento`, `unidade`, `estado`, `regiao`,
/// `ibge`, `gia`, `ddd` and `siafi` are part of the schema but not consumed
/// by the canonical record.
#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: bool,
}

fn normalize(payload: ViaCepPayload, requested: &PostalCode) -> Address {
    // ViaCEP formats the cep field with a hyphen; store the unformatted form
    // so both providers agree on the canonical postal_code.
    let postal_code = if payload.cep.is_empty() {
        requested.as_str().to_owned()
    } else {
        payload.cep.replace('-', "")
    };

    Address::new(
        postal_code,
        payload.logradouro,
        payload.bairro,
        payload.localidade,
        payload.uf,
    )
}

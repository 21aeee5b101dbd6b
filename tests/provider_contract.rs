use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use cepr_core::{
    AddressSource, BrasilApiAdapter, HttpClient, HttpError, HttpRequest, HttpResponse,
    LookupRequest, PostalCode, ProviderId, SourceErrorKind, ViaCepAdapter,
};

const BRASILAPI_BODY: &str = r#"{
    "cep": "01153000",
    "state": "SP",
    "city": "São Paulo",
    "neighborhood": "Barra Funda",
    "street": "Rua Vitorino Carmilo",
    "service": "widenet"
}"#;

const VIACEP_BODY: &str = r#"{
    "cep": "01153-000",
    "logradouro": "Rua Vitorino Carmilo",
    "complemento": "",
    "bairro": "Barra Funda",
    "localidade": "São Paulo",
    "uf": "SP",
    "ibge": "3550308",
    "ddd": "11"
}"#;

/// Transport double returning a fixed response or error.
struct ScriptedHttpClient {
    result: Result<HttpResponse, HttpError>,
}

impl ScriptedHttpClient {
    fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        })
    }

    fn failing(error: HttpError) -> Arc<Self> {
        Arc::new(Self { result: Err(error) })
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

fn request() -> LookupRequest {
    LookupRequest::new(
        PostalCode::parse("01153000").expect("valid postal code"),
        1_000,
    )
}

#[tokio::test]
async fn adapters_identify_their_providers() {
    let brasilapi = BrasilApiAdapter::new();
    let viacep = ViaCepAdapter::new();

    assert_eq!(brasilapi.id(), ProviderId::Brasilapi);
    assert_eq!(viacep.id(), ProviderId::Viacep);
}

#[tokio::test]
async fn brasilapi_normalizes_well_formed_body() {
    let adapter =
        BrasilApiAdapter::with_http_client(ScriptedHttpClient::responding(200, BRASILAPI_BODY));

    let address = adapter.lookup(request()).await.expect("lookup must succeed");

    assert_eq!(address.postal_code, "01153000");
    assert_eq!(address.street, "Rua Vitorino Carmilo");
    assert_eq!(address.neighborhood, "Barra Funda");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
}

#[tokio::test]
async fn viacep_normalizes_well_formed_body() {
    let adapter = ViaCepAdapter::with_http_client(ScriptedHttpClient::responding(200, VIACEP_BODY));

    let address = adapter.lookup(request()).await.expect("lookup must succeed");

    assert_eq!(address.postal_code, "01153000");
    assert_eq!(address.street, "Rua Vitorino Carmilo");
    assert_eq!(address.neighborhood, "Barra Funda");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
}

#[tokio::test]
async fn both_providers_agree_on_canonical_postal_code() {
    let brasilapi =
        BrasilApiAdapter::with_http_client(ScriptedHttpClient::responding(200, BRASILAPI_BODY));
    let viacep = ViaCepAdapter::with_http_client(ScriptedHttpClient::responding(200, VIACEP_BODY));

    let from_brasilapi = brasilapi
        .lookup(request())
        .await
        .expect("lookup must succeed");
    let from_viacep = viacep.lookup(request()).await.expect("lookup must succeed");

    assert_eq!(from_brasilapi.postal_code, from_viacep.postal_code);
}

#[tokio::test]
async fn status_404_is_failure_not_empty_success() {
    let adapter =
        BrasilApiAdapter::with_http_client(ScriptedHttpClient::responding(404, "not found"));

    let error = adapter.lookup(request()).await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::Status);
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    let adapter =
        ViaCepAdapter::with_http_client(ScriptedHttpClient::responding(200, "<html>oops</html>"));

    let error = adapter.lookup(request()).await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::Decode);
}

#[tokio::test]
async fn viacep_erro_body_is_not_found() {
    let adapter =
        ViaCepAdapter::with_http_client(ScriptedHttpClient::responding(200, r#"{"erro": true}"#));

    let error = adapter.lookup(request()).await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::NotFound);
}

#[tokio::test]
async fn transport_timeout_maps_to_timeout_kind() {
    let adapter = BrasilApiAdapter::with_http_client(ScriptedHttpClient::failing(
        HttpError::timeout("request timeout: deadline elapsed"),
    ));

    let error = adapter.lookup(request()).await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::Timeout);
}

#[tokio::test]
async fn connection_failure_maps_to_transport_kind() {
    let adapter = ViaCepAdapter::with_http_client(ScriptedHttpClient::failing(HttpError::new(
        "connection failed: dns error",
    )));

    let error = adapter.lookup(request()).await.expect_err("must fail");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
}

//! HTTP client for the catalog's asset endpoint.

use catalogo_core::{AssetRecord, Session, StateError};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{error, info, warn};

/// Endpoint the catalog is served from unless overridden.
pub const DEFAULT_API_URL: &str = "https://6863ee2588359a373e96e80b.mockapi.io/api/v1/activos";

const UNKNOWN_FAILURE: &str = "Ocurrió un error desconocido.";
const FAILURE_PREFIX: &str = "No se pudieron cargar los activos.";

/// The two ways a catalog fetch can fail. Both end the session's data load.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("Error en la red: {status_text}")]
    Transport { status: u16, status_text: String },
    /// Anything else: connection failure, unreadable body, malformed JSON.
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Wrap a cause, falling back to a generic phrase when it has no message.
    pub fn unknown(cause: impl std::fmt::Display) -> Self {
        let message = cause.to_string();
        if message.trim().is_empty() {
            FetchError::Unknown(UNKNOWN_FAILURE.to_string())
        } else {
            FetchError::Unknown(message)
        }
    }

    /// Text shown in place of the catalog.
    pub fn user_message(&self) -> String {
        format!("{FAILURE_PREFIX} {self}")
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::unknown(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::unknown(err)
    }
}

/// Read-only client for the asset list.
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string())
    }
}

impl CatalogClient {
    /// Create a client for the full endpoint URL (no query string is added).
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every asset with a single GET. No retries, transport-default timeouts.
    pub async fn fetch_all(&self) -> Result<Vec<AssetRecord>, FetchError> {
        info!(url = %self.url, "fetching asset catalog");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(FetchError::Transport {
                status: status.as_u16(),
                status_text,
            });
        }

        if let Some(content_type) = resp.headers().get(CONTENT_TYPE)
            && !content_type
                .to_str()
                .is_ok_and(|ct| ct.to_ascii_lowercase().contains("json"))
        {
            warn!(content_type = ?content_type, "catalog response is not labelled as JSON");
        }

        let body = resp.bytes().await?;
        let assets: Vec<AssetRecord> = serde_json::from_slice(&body)?;
        info!(count = assets.len(), "fetched asset catalog");
        Ok(assets)
    }

    /// Run the fetch and resolve the session's pending state with its outcome.
    pub async fn load(&self, session: &mut Session) -> Result<(), StateError> {
        let outcome = self.fetch_all().await.map_err(|err| {
            error!(error = %err, "failed to fetch assets");
            err.user_message()
        });
        session.resolve(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogo_core::FetchState;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve a single canned response and return the URL to hit.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api/v1/activos")
    }

    const TWO_ASSETS: &str = r#"[
        {"id": "1", "nombre_activo": "Core Banking", "dominio": "Pagos", "ip": "10.0.0.1",
         "tipo_activo": "Servidor", "Deuda": {"SOA": 80}},
        {"id": "2", "nombre_activo": "Portal", "dominio": "", "ip": "10.0.0.2",
         "Deuda": "legacy system"}
    ]"#;

    #[tokio::test]
    async fn fetches_records() {
        let url = serve_once(http_response("200 OK", "application/json", TWO_ASSETS)).await;
        let assets = CatalogClient::new(url).fetch_all().await.unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].name, "Core Banking");
        assert_eq!(assets[1].domain, "");
    }

    #[tokio::test]
    async fn non_json_content_type_still_parses() {
        let url = serve_once(http_response("200 OK", "text/plain", "[]")).await;
        let assets = CatalogClient::new(url).fetch_all().await.unwrap();
        assert!(assets.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_transport_failure() {
        let url = serve_once(http_response(
            "500 Internal Server Error",
            "text/plain",
            "oops",
        ))
        .await;
        let err = CatalogClient::new(url).fetch_all().await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Transport {
                status: 500,
                status_text: "Internal Server Error".into()
            }
        );
        assert_eq!(
            err.user_message(),
            "No se pudieron cargar los activos. Error en la red: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_unknown_failure() {
        let url = serve_once(http_response("200 OK", "application/json", "{not json")).await;
        let err = CatalogClient::new(url).fetch_all().await.unwrap_err();
        match err {
            FetchError::Unknown(message) => assert!(!message.is_empty()),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_unknown_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = CatalogClient::new(format!("http://{addr}/"))
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unknown(_)));
    }

    #[tokio::test]
    async fn load_resolves_session() {
        let url = serve_once(http_response("200 OK", "application/json", TWO_ASSETS)).await;
        let mut session = Session::new();
        assert!(session.fetch_state().is_pending());
        CatalogClient::new(url).load(&mut session).await.unwrap();
        assert_eq!(session.fetch_state().records().len(), 2);
        assert_eq!(session.view().stats["servidor"], 1);
    }

    #[tokio::test]
    async fn load_failure_sets_user_message() {
        let url = serve_once(http_response("404 Not Found", "text/plain", "")).await;
        let mut session = Session::new();
        CatalogClient::new(url).load(&mut session).await.unwrap();
        assert_eq!(
            session.fetch_state(),
            &FetchState::Failed(
                "No se pudieron cargar los activos. Error en la red: Not Found".into()
            )
        );
    }

    #[test]
    fn empty_cause_uses_fallback() {
        assert_eq!(
            FetchError::unknown(""),
            FetchError::Unknown("Ocurrió un error desconocido.".into())
        );
    }

    #[test]
    fn default_client_targets_catalog_endpoint() {
        assert_eq!(CatalogClient::default().url(), DEFAULT_API_URL);
    }
}

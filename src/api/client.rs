use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Access denied")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// Client for a Supabase project's PostgREST endpoint (`/rest/v1`)
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    base_url: String,
    api_key: String,
    client: Client,
}

/// Per-request timeout for native HTTP clients
#[cfg(not(target_arch = "wasm32"))]
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// HTTP client shared by the backend and identity clients
pub fn http_client() -> Client {
    // On wasm, we can't use timeout
    #[cfg(target_arch = "wasm32")]
    let client = Client::new();

    #[cfg(not(target_arch = "wasm32"))]
    let client = client_with_timeout(REQUEST_TIMEOUT);

    client
}

#[cfg(not(target_arch = "wasm32"))]
fn client_with_timeout(timeout: std::time::Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        RestClient {
            inner: Arc::new(RestClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
                client: http_client(),
            }),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.inner.base_url, table)
    }

    /// Attach the project key, plus a bearer that defaults to the same key
    fn authorize(&self, request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        let bearer = bearer.unwrap_or(&self.inner.api_key);
        request
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    /// `GET /<table>?<params>`, returning every row
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let request = self.inner.client.get(self.table_url(table)).query(params);
        let response = self.authorize(request, None).send().await?;
        self.handle_response(response).await
    }

    /// `POST /<table>` with the single inserted row returned
    pub async fn insert_single<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        rows: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = self
            .inner
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(rows);

        let response = self.authorize(request, bearer).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                response.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::NotFound(error_message(&text)))
            }
            StatusCode::CONFLICT => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::Conflict(error_message(&text)))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::Server(format!("{}: {}", status, error_message(&text))))
            }
        }
    }
}

/// Flatten a PostgREST error body, falling back to the raw text
fn error_message(body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = match err.code {
                Some(code) => format!("[{}] {}", code, err.message),
                None => err.message,
            };
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message.push_str(" (");
                message.push_str(&details);
                message.push(')');
            }
            message
        }
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout() {
        assert_eq!(REQUEST_TIMEOUT, std::time::Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_client_gives_up_on_silent_server() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let timeout = std::time::Duration::from_millis(200);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            client_with_timeout(timeout).get(format!("http://{}/", addr)).send(),
        )
        .await;

        let err = result.expect("request should give up on its own").unwrap_err();
        assert!(err.is_timeout());
        assert!(matches!(ApiError::from(err), ApiError::Network(_)));
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let client = RestClient::new("https://demo.supabase.co/rest/v1/", "key");
        assert_eq!(client.table_url("companies"), "https://demo.supabase.co/rest/v1/companies");
    }

    #[test]
    fn test_error_message_from_postgrest_body() {
        let body = r#"{"code":"23503","message":"insert or update violates foreign key constraint","details":"Key (company_id)=(9) is not present.","hint":null}"#;
        assert_eq!(
            error_message(body),
            "[23503] insert or update violates foreign key constraint (Key (company_id)=(9) is not present.)"
        );
    }

    #[test]
    fn test_error_message_without_code_or_details() {
        assert_eq!(error_message(r#"{"message":"permission denied"}"#), "permission denied");
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
        assert_eq!(error_message(""), "");
    }
}

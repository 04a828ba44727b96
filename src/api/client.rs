//! HTTP client for the chat service.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::ChatBackend;
use super::types::{ChatReply, ChatRequest, SessionStats};
use crate::error::{ApiError, Result};
use crate::session::SessionId;

/// HTTP client for the chat service.
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::api::{ChatBackend, HttpClient};
/// use chat_widget::session::SessionId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new("http://localhost:5000")?;
/// let session = SessionId::generate();
///
/// let reply = client.send_message(&session, "Hello!").await?;
/// let stats = client.session_stats(&session).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Endpoint paths are joined relative to the base, which must therefore
        // end with a slash or its last segment would be replaced.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Create a client from the `api` section of the widget configuration.
    pub fn from_config(config: &crate::config::ApiConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut builder = reqwest::Client::builder();
            if config.request_timeout_secs > 0 {
                builder =
                    builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
            }
            Self::with_client(&config.base_url, builder.build()?)
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(&config.base_url)
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn session_url(&self, prefix: &str, session: &SessionId) -> Result<Url> {
        let mut url = self.url(prefix)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(session.as_str());
        Ok(url)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for HttpClient {
    async fn send_message(&self, session: &SessionId, message: &str) -> Result<String> {
        let req = ChatRequest {
            message: message.to_string(),
            session_id: session.to_string(),
        };
        let response = self
            .http
            .post(self.url("api/chat")?)
            .json(&req)
            .send()
            .await?;

        // Application failures arrive with a 5xx status and a chat payload, so
        // the body is interpreted before the status.
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<ChatReply>(&body) {
            Ok(reply) => {
                debug!(name: "api.chat.reply", status = %reply.status, http_status = status.as_u16());
                reply.into_result()
            }
            Err(_) if !status.is_success() => Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn clear_session(&self, session: &SessionId) -> Result<()> {
        let response = self
            .http
            .delete(self.session_url("api/clear", session)?)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn export_session(&self, session: &SessionId) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(self.session_url("api/export", session)?)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn session_stats(&self, session: &SessionId) -> Result<SessionStats> {
        let response = self
            .http
            .get(self.session_url("api/stats", session)?)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn health(&self) -> Result<()> {
        let response = self.http.get(self.url("api/health")?).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HttpClient::new("http://localhost:5000/widget").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/widget/");
        assert_eq!(
            client.url("api/chat").unwrap().as_str(),
            "http://localhost:5000/widget/api/chat"
        );
    }

    #[test]
    fn test_session_urls() {
        let client = HttpClient::new("http://localhost:5000").unwrap();
        let session = SessionId::new("abc123");

        assert_eq!(
            client.session_url("api/clear", &session).unwrap().as_str(),
            "http://localhost:5000/api/clear/abc123"
        );
        assert_eq!(
            client.session_url("api/stats", &session).unwrap().as_str(),
            "http://localhost:5000/api/stats/abc123"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}

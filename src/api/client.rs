use std::fmt;

use async_trait::async_trait;
use log::debug;

use super::types::{
    CreateSessionRequest, HealthResponse, Session, SessionChatRequest, SessionChatResponse,
    SessionWithMessages,
};

/// The one error kind the client distinguishes: "request failed". Either the
/// transport fell over or the server answered with a non-success status. No
/// retry, no backoff; the caller decides what to do with the failure.
#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status(u16),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "request failed: {e}"),
            ApiError::Status(code) => write!(f, "request failed: HTTP {code}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

/// The five remote operations the client consumes. Implemented over HTTP by
/// [`HttpApi`]; tests implement it with canned responses.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn create_session(&self, system_prompt: Option<String>) -> Result<Session, ApiError>;
    async fn get_session(&self, id: &str) -> Result<SessionWithMessages, ApiError>;
    async fn delete_session(&self, id: &str) -> Result<(), ApiError>;
    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<SessionChatResponse, ApiError>;
    async fn health_check(&self) -> Result<HealthResponse, ApiError>;
}

/// HTTP+JSON implementation backed by a shared `reqwest` client.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success status to `ApiError::Status` without touching the body.
fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(response)
}

#[async_trait]
impl ChatApi for HttpApi {
    async fn create_session(&self, system_prompt: Option<String>) -> Result<Session, ApiError> {
        debug!("POST /sessions (system_prompt set: {})", system_prompt.is_some());
        let response = self
            .http
            .post(self.url("/sessions"))
            .json(&CreateSessionRequest { system_prompt })
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn get_session(&self, id: &str) -> Result<SessionWithMessages, ApiError> {
        debug!("GET /sessions/{id}");
        let response = self
            .http
            .get(self.url(&format!("/sessions/{id}")))
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        debug!("DELETE /sessions/{id}");
        let response = self
            .http
            .delete(self.url(&format!("/sessions/{id}")))
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<SessionChatResponse, ApiError> {
        debug!("POST /sessions/{session_id}/chat ({} bytes)", message.len());
        let response = self
            .http
            .post(self.url(&format!("/sessions/{session_id}/chat")))
            .json(&SessionChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        debug!("GET /health");
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(check(response)?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://localhost:8080/");
        assert_eq!(api.url("/health"), "http://localhost:8080/health");
    }

    #[test]
    fn test_error_display_is_generic() {
        let err = ApiError::Status(503);
        assert_eq!(err.to_string(), "request failed: HTTP 503");
    }
}

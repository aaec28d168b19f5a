//! A model provider for OpenAI-compatible chat-completion APIs.
//!
//! The default endpoint is Groq, which speaks the same wire protocol as
//! OpenAI. Responses are always requested as server-sent events and are
//! surfaced to callers as a stream of message deltas.

#[macro_use]
extern crate tracing;

mod config;
mod io;
mod proto;
mod response;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use reqwest::{Client, StatusCode, header};
use talentscout_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest,
};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIConfig, OpenAIConfigBuilder,
};
use io::{Chunks, Sse};
use proto::ErrorEnvelope;
pub use response::OpenAIResponse;

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration this provider was created with.
    #[inline]
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;
    type Response = OpenAIResponse;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        debug!(
            model = %self.config.model,
            messages = req.messages.len(),
            "sending chat completion request"
        );
        let resp_fut = self
            .client
            .post(format!("{}{}", self.config.base_url, "/chat/completions"))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "text/event-stream")
            .json(&openai_req)
            .send();

        async move {
            let resp = resp_fut
                .await
                .map_err(|err| Error::new(format!("{err}"), ErrorKind::Other))?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                warn!(%status, "chat completion request was rejected");
                return Err(status_error(status, &body));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_event_stream = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype().as_str() == "event-stream")
                .unwrap_or(false);
            if !is_event_stream {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::Other,
                ));
            }

            // Here we got a successful response.
            let chunks = Chunks::from_response(resp);
            let sse = Sse::new(chunks);
            Ok(OpenAIResponse::from_sse(sse))
        }
    }
}

/// Maps a non-2xx response to an [`Error`], preferring the server-provided
/// message over the raw body.
fn status_error(status: StatusCode, body: &str) -> Error {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ErrorKind::Authentication
        }
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimitExceeded,
        _ => ErrorKind::Other,
    };
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_owned());
    let message = if detail.is_empty() {
        format!("HTTP status {status}")
    } else {
        format!("HTTP status {status}: {detail}")
    };
    Error::new(message, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_kinds() {
        let err = status_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid API Key"}}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(
            err.message(),
            "HTTP status 401 Unauthorized: Invalid API Key"
        );

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "slow down\n");
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        assert_eq!(err.message(), "HTTP status 429 Too Many Requests: slow down");

        let err = status_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.message(), "HTTP status 502 Bad Gateway");
    }
}

//! Gemini REST client.

use std::sync::Arc;

use async_trait::async_trait;
use card_core::{Artifact, Category, GenerationError, Generator, ModeDescriptor};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Errors raised while building the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL or model produced an invalid endpoint.
    #[error("invalid Gemini endpoint: {0}")]
    InvalidUrl(String),
    /// The HTTP client failed to build.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Transport-level causes wrapped into [`GenerationError::TransportFailure`].
#[derive(Debug, Error)]
enum TransportError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("undecodable response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. A missing key only fails when a request is made.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-3-flash-preview`.
    pub model: String,
    /// REST base URL up to and including the API version.
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Stateless Gemini client. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("model", &self.inner.model)
            .field("api_key", &self.inner.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the endpoint cannot be formed.
    /// Returns [`ClientError::Http`] if the HTTP client fails to build.
    pub fn new(config: GeminiConfig) -> Result<Self, ClientError> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!(
            "{base}/models/{}:generateContent",
            config.model
        ))
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme: {}",
                endpoint.scheme()
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("saatmishaali/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_key = config.api_key.filter(|k| !k.trim().is_empty());

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                endpoint,
                api_key,
                model: config.model,
            }),
        })
    }

    /// The resolved `generateContent` endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Send the request and return the candidate text.
    async fn send(&self, request: &GenerateContentRequest) -> Result<Option<String>, TransportError> {
        let api_key = self
            .inner
            .api_key
            .as_deref()
            .ok_or(TransportError::MissingApiKey)?;

        tracing::debug!(endpoint = %self.inner.endpoint, "sending generateContent request");

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "generateContent response");

        if !status.is_success() {
            return Err(TransportError::Status { status, body });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &envelope.usage_metadata {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_token_count,
                response_tokens = ?usage.candidates_token_count,
                "Gemini usage"
            );
        }
        if let Some(reason) = envelope
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!(reason, "prompt blocked by Gemini");
        }
        if let Some(reason) = envelope
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            tracing::debug!(reason, "candidate finished");
        }

        Ok(envelope.text())
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, category: Category) -> Result<Artifact, GenerationError> {
        let descriptor = ModeDescriptor::for_category(category);
        let request = GenerateContentRequest::new(category);

        let text = match self.send(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::error!(%category, "Gemini returned no text content");
                return Err(GenerationError::EmptyResponse);
            }
            Err(err) => {
                tracing::error!(%category, error = %err, "Gemini generation error");
                return Err(GenerationError::transport(err));
            }
        };

        descriptor.parse_payload(&text).inspect_err(|err| {
            tracing::error!(%category, error = %err, "Gemini payload rejected");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("k".into()),
            model: "gemini-test".into(),
            base_url: "http://localhost:1234/v1beta/".into(),
        })
        .expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
        let client = GeminiClient::new(config).expect("client");
        assert!(client
            .endpoint()
            .as_str()
            .starts_with("https://generativelanguage.googleapis.com/"));
    }

    #[test]
    fn test_invalid_url_error() {
        let result = GeminiClient::new(GeminiConfig {
            base_url: "not a url".into(),
            ..GeminiConfig::default()
        });
        match result {
            Err(ClientError::InvalidUrl(_)) => {}
            other => panic!("Expected InvalidUrl error, got: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("secret-key".into()),
            ..GeminiConfig::default()
        })
        .expect("client");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("***"));
    }
}

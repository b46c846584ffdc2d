//! Configuration for the Gemini client and for a run.
//!
//! The CLI never changes the model or endpoint: both stay at the defaults
//! below. The builder exists so library callers (and the wire tests, which
//! point `base_url` at a local server) can construct a client without
//! touching globals.

use crate::error::DocGenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model every request is sent to.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Public Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for [`crate::client::GeminiClient`].
///
/// # Example
/// ```rust
/// use doc_genai::ClientConfig;
///
/// let config = ClientConfig::builder("ABC123").build().unwrap();
/// assert_eq!(config.model, "gemini-1.5-flash");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,

    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Scheme + host of the API, without a trailing slash. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Start a builder with the given API key and default model/endpoint.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                api_key: api_key.into(),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        }
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// The API key is deliberately not checked; the service is the authority.
    pub fn build(self) -> Result<ClientConfig, DocGenError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(DocGenError::InvalidConfig("Model must not be empty".into()));
        }
        if !(c.base_url.starts_with("https://") || c.base_url.starts_with("http://")) {
            return Err(DocGenError::InvalidConfig(format!(
                "Base URL must be http(s), got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

/// How the answer is presented once it comes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Print a JSON object (text, model, finish reason, token usage) instead of plain text.
    pub json: bool,
    /// Remove a code fence wrapping the whole answer.
    pub strip_fences: bool,
}

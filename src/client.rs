//! Model client: one `generateContent` call against the Gemini REST API.
//!
//! [`GenerativeModel`] is the seam between the run loop and the network.
//! [`GeminiClient`] is the real implementation; tests plug in fakes that
//! record the request instead of sending it.
//!
//! There is no retry and no timeout override: a failed call is reported
//! once, classified into one of the remote error variants of
//! [`DocGenError`], and the run ends.

use crate::config::ClientConfig;
use crate::error::DocGenError;
use crate::pipeline::request::GenerateRequest;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info};

/// Anything that can answer a [`GenerateRequest`].
pub trait GenerativeModel {
    /// Model identifier requests are sent to.
    fn model_name(&self) -> &str;

    /// Submit the request and wait for the complete response.
    fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<GenerateResponse, DocGenError>> + Send;
}

// ── Response types ───────────────────────────────────────────────────────

/// Successful `generateContent` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A response part. Only text is read; other kinds are tolerated and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GenerateResponse {
    /// Text of the first candidate, all of its text parts concatenated.
    ///
    /// # Errors
    /// [`DocGenError::MalformedResponse`] when there is no candidate (usually
    /// the prompt was blocked) or the candidate carries no text.
    pub fn text(&self) -> Result<String, DocGenError> {
        let Some(candidate) = self.candidates.first() else {
            let detail = match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                Some(reason) => format!("no candidates returned (prompt blocked: {reason})"),
                None => "no candidates returned".to_string(),
            };
            return Err(DocGenError::MalformedResponse { detail });
        };

        let texts: Vec<&str> = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if texts.is_empty() {
            let detail = match candidate.finish_reason.as_deref() {
                Some(reason) => format!("candidate has no text part (finish reason: {reason})"),
                None => "candidate has no text part".to_string(),
            };
            return Err(DocGenError::MalformedResponse { detail });
        }

        Ok(texts.concat())
    }

    /// Finish reason of the first candidate, if any.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

// ── Error body ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Map a non-success HTTP status and its body to an error variant.
pub fn classify_error(status: u16, body: &str) -> DocGenError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let message = match &parsed {
        Some(e) if !e.message.is_empty() => e.message.clone(),
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    };

    let key_rejected = parsed.as_ref().is_some_and(|e| {
        e.details
            .iter()
            .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
            || e.status == "UNAUTHENTICATED"
            || e.message.contains("API key")
    });

    match status {
        401 | 403 => DocGenError::AuthError { detail: message },
        400 if key_rejected => DocGenError::AuthError { detail: message },
        _ => DocGenError::RemoteService { status, message },
    }
}

fn network_error(e: reqwest::Error) -> DocGenError {
    if e.is_builder() {
        // The only caller-controlled header is the API key.
        return DocGenError::AuthError {
            detail: format!("API key cannot be sent as an HTTP header: {e}"),
        };
    }
    DocGenError::Network {
        detail: error_chain(&e),
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}

// ── Gemini client ────────────────────────────────────────────────────────

/// [`GenerativeModel`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Result<Self, DocGenError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| DocGenError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS roots, …).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Client for the default model and endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, DocGenError> {
        Self::new(ClientConfig::builder(api_key).build()?)
    }
}

impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, DocGenError> {
        let url = self.config.generate_content_url();
        info!("Sending request to {}", self.config.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        debug!("HTTP {} with {} byte body", status, body.len());

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| DocGenError::MalformedResponse {
                detail: format!("response body is not a generateContent result: {e}"),
            })?;

        if let Some(usage) = parsed.usage_metadata {
            info!(
                "{} prompt tokens, {} response tokens, {} total",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let r = response(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 2, "totalTokenCount": 12},
            "modelVersion": "gemini-1.5-flash-002"
        }));
        assert_eq!(r.text().unwrap(), "Hello, world");
        assert_eq!(r.finish_reason(), Some("STOP"));
        assert_eq!(r.usage_metadata.unwrap().total_token_count, 12);
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let r = response(json!({
            "candidates": [{"content": {"parts": [
                {"functionCall": {"name": "f", "args": {}}},
                {"text": "answer"}
            ]}}]
        }));
        assert_eq!(r.text().unwrap(), "answer");
    }

    #[test]
    fn blocked_prompt_is_malformed() {
        let r = response(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = r.text().unwrap_err();
        assert!(matches!(err, DocGenError::MalformedResponse { .. }));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn candidate_without_text_is_malformed() {
        let r = response(json!({"candidates": [{"finishReason": "RECITATION"}]}));
        let err = r.text().unwrap_err();
        assert!(err.to_string().contains("RECITATION"), "got: {err}");
    }

    #[test]
    fn empty_text_is_still_text() {
        let r = response(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}));
        assert_eq!(r.text().unwrap(), "");
    }

    #[test]
    fn invalid_key_400_is_auth_error() {
        let body = json!({"error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]
        }})
        .to_string();
        let err = classify_error(400, &body);
        assert!(
            matches!(err, DocGenError::AuthError { ref detail } if detail.starts_with("API key not valid")),
            "got: {err:?}"
        );
    }

    #[test]
    fn forbidden_is_auth_error() {
        let err = classify_error(403, r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#);
        assert!(matches!(err, DocGenError::AuthError { .. }));
    }

    #[test]
    fn other_400_is_remote_service_error() {
        let body = r#"{"error":{"code":400,"message":"Request payload size exceeds the limit","status":"INVALID_ARGUMENT"}}"#;
        match classify_error(400, body) {
            DocGenError::RemoteService { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Request payload size exceeds the limit");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        match classify_error(502, "  Bad Gateway \n") {
            DocGenError::RemoteService { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(classify_error(500, "").to_string().contains("empty response body"));
    }

    #[test]
    fn client_reports_configured_model() {
        let client = GeminiClient::with_api_key("k").unwrap();
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }
}

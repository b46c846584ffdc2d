//! Error type for the doc-genai library.
//!
//! Every failure aborts the single linear run: nothing here is retried or
//! recovered locally. The variants mirror the stages of the pipeline so the
//! CLI can print a message that points at the step that failed:
//!
//! * argument parsing → [`DocGenError::InsufficientArguments`]
//! * document loading → [`DocGenError::DocumentNotFound`],
//!   [`DocGenError::PermissionDenied`], [`DocGenError::ReadFailed`]
//! * the remote call → [`DocGenError::AuthError`], [`DocGenError::Network`],
//!   [`DocGenError::RemoteService`], [`DocGenError::MalformedResponse`]
//! * printing → [`DocGenError::OutputWriteFailed`]

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the doc-genai library.
#[derive(Debug, Error)]
pub enum DocGenError {
    // ── Argument errors ───────────────────────────────────────────────────
    /// Fewer than two positional arguments (API key + document path).
    #[error(
        "Insufficient arguments: expected <apiKey> <documentPath> [prompt...], got {got} argument(s)"
    )]
    InsufficientArguments { got: usize },

    // ── Document errors ───────────────────────────────────────────────────
    /// Document was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the document.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The document exists but could not be read (directory, I/O failure, …).
    #[error("Failed to read document '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Remote service errors ─────────────────────────────────────────────
    /// The service rejected the API key (invalid, missing, or unauthorised).
    #[error("Authentication error from the Gemini API: {detail}")]
    AuthError { detail: String },

    /// The request never produced an HTTP response (DNS, connect, TLS, …).
    #[error("Network error talking to the Gemini API: {detail}\nCheck your internet connection.")]
    Network { detail: String },

    /// The service answered with a non-success status.
    #[error("Gemini API returned HTTP {status}: {message}")]
    RemoteService { status: u16, message: String },

    /// The service answered successfully but without a usable text field.
    #[error("Malformed response from the Gemini API: {detail}")]
    MalformedResponse { detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not write the response to the output stream.
    #[error("Failed to write response: {source}")]
    OutputWriteFailed {
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocGenError {
    /// `true` when the failure happened before any request left the process.
    pub fn is_before_network(&self) -> bool {
        matches!(
            self,
            DocGenError::InsufficientArguments { .. }
                | DocGenError::DocumentNotFound { .. }
                | DocGenError::PermissionDenied { .. }
                | DocGenError::ReadFailed { .. }
                | DocGenError::InvalidConfig(_)
        )
    }
}

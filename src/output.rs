//! Output types and writers.

use crate::client::UsageMetadata;
use crate::error::DocGenError;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// The model's answer (after fence stripping, if requested).
    pub text: String,
    /// Model the request was sent to.
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
}

/// Write `text` followed by a single newline.
pub fn write_text(out: &mut impl Write, text: &str) -> Result<(), DocGenError> {
    writeln!(out, "{text}")
        .and_then(|_| out.flush())
        .map_err(|source| DocGenError::OutputWriteFailed { source })
}

/// Write `output` as pretty-printed JSON followed by a newline.
pub fn write_json(out: &mut impl Write, output: &GenerationOutput) -> Result<(), DocGenError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| DocGenError::Internal(format!("Failed to serialise output: {e}")))?;
    write_text(out, &json)
}

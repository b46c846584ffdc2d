//! The invocation runner: load → encode → compose → call → print.
//!
//! One straight pass with no branches back. Each stage either hands its
//! result to the next or returns the error, so a document that fails to load
//! never reaches the model and nothing is printed unless the call succeeded.

use crate::args::Invocation;
use crate::client::{GeminiClient, GenerativeModel};
use crate::config::RunOptions;
use crate::error::DocGenError;
use crate::output::{write_json, write_text, GenerationOutput};
use crate::pipeline::{encode, postprocess, request};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Run one invocation against `model`, writing the answer to `out`.
///
/// # Errors
/// Whatever the failing stage returned; see [`DocGenError`].
pub async fn run<M: GenerativeModel>(
    invocation: &Invocation,
    model: &M,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<GenerationOutput, DocGenError> {
    let start = Instant::now();
    debug!(
        "ArgsParsed: document={}, prompt={} chars",
        invocation.document_path.display(),
        invocation.prompt.chars().count()
    );

    // ── Step 1: Load and encode ──────────────────────────────────────────
    let document = encode::load_and_encode(&invocation.document_path)?;
    info!("DocumentLoaded: {}", invocation.document_path.display());

    // ── Step 2: Compose ──────────────────────────────────────────────────
    let request = request::compose_request(document, invocation.prompt.as_str());
    debug!("RequestComposed: {} parts", request.parts().len());

    // ── Step 3: Call the model (exactly once) ────────────────────────────
    let response = model.generate_content(&request).await?;
    info!(
        "ResponseReceived from {} in {}ms",
        model.model_name(),
        start.elapsed().as_millis()
    );

    // ── Step 4: Extract and print ────────────────────────────────────────
    let mut text = response.text()?;
    if options.strip_fences {
        text = postprocess::strip_code_fences(&text);
    }

    let output = GenerationOutput {
        text,
        model: response
            .model_version
            .clone()
            .unwrap_or_else(|| model.model_name().to_string()),
        finish_reason: response.finish_reason().map(str::to_string),
        usage: response.usage_metadata,
    };

    if options.json {
        write_json(out, &output)?;
    } else {
        write_text(out, &output.text)?;
    }

    debug!("Done in {}ms", start.elapsed().as_millis());
    Ok(output)
}

/// [`run`] with a [`GeminiClient`] built from the invocation's API key.
pub async fn run_with_gemini(
    invocation: &Invocation,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<GenerationOutput, DocGenError> {
    let client = GeminiClient::with_api_key(invocation.api_key.as_str())?;
    run(invocation, &client, options, out).await
}

/// Blocking wrapper around [`run_with_gemini`].
///
/// Creates its own Tokio runtime, so it must not be called from inside one.
pub fn run_sync(
    invocation: &Invocation,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<GenerationOutput, DocGenError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| DocGenError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(run_with_gemini(invocation, options, out))
}

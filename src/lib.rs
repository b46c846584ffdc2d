//! # doc-genai
//!
//! Ask a Gemini model a question about a local PDF.
//!
//! The document is read from disk, base64-encoded, and sent inline next to
//! the prompt in a single `generateContent` call to `gemini-1.5-flash`. The
//! model's text answer is printed to stdout.
//!
//! ## Pipeline Overview
//!
//! ```text
//! argv
//!  │
//!  ├─ 1. Args     <apiKey> <documentPath> [prompt...]  (%20 → space)
//!  ├─ 2. Load     read the whole file
//!  ├─ 3. Encode   bytes → base64 application/pdf blob
//!  ├─ 4. Compose  [document part, prompt part]
//!  ├─ 5. Call     one POST …/models/gemini-1.5-flash:generateContent
//!  └─ 6. Print    response text + newline
//! ```
//!
//! Any failure ends the run; nothing is retried.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc_genai::{run_with_gemini, Invocation, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let invocation = Invocation::from_args(["ABC123", "sample.pdf", "Summarize", "this"])?;
//!     run_with_gemini(&invocation, &RunOptions::default(), &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc-genai` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod run;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use args::{unescape_path, Invocation};
pub use client::{classify_error, GeminiClient, GenerateResponse, GenerativeModel, UsageMetadata};
pub use config::{ClientConfig, ClientConfigBuilder, RunOptions, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::DocGenError;
pub use output::GenerationOutput;
pub use pipeline::encode::{EncodedDocument, PDF_MIME_TYPE};
pub use pipeline::request::{compose_request, GenerateRequest, Part};
pub use run::{run, run_sync, run_with_gemini};

//! CLI binary for doc-genai.
//!
//! A thin shim over the library crate: flags pick logging and output
//! format, the positional arguments go to `Invocation::from_os_args` untouched.

use anyhow::{Context, Result};
use clap::Parser;
use doc_genai::{run_with_gemini, Invocation, RunOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarise a document
  doc-genai "$GEMINI_API_KEY" report.pdf Summarize this document

  # Paths may carry %20 for spaces
  doc-genai "$GEMINI_API_KEY" my%20file.pdf Explain

  # Ask for JSON and drop the ```json fence around it
  doc-genai --strip-fences "$GEMINI_API_KEY" notes.pdf List the key terms as a JSON array

  # Include model, finish reason and token usage
  doc-genai --json "$GEMINI_API_KEY" paper.pdf What is the main result?

MODEL:
  Requests go to gemini-1.5-flash via the Generative Language API.
  The document is sent inline as application/pdf (it must fit in memory).

LOGGING:
  RUST_LOG overrides the log filter chosen by --verbose / --quiet.
  Logs go to stderr; stdout carries only the answer.
"#;

/// Ask Gemini a question about a local PDF.
#[derive(Parser, Debug)]
#[command(
    name = "doc-genai",
    version,
    about = "Ask Gemini a question about a local PDF",
    long_about = "Reads a local PDF, sends it together with a text prompt to gemini-1.5-flash \
in a single request, and prints the model's answer to stdout.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the answer.
    #[arg(short, long)]
    quiet: bool,

    /// Print a JSON object (text, model, finish reason, token usage) instead of plain text.
    #[arg(long)]
    json: bool,

    /// Remove a code fence wrapping the whole answer.
    #[arg(long)]
    strip_fences: bool,

    /// <apiKey> <documentPath> [prompt words...]
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<OsString>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Parse positional arguments ───────────────────────────────────────
    let invocation = Invocation::from_os_args(cli.args).context("Invalid arguments")?;

    let options = RunOptions {
        json: cli.json,
        strip_fences: cli.strip_fences,
    };

    // ── Run ──────────────────────────────────────────────────────────────
    // The answer is buffered so the spinner can be cleared before it is printed.
    let spinner = (!cli.quiet && !cli.verbose && io::stderr().is_terminal()).then(spinner);
    let mut buffer = Vec::new();
    let result = run_with_gemini(&invocation, &options, &mut buffer).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    result.with_context(|| {
        format!(
            "Failed to get an answer for '{}'",
            invocation.document_path.display()
        )
    })?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(&buffer)
        .and_then(|_| handle.flush())
        .context("Failed to write to stdout")?;

    Ok(())
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message("Asking gemini-1.5-flash…");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

//! Positional argument parsing: `<apiKey> <documentPath> [prompt words...]`.
//!
//! The document path may arrive with spaces escaped as `%20` (callers that
//! shell out to this tool tend to do that). Only that one escape is undone;
//! anything else that looks percent-encoded is passed through untouched.

use crate::error::DocGenError;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// The three values one invocation works with.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Credential for the Gemini API. Opaque, never validated or logged.
    pub api_key: String,
    /// Local path of the document, with `%20` already turned into spaces.
    pub document_path: PathBuf,
    /// Remaining arguments joined with single spaces. May be empty.
    pub prompt: String,
}

impl Invocation {
    /// Build an invocation from raw positional arguments (program name excluded).
    ///
    /// # Errors
    /// [`DocGenError::InsufficientArguments`] when fewer than two arguments are
    /// given. An empty prompt is valid.
    pub fn from_args<I, S>(args: I) -> Result<Self, DocGenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_os_args(args.into_iter().map(|a| OsString::from(Into::<String>::into(a))))
    }

    /// Like [`Invocation::from_args`], but the document path may be any OS
    /// string. Key and prompt are converted lossily.
    pub fn from_os_args<I, S>(args: I) -> Result<Self, DocGenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);

        let (api_key, raw_path) = match (args.next(), args.next()) {
            (Some(key), Some(path)) => (key, path),
            (Some(_), None) => return Err(DocGenError::InsufficientArguments { got: 1 }),
            _ => return Err(DocGenError::InsufficientArguments { got: 0 }),
        };

        let prompt = args
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self {
            api_key: api_key.to_string_lossy().into_owned(),
            document_path: unescape_os_path(raw_path),
            prompt,
        })
    }
}

/// [`unescape_path`] for an OS string; non-UTF-8 paths are unescaped bytewise on Unix.
pub fn unescape_os_path(raw: OsString) -> PathBuf {
    match raw.into_string() {
        Ok(s) => PathBuf::from(unescape_path(&s)),
        Err(raw) => unescape_non_utf8(raw),
    }
}

#[cfg(unix)]
fn unescape_non_utf8(raw: OsString) -> PathBuf {
    use std::os::unix::ffi::OsStringExt;

    let bytes = raw.into_vec();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"%20") {
            out.push(b' ');
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    PathBuf::from(OsString::from_vec(out))
}

// TODO: decode `%20` in Windows paths that contain unpaired surrogates.
#[cfg(not(unix))]
fn unescape_non_utf8(raw: OsString) -> PathBuf {
    PathBuf::from(raw)
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("api_key", &"<redacted>")
            .field("document_path", &self.document_path)
            .field("prompt", &self.prompt)
            .finish()
    }
}

/// Replace every `%20` with a space. No other escapes are decoded.
pub fn unescape_path(raw: &str) -> String {
    raw.replace("%20", " ")
}

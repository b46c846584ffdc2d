//! Document loading: read a local file into memory in one go.
//!
//! The whole file is buffered, so documents must fit in memory. The handle
//! lives only inside [`load_document`] and is closed on every return path,
//! including a failed read.

use crate::error::DocGenError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Read the file at `path` to EOF.
///
/// A file that does not start with `%PDF` is still returned; a warning is
/// logged and the remote service gets to decide what to do with it.
pub fn load_document(path: &Path) -> Result<Vec<u8>, DocGenError> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| DocGenError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    if !looks_like_pdf(&bytes) {
        warn!(
            "'{}' does not start with %PDF; sending it as application/pdf anyway",
            path.display()
        );
    }

    debug!("Loaded {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// `true` if `bytes` starts with the PDF magic number.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

fn open_error(path: &Path, e: std::io::Error) -> DocGenError {
    match e.kind() {
        ErrorKind::NotFound => DocGenError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => DocGenError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => DocGenError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

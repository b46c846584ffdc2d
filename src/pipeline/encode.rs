//! Document encoding: raw bytes → base64 text wrapped in [`EncodedDocument`].
//!
//! The Gemini API takes inline documents as base64 inside the JSON body, so
//! the binary buffer has to become text before it can be sent. The standard
//! alphabet with padding is what the API expects.

use crate::error::DocGenError;
use crate::pipeline::input::load_document;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// MIME type attached to every document. Fixed: the tool only sends PDFs.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A document ready to be embedded in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    pub mime_type: String,
    /// Standard base64 of the document bytes.
    pub data: String,
}

/// Encode the document bytes. The buffer is consumed and dropped here.
pub fn encode_document(bytes: Vec<u8>) -> EncodedDocument {
    let data = STANDARD.encode(&bytes);
    debug!("Encoded document: {} bytes → {} bytes base64", bytes.len(), data.len());

    EncodedDocument {
        mime_type: PDF_MIME_TYPE.to_string(),
        data,
    }
}

/// Load the file at `path` and encode it.
pub fn load_and_encode(path: &Path) -> Result<EncodedDocument, DocGenError> {
    load_document(path).map(encode_document)
}

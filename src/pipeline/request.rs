//! Request composition: encoded document + prompt → `generateContent` body.
//!
//! The request always has exactly two parts, in this order: the inline
//! document, then the prompt text. An empty prompt still yields a text part.

use crate::pipeline::encode::EncodedDocument;
use serde::{Deserialize, Serialize};

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A segment of a multi-modal message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    Text { text: String },
}

/// Binary payload carried inline as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

impl From<EncodedDocument> for Part {
    fn from(doc: EncodedDocument) -> Self {
        Part::InlineData {
            inline_data: Blob {
                mime_type: doc.mime_type,
                data: doc.data,
            },
        }
    }
}

impl GenerateRequest {
    /// The parts of the single user turn.
    pub fn parts(&self) -> &[Part] {
        self.contents
            .first()
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }
}

/// Build the two-part request: `[document, prompt]`.
pub fn compose_request(document: EncodedDocument, prompt: impl Into<String>) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::from(document), Part::text(prompt)],
        }],
    }
}

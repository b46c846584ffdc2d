//! Local pipeline stages that run before and after the remote call.
//!
//! ```text
//! input ──▶ encode ──▶ request ──▶ (client) ──▶ postprocess
//! (read)    (base64)   (2 parts)    (Gemini)     (optional)
//! ```
//!
//! 1. [`input`]  : read the whole document into memory
//! 2. [`encode`] : base64-wrap it as an `application/pdf` blob
//! 3. [`request`]: build the `[document, prompt]` request body
//! 4. [`postprocess`]: optional fence stripping of the answer

pub mod encode;
pub mod input;
pub mod postprocess;
pub mod request;

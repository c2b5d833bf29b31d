//! Speech recognition backends.
//!
//! The batch loop only talks to [`SpeechRecognizer`]; [`WatsonClient`] is the
//! production implementation.

mod iam;
mod options;
mod watson;

use anyhow::Result;
use serde_json::Value;

pub use iam::IamAuthenticator;
pub use options::{
    DEFAULT_CONTENT_TYPE, DEFAULT_MAX_ALTERNATIVES, DEFAULT_MODEL, DEFAULT_THRESHOLD,
    NO_INACTIVITY_TIMEOUT, RecognitionOptions,
};
pub use watson::WatsonClient;

/// One audio file to recognize
pub struct RecognizeRequest<'a> {
    pub audio_data: Vec<u8>,
    /// File name, used in diagnostics
    pub filename: String,
    pub options: &'a RecognitionOptions,
}

/// Synchronous speech-to-text backend
pub trait SpeechRecognizer {
    /// Short identifier for diagnostics
    fn name(&self) -> &'static str;

    /// Recognize one audio file, blocking until the service answers.
    ///
    /// Returns the service's JSON result untouched.
    fn recognize(&self, request: RecognizeRequest<'_>) -> Result<Value>;
}

//! AI client seam and the Gemini implementation

pub mod backend_impl;
pub mod prompts;

use digit_types::Result;

/// A vision-capable model that answers the digit prompt for one image.
///
/// Implementations send exactly one request per call and return the raw
/// response text; interpretation happens in [`crate::interpreter`].
pub trait DigitClassifier: Send + Sync {
    fn classify(&self, payload_b64: &str, mime_type: &str) -> Result<String>;
}

impl<T: DigitClassifier + ?Sized> DigitClassifier for std::sync::Arc<T> {
    fn classify(&self, payload_b64: &str, mime_type: &str) -> Result<String> {
        (**self).classify(payload_b64, mime_type)
    }
}

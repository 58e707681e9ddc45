//! Vision module - handwritten digit identification through a multimodal model
//!
//! The pipeline runs strictly forward:
//! intake (file + MIME check) -> encoder (base64 payload) ->
//! classifier client (one Gemini request) -> interpreter (confidence tiers).

pub mod ai;
pub mod encoder;
pub mod intake;
pub mod interpreter;

pub use ai::backend_impl::{
    GeminiClassifier, DEFAULT_CREDENTIAL_NAME, DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
pub use ai::prompts::DIGIT_PROMPT;
pub use ai::DigitClassifier;
pub use encoder::{encode_base64, read_as_data_url, strip_data_url_prefix};
pub use intake::{mime_for_path, Preview, UploadedImage, RECOMMENDED_MAX_BYTES};
pub use interpreter::interpret;

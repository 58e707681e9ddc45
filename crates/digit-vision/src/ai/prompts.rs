//! Prompt sent alongside the image

use digit_types::CANNOT_IDENTIFY;

/// Fixed instruction for the model. The fallback phrase must match
/// [`CANNOT_IDENTIFY`] exactly for the interpreter's Low tier to apply.
pub const DIGIT_PROMPT: &str = "This image contains a handwritten number. \
Please identify and return ONLY the single digit (0-9) you see in the image. \
If you cannot identify a clear single digit, respond with \"Cannot identify\". \
Do not include any other text in your response.";

//! Interpretation of the model's free-text answer

use digit_types::{ClassificationResult, ConfidenceTier, Error, Result, CANNOT_IDENTIFY};

/// Turn raw model text into a classification.
///
/// Tiers, first match wins:
/// 1. the whole answer is one digit -> High
/// 2. the answer is the "Cannot identify" literal -> no digit, Low
/// 3. the answer contains a digit somewhere -> first digit, Medium
/// 4. otherwise -> `Error::Unrecognized`
pub fn interpret(raw_text: &str) -> Result<ClassificationResult> {
    let text = raw_text.trim();

    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_digit() {
            return Ok(ClassificationResult::recognized(c, ConfidenceTier::High, text));
        }
    }

    if text == CANNOT_IDENTIFY {
        return Ok(ClassificationResult::unidentifiable(text));
    }

    match text.chars().find(char::is_ascii_digit) {
        Some(c) => Ok(ClassificationResult::recognized(c, ConfidenceTier::Medium, text)),
        None => Err(Error::Unrecognized),
    }
}

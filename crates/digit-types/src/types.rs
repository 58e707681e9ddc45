//! Classification result types

use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// Literal the model is told to answer with when no digit is legible
pub const CANNOT_IDENTIFY: &str = "Cannot identify";

/// Heuristic label for how directly the response matched the expected format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured result of one identification round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Recognized digit, `None` when the model could not identify one
    pub digit: Option<char>,
    pub confidence: ConfidenceTier,
    /// Model response text (trimmed)
    pub raw_response: String,
}

impl ClassificationResult {
    pub fn recognized(
        digit: char,
        confidence: ConfidenceTier,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            digit: Some(digit),
            confidence,
            raw_response: raw_response.into(),
        }
    }

    pub fn unidentifiable(raw_response: impl Into<String>) -> Self {
        Self {
            digit: None,
            confidence: ConfidenceTier::Low,
            raw_response: raw_response.into(),
        }
    }

    /// Informational message shown alongside a result without a digit
    pub fn notice(&self) -> Option<&'static str> {
        if self.digit.is_none() {
            Some("Could not identify a clear handwritten number in the image")
        } else {
            None
        }
    }
}

/// What the UI displays after an identification attempt.
///
/// Exactly one of result or error is shown; the "Cannot identify" path is its
/// own variant instead of a result and an error set side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Recognized(ClassificationResult),
    Unidentifiable(ClassificationResult),
    Failed { kind: ErrorKind, message: String },
}

impl Outcome {
    pub fn failed(err: &Error) -> Self {
        Outcome::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Outcome::Recognized(r) | Outcome::Unidentifiable(r) => Some(r),
            Outcome::Failed { .. } => None,
        }
    }

    /// User-facing message, if the outcome carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Recognized(_) => None,
            Outcome::Unidentifiable(r) => r.notice(),
            Outcome::Failed { message, .. } => Some(message),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<ClassificationResult> for Outcome {
    fn from(result: ClassificationResult) -> Self {
        if result.digit.is_some() {
            Outcome::Recognized(result)
        } else {
            Outcome::Unidentifiable(result)
        }
    }
}

impl From<crate::Result<ClassificationResult>> for Outcome {
    fn from(result: crate::Result<ClassificationResult>) -> Self {
        match result {
            Ok(r) => r.into(),
            Err(e) => Outcome::failed(&e),
        }
    }
}

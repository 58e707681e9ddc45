//! Identify Service - one identification attempt
//!
//! Encoder -> classifier client -> response interpreter, strictly forward.
//! No retries and no caching: every call issues exactly one request.

use crate::session::{IdentifyRequest, RequestToken};
use digit_types::{ClassificationResult, Outcome, Result};
use digit_vision::{encode_base64, interpret, DigitClassifier, UploadedImage};
use tracing::{info, warn};

/// Run the pipeline for an accepted image
pub fn identify(
    image: &UploadedImage,
    classifier: &dyn DigitClassifier,
) -> Result<ClassificationResult> {
    info!(
        file = %image.file_name(),
        mime = %image.mime_type(),
        size = image.len(),
        "identifying handwritten digit"
    );

    let payload = encode_base64(image);
    let raw = classifier.classify(&payload, image.mime_type())?;

    match interpret(&raw) {
        Ok(result) => {
            info!(
                digit = ?result.digit,
                confidence = %result.confidence,
                "identification finished"
            );
            Ok(result)
        }
        Err(e) => {
            warn!(response = %raw.trim(), "no digit in model response");
            Err(e)
        }
    }
}

/// Same as [`identify`], folded into the displayed outcome
pub fn identify_outcome(image: &UploadedImage, classifier: &dyn DigitClassifier) -> Outcome {
    identify(image, classifier).into()
}

/// Outcome of a session request, tagged with the token it was issued under
#[derive(Debug, Clone)]
pub struct IdentifyResponse {
    pub token: RequestToken,
    pub outcome: Outcome,
}

/// Run a request issued by [`crate::session::IdentifierSession::begin_identify`]
pub fn execute(request: IdentifyRequest, classifier: &dyn DigitClassifier) -> IdentifyResponse {
    IdentifyResponse {
        token: request.token,
        outcome: identify_outcome(&request.image, classifier),
    }
}

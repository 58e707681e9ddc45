//! UI session state for the identifier
//!
//! Holds the current image, its preview and the displayed outcome. Every
//! identification attempt gets a fresh [`RequestToken`]; only the response
//! carrying the pending token is applied, so answers that arrive after a
//! clear or a newer attempt are dropped.

use digit_types::{Error, Outcome, Result};
use digit_vision::{Preview, UploadedImage};
use tracing::debug;

/// Monotonically increasing id of one identification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Work handed to a worker thread
#[derive(Debug, Clone)]
pub struct IdentifyRequest {
    pub token: RequestToken,
    pub image: UploadedImage,
}

#[derive(Debug, Default)]
pub struct IdentifierSession {
    image: Option<UploadedImage>,
    preview: Option<Preview>,
    outcome: Option<Outcome>,
    pending: Option<RequestToken>,
    last_token: u64,
    /// Bumped on every accepted selection; lets renderers key their textures
    selection: u64,
}

impl IdentifierSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selection(&self) -> u64 {
        self.selection
    }

    /// Apply the result of a file selection.
    ///
    /// An accepted image replaces the current one and its preview, clears
    /// the outcome and invalidates any pending attempt. A rejected file leaves
    /// the current image in place and shows the error.
    pub fn select(&mut self, selected: Result<UploadedImage>) {
        match selected {
            Ok(image) => {
                self.preview = Some(Preview::from_image(&image));
                self.image = Some(image);
                self.outcome = None;
                self.pending = None;
                self.selection += 1;
            }
            Err(e) => {
                debug!(error = %e, "file selection rejected");
                self.outcome = Some(Outcome::failed(&e));
            }
        }
    }

    /// Identify is offered only with an image and nothing in flight
    pub fn can_identify(&self) -> bool {
        self.image.is_some() && self.pending.is_none()
    }

    /// Start an attempt. Returns `None` when there is nothing to send or an
    /// attempt is already pending.
    pub fn begin_identify(&mut self) -> Option<IdentifyRequest> {
        if self.pending.is_some() {
            return None;
        }

        let Some(image) = self.image.clone() else {
            self.outcome = Some(Outcome::failed(&Error::NoImage));
            return None;
        };

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.pending = Some(token);
        self.outcome = None;

        Some(IdentifyRequest { token, image })
    }

    /// Apply a response. Returns `false` when the token is stale.
    pub fn complete(&mut self, token: RequestToken, outcome: Outcome) -> bool {
        if self.pending != Some(token) {
            debug!(token = token.value(), "discarding stale response");
            return false;
        }

        self.pending = None;
        self.outcome = Some(outcome);
        true
    }

    /// Reset everything at once
    pub fn clear(&mut self) {
        self.image = None;
        self.preview = None;
        self.outcome = None;
        self.pending = None;
    }

    /// Drop the image and preview but keep the displayed outcome
    pub fn remove_image(&mut self) {
        self.image = None;
        self.preview = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digit_types::{ClassificationResult, ConfidenceTier, ErrorKind};

    fn image(name: &str) -> UploadedImage {
        UploadedImage::accept(name, "image/png", vec![0, 1, 2]).unwrap()
    }

    fn recognized(d: char) -> Outcome {
        Outcome::Recognized(ClassificationResult::recognized(
            d,
            ConfidenceTier::High,
            d.to_string(),
        ))
    }

    #[test]
    fn test_select_sets_image_and_preview() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));

        assert_eq!(session.image().map(|i| i.file_name()), Some("a.png"));
        assert_eq!(session.preview().map(|p| p.data_url()), Some("data:image/png;base64,AAEC"));
        assert!(session.can_identify());
        assert_eq!(session.selection(), 1);
    }

    #[test]
    fn test_rejected_selection_keeps_image() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        session.select(UploadedImage::accept("notes.txt", "text/plain", vec![]));

        assert_eq!(session.image().map(|i| i.file_name()), Some("a.png"));
        assert_eq!(
            session.outcome().and_then(|o| o.error_kind()),
            Some(ErrorKind::InvalidType)
        );
    }

    #[test]
    fn test_new_selection_replaces_outcome() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let request = session.begin_identify().unwrap();
        session.complete(request.token, recognized('1'));
        assert!(session.outcome().is_some());

        session.select(Ok(image("b.png")));
        assert!(session.outcome().is_none());
        assert_eq!(session.image().map(|i| i.file_name()), Some("b.png"));
    }

    #[test]
    fn test_response_after_new_selection_is_discarded() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let request = session.begin_identify().unwrap();

        session.select(Ok(image("b.png")));
        assert!(!session.is_pending());
        assert!(session.can_identify());

        assert!(!session.complete(request.token, recognized('4')));
        assert!(session.outcome().is_none());
        assert_eq!(session.image().map(|i| i.file_name()), Some("b.png"));
    }

    #[test]
    fn test_identify_without_image() {
        let mut session = IdentifierSession::new();
        assert!(session.begin_identify().is_none());
        assert_eq!(
            session.outcome().and_then(|o| o.error_kind()),
            Some(ErrorKind::NoImage)
        );
    }

    #[test]
    fn test_only_one_attempt_in_flight() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));

        let first = session.begin_identify().unwrap();
        assert!(!session.can_identify());
        assert!(session.begin_identify().is_none());

        assert!(session.complete(first.token, recognized('2')));
        assert!(session.can_identify());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let request = session.begin_identify().unwrap();
        session.complete(request.token, recognized('3'));

        session.clear();
        assert!(session.image().is_none());
        assert!(session.preview().is_none());
        assert!(session.outcome().is_none());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_response_after_clear_is_discarded() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let request = session.begin_identify().unwrap();

        session.clear();
        assert!(!session.complete(request.token, recognized('4')));
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_stale_token_cannot_overwrite_newer_attempt() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let old = session.begin_identify().unwrap();

        session.clear();
        session.select(Ok(image("b.png")));
        let new = session.begin_identify().unwrap();
        assert!(new.token > old.token);

        assert!(!session.complete(old.token, recognized('5')));
        assert!(session.is_pending());
        assert!(session.complete(new.token, recognized('6')));
        assert_eq!(session.outcome().and_then(|o| o.result()).and_then(|r| r.digit), Some('6'));
    }

    #[test]
    fn test_remove_image_keeps_outcome() {
        let mut session = IdentifierSession::new();
        session.select(Ok(image("a.png")));
        let request = session.begin_identify().unwrap();
        session.complete(request.token, recognized('7'));

        session.remove_image();
        assert!(session.image().is_none());
        assert!(session.preview().is_none());
        assert!(session.outcome().is_some());
        assert!(!session.can_identify());
    }
}

//! End-to-end flow through session, worker thread and a fake classifier

use digit_app::app::execute;
use digit_app::config::Config;
use digit_app::session::IdentifierSession;
use digit_types::{ConfidenceTier, ErrorKind, Outcome, Result};
use digit_vision::{DigitClassifier, UploadedImage};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;

/// Answers with a fixed text and counts calls
struct FixedAnswer {
    text: &'static str,
    calls: AtomicUsize,
}

impl FixedAnswer {
    fn new(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            text,
            calls: AtomicUsize::new(0),
        })
    }
}

impl DigitClassifier for FixedAnswer {
    fn classify(&self, _payload_b64: &str, _mime_type: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::File::create(&path).unwrap().write_all(contents).unwrap();
    path
}

#[test]
fn test_identify_on_worker_thread() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "digit.png", &[137, 80, 78, 71]);

    let classifier = FixedAnswer::new("It looks like a 9");
    let mut session = IdentifierSession::new();
    session.select(UploadedImage::open(&path, None));

    let request = session.begin_identify().expect("image selected");
    let (sender, receiver) = channel();
    let worker_classifier = Arc::clone(&classifier);
    thread::spawn(move || {
        let _ = sender.send(execute(request, &worker_classifier));
    });

    let response = receiver.recv().unwrap();
    assert!(session.complete(response.token, response.outcome));

    let result = session.outcome().and_then(Outcome::result).unwrap();
    assert_eq!(result.digit, Some('9'));
    assert_eq!(result.confidence, ConfidenceTier::Medium);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_text_file_rejected_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.txt", b"3");

    let classifier = FixedAnswer::new("3");
    let mut session = IdentifierSession::new();
    session.select(UploadedImage::open(&path, None));

    assert!(session.begin_identify().is_none());
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    // The selection error was replaced by the "upload first" message
    assert_eq!(
        session.outcome().and_then(Outcome::error_kind),
        Some(ErrorKind::NoImage)
    );
}

#[test]
fn test_cleared_session_ignores_late_response() {
    let classifier = FixedAnswer::new("1");
    let mut session = IdentifierSession::new();
    session.select(UploadedImage::accept("a.png", "image/png", vec![1]));

    let request = session.begin_identify().unwrap();
    session.clear();

    let response = execute(request, classifier.as_ref());
    assert!(!session.complete(response.token, response.outcome));
    assert!(session.outcome().is_none());
    assert!(session.image().is_none());
}

#[test]
fn test_missing_credential_from_config() {
    let config = Config {
        api_key_env: "DIGIT_IDENTIFIER_FLOW_TEST_UNSET_KEY".to_string(),
        endpoint: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };

    let mut session = IdentifierSession::new();
    session.select(UploadedImage::accept("a.png", "image/png", vec![1]));
    let request = session.begin_identify().unwrap();

    let classifier = config.classifier();
    let response = execute(request, &classifier);
    session.complete(response.token, response.outcome);

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.error_kind(), Some(ErrorKind::MissingCredential));
    assert!(outcome
        .message()
        .unwrap()
        .contains("DIGIT_IDENTIFIER_FLOW_TEST_UNSET_KEY"));
}

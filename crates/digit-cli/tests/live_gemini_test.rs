//! Live tests against the Gemini API.
//!
//! Need GEMINI_API_KEY in the environment.
//! Run with: cargo test -p digit-cli -- --ignored

use digit_app::app::identify_outcome;
use digit_app::config::Config;
use digit_types::{ErrorKind, Outcome};
use digit_vision::UploadedImage;
use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

/// A 28x28 white square with a vertical bar, roughly a "1"
fn synthetic_one() -> Vec<u8> {
    let mut img = GrayImage::from_pixel(28, 28, Luma([255u8]));
    for y in 4..24 {
        for x in 13..16 {
            img.put_pixel(x, y, Luma([0u8]));
        }
    }
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

#[test]
#[ignore]
fn test_live_identify_synthetic_digit() {
    let config = Config::default();
    assert!(config.credential().is_some(), "GEMINI_API_KEY not set");

    let image = UploadedImage::accept("one.png", "image/png", synthetic_one()).unwrap();
    let outcome = identify_outcome(&image, &config.classifier());

    println!("=== Gemini answer ===");
    println!("{:?}", outcome);

    assert_ne!(
        outcome.error_kind(),
        Some(ErrorKind::ServiceError),
        "service call failed: {:?}",
        outcome.message()
    );
    assert_ne!(outcome.error_kind(), Some(ErrorKind::MissingCredential));
    if let Outcome::Recognized(result) = outcome {
        assert!(result.digit.map(|d| d.is_ascii_digit()).unwrap_or(false));
    }
}

#[test]
#[ignore]
fn test_live_invalid_key_is_service_error() {
    let config = Config::default();
    let classifier =
        digit_vision::GeminiClassifier::new(Some("invalid-key".to_string()), &config.model);

    let image = UploadedImage::accept("one.png", "image/png", synthetic_one()).unwrap();
    let outcome = identify_outcome(&image, &classifier);

    assert_eq!(outcome.error_kind(), Some(ErrorKind::ServiceError));
}

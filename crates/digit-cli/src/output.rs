//! Output formatting module

use digit_types::{Outcome, OutputFormat, Result};
use digit_vision::UploadedImage;
use serde::Serialize;

/// JSON report: file details plus the flattened outcome
#[derive(Serialize)]
struct Report<'a> {
    file: &'a str,
    mime_type: &'a str,
    size_bytes: usize,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

pub fn render_json(image: &UploadedImage, outcome: &Outcome) -> Result<String> {
    let report = Report {
        file: image.file_name(),
        mime_type: image.mime_type(),
        size_bytes: image.len(),
        outcome,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_table(image: &UploadedImage, outcome: &Outcome) -> String {
    let mut out = String::new();
    out.push_str("\nIdentification Result\n");
    out.push_str("=====================\n");
    out.push_str(&format!("File:            {}\n", image.file_name()));
    if let Some((w, h)) = image.dimensions() {
        out.push_str(&format!("Size:            {}x{} px\n", w, h));
    }

    if let Some(result) = outcome.result() {
        let digit = result.digit.map(String::from).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("Digit:           {}\n", digit));
        out.push_str(&format!("Confidence:      {}\n", result.confidence));
        out.push_str(&format!("Model response:  {}\n", result.raw_response));
    }

    if let Some(message) = outcome.message() {
        out.push_str(&format!("\n{}\n", message));
    }

    out
}

pub fn output_outcome(
    output_format: OutputFormat,
    image: &UploadedImage,
    outcome: &Outcome,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", render_json(image, outcome)?);
    } else {
        print!("{}", render_table(image, outcome));
    }

    Ok(())
}

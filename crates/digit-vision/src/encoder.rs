//! Base64 payload encoding

use crate::intake::UploadedImage;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Read the image as a `data:<mime>;base64,<payload>` URL
pub fn read_as_data_url(image: &UploadedImage) -> String {
    format!("data:{};base64,{}", image.mime_type(), STANDARD.encode(image.bytes()))
}

/// Everything after the first comma of a data URL.
///
/// Strings without a comma are returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

/// Base64 payload for transmission, without the data-URL header
pub fn encode_base64(image: &UploadedImage) -> String {
    let data_url = read_as_data_url(image);
    strip_data_url_prefix(&data_url).to_string()
}

//! Decoding of base64 `data:` URIs submitted for recipe images and avatars.

use crate::error::ImageError;
use base64::Engine;
use image::ImageFormat;

/// Allowed image formats for recipe images and avatars.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum decoded size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// A validated image ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Content type detected from the bytes (e.g. "image/png").
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Decode `data:image/<ext>;base64,<payload>`.
///
/// The declared subtype is ignored; the format is detected from the bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, ImageError> {
    let rest = uri.trim().strip_prefix("data:image/").ok_or(ImageError::NotDataUri)?;
    let (_, payload) = rest.split_once(";base64,").ok_or(ImageError::NotDataUri)?;

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| ImageError::InvalidBase64)?;

    let content_type = validate_image(&data)?;

    Ok(DecodedImage { content_type, data })
}

/// Check size and format, returning the detected content type.
pub fn validate_image(data: &[u8]) -> Result<String, ImageError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge { max: MAX_FILE_SIZE });
    }

    let format = image::guess_format(data).map_err(|_| ImageError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::UnsupportedFormat(format!("{:?}", format)));
    }

    Ok(format.to_mime_type().to_string())
}

//! Provides PNG data-URI encoding for captured frames.
//!
//! Captured pixels leave the crate as `data:image/png;base64,...` strings,
//! the format the hosting surface consumes directly. The reverse decode is
//! used by the download path to recover raw PNG bytes.

use base64::Engine;
use thiserror::Error;

/// The prefix every thumbnail produced by this crate starts with.
///
/// # Examples
/// ```
/// assert!(modelshot::PNG_DATA_URI_PREFIX.starts_with("data:image/png"));
/// ```
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// An encoded thumbnail payload: a PNG image as a base64 data URI.
///
/// # Examples
/// ```
/// use modelshot::encode::encode_rgba;
///
/// let thumbnail = encode_rgba(&[255, 255, 255, 255], 1, 1).unwrap();
/// assert!(thumbnail.as_str().starts_with(modelshot::PNG_DATA_URI_PREFIX));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail(String);

impl Thumbnail {
    /// Wraps an already-encoded data-URI string.
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Thumbnail(data_uri.into())
    }

    /// Returns the data-URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the thumbnail, returning the data-URI string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the payload back into raw PNG bytes.
    ///
    /// Returns `None` if the payload is not a data URI or the base64 body
    /// is corrupt.
    pub fn decode(&self) -> Option<Vec<u8>> {
        decode_data_uri(&self.0)
    }
}

/// Errors that can occur while encoding a frame.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The pixel buffer length does not match the stated dimensions.
    #[error("pixel buffer does not match {width}x{height} RGBA")]
    BadDimensions {
        /// Stated frame width in pixels.
        width: u32,
        /// Stated frame height in pixels.
        height: u32,
    },
    /// The PNG encoder rejected the frame.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Encodes an RGBA pixel buffer as a PNG data URI.
///
/// # Errors
/// Returns an error if the buffer length does not match the dimensions or
/// PNG encoding fails.
///
/// # Examples
/// ```
/// use modelshot::encode::encode_rgba;
///
/// let pixels = vec![0u8; 4 * 4 * 4];
/// let thumbnail = encode_rgba(&pixels, 4, 4).unwrap();
/// assert!(thumbnail.as_str().starts_with("data:image/png;base64,"));
/// ```
pub fn encode_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Thumbnail, EncodeError> {
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, pixels.to_vec())
            .ok_or(EncodeError::BadDimensions { width, height })?;

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(buffer.into_inner());
    Ok(Thumbnail(format!("{}{}", PNG_DATA_URI_PREFIX, encoded)))
}

/// Decodes the base64 body of a data URI.
///
/// Returns `None` if the source is empty, not a data URI, or decoding fails.
///
/// # Examples
/// ```
/// use modelshot::encode::decode_data_uri;
///
/// assert!(decode_data_uri("https://example.com/image.png").is_none());
/// ```
pub fn decode_data_uri(source: &str) -> Option<Vec<u8>> {
    if source.is_empty() || !source.starts_with("data:") {
        return None;
    }

    let comma_pos = source.find(',')?;
    let encoded = &source[(comma_pos + 1)..];

    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_starts_with_prefix() {
        let thumbnail = encode_rgba(&[255, 0, 0, 255], 1, 1).unwrap();
        assert!(thumbnail.as_str().starts_with(PNG_DATA_URI_PREFIX));
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let thumbnail = encode_rgba(&[255, 255, 255, 255], 1, 1).unwrap();

        let png = thumbnail.decode().expect("decode returned None");
        let img = image::load_from_memory(&png).expect("PNG did not parse");

        use image::GenericImageView;
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.to_rgba8().into_raw(), vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_encode_rejects_mismatched_dimensions() {
        let result = encode_rgba(&[0u8; 4], 2, 2);
        assert!(matches!(
            result,
            Err(EncodeError::BadDimensions { width: 2, height: 2 })
        ));
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        assert!(decode_data_uri("").is_none());
        assert!(decode_data_uri("https://example.com/image.png").is_none());
        assert!(decode_data_uri("file:///path/to/image.png").is_none());
    }

    #[test]
    fn test_decode_rejects_corrupt_base64() {
        assert!(decode_data_uri("data:image/png;base64,!!!not base64!!!").is_none());
    }
}

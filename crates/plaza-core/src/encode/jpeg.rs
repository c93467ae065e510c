//! JPEG re-encoding for compressed uploads.
//!
//! Compressed tiers are always stored as baseline JPEG, whatever the upload's
//! original container was.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Convert a `[0, 1]` quality factor to the encoder's 1-100 scale.
///
/// `0.7` becomes `70`. Out-of-range and NaN factors are clamped.
pub fn quality_from_factor(factor: f32) -> u8 {
    if factor.is_nan() {
        return 1;
    }
    (factor * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero side and
/// `EncodeError::InvalidPixelData` when the buffer length is wrong.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_factor() {
        assert_eq!(quality_from_factor(0.7), 70);
        assert_eq!(quality_from_factor(0.8), 80);
        assert_eq!(quality_from_factor(1.0), 100);
        assert_eq!(quality_from_factor(0.0), 1);
        assert_eq!(quality_from_factor(-3.0), 1);
        assert_eq!(quality_from_factor(7.0), 100);
        assert_eq!(quality_from_factor(f32::NAN), 1);
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 70).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3];
        let result = encode_jpeg(&pixels, 100, 100, 80);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let result = encode_jpeg(&[], 0, 100, 80);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_lower_quality_is_smaller_for_detailed_image() {
        let img = crate::test_support::gradient_image(120, 80);
        let heavy = encode_jpeg(&img.pixels, 120, 80, quality_from_factor(0.7)).unwrap();
        let near_lossless = encode_jpeg(&img.pixels, 120, 80, 100).unwrap();
        assert!(heavy.len() < near_lossless.len());
    }
}

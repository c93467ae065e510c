//! Image resizing against a maximum edge.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero, and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Scale an image so that it fits `max_edge` on its constraining side.
///
/// The scale factor is `min(max_edge / width, max_edge / height)` applied to
/// both axes, so aspect ratio is preserved. The factor is not clamped to 1:
/// an image smaller than `max_edge` on both sides is enlarged until one side
/// reaches `max_edge`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_edge` is zero or the image
/// is empty.
pub fn scale_to_max_edge(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 || image.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = scaled_dimensions(image.width, image.height, max_edge);
    resize(image, width, height, filter)
}

/// Compute the output dimensions for [`scale_to_max_edge`].
///
/// Each side is rounded to the nearest pixel and kept at least 1 pixel wide.
/// Zero-sized input yields `(0, 0)`.
pub fn scaled_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let max_edge = f64::from(max_edge);
    let ratio = (max_edge / f64::from(width)).min(max_edge / f64::from(height));

    let scale = |side: u32| ((f64::from(side) * ratio).round() as u32).max(1);
    (scale(width), scale(height))
}

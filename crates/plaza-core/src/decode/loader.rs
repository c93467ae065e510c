//! Container-agnostic decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Identify the image container from its magic bytes.
///
/// No pixel data is touched, so this is cheap enough to run on every upload.
/// Only formats that both this crate and a browser can display are accepted.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes carry no known signature,
/// `DecodeError::UnsupportedFormat` for a known container outside JPEG, PNG,
/// GIF and WebP.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP => Ok(format),
        other => Err(DecodeError::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// Browsers honour EXIF orientation when loading an image onto a canvas, so
/// the decoded pixels are returned upright. Alpha is dropped; the result is
/// always RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the container is not recognized,
/// `DecodeError::UnsupportedFormat` if no decoder is compiled in for it, and
/// `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format = sniff_format(bytes)?;
    let orientation = get_orientation(bytes);

    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat(format!("{format:?}")),
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

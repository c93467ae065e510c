//! Fixture builders shared by the unit tests.
//!
//! Upload tiers depend on byte size, not on pixel count, so fixtures are
//! small PNGs padded with a private ancillary chunk up to an exact length.
//! Decoders skip such chunks, which keeps the file displayable. JPEG fixtures
//! get an EXIF APP1 segment and, when a size is needed, COM segments.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::decode::DecodedImage;
use crate::encode::encode_jpeg;

const PNG_SIGNATURE_LEN: usize = 8;
/// Length of the IHDR chunk including length, type and CRC fields.
const IHDR_CHUNK_LEN: usize = 25;
/// Length, type and CRC fields around a chunk's data.
const CHUNK_OVERHEAD: usize = 12;
const PADDING_CHUNK_TYPE: &[u8; 4] = b"paDd";

const JPEG_SOI_LEN: usize = 2;
/// Marker and length fields of a JPEG segment.
const SEGMENT_OVERHEAD: usize = 4;
const MAX_SEGMENT_LEN: usize = SEGMENT_OVERHEAD + u16::MAX as usize - 2;

pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            128,
        ])
    })
}

pub fn gradient_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::from_rgb_image(gradient_rgb(width, height))
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    PngEncoder::new_with_quality(
        Cursor::new(&mut bytes),
        CompressionType::Default,
        FilterType::Adaptive,
    )
    .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
    .expect("in-memory PNG encode");
    bytes
}

/// Grow a PNG to exactly `target_len` bytes with a padding chunk after IHDR.
pub fn pad_png(png: &[u8], target_len: usize) -> Vec<u8> {
    let insert_at = PNG_SIGNATURE_LEN + IHDR_CHUNK_LEN;
    assert!(
        target_len >= png.len() + CHUNK_OVERHEAD,
        "PNG of {} bytes cannot be padded to {}",
        png.len(),
        target_len
    );
    let data_len = target_len - png.len() - CHUNK_OVERHEAD;

    let mut chunk = Vec::with_capacity(data_len + CHUNK_OVERHEAD);
    chunk.extend_from_slice(&(data_len as u32).to_be_bytes());
    chunk.extend_from_slice(PADDING_CHUNK_TYPE);
    chunk.resize(chunk.len() + data_len, 0);
    let crc = crc32(&chunk[4..]);
    chunk.extend_from_slice(&crc.to_be_bytes());

    let mut out = Vec::with_capacity(target_len);
    out.extend_from_slice(&png[..insert_at]);
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[insert_at..]);
    debug_assert_eq!(out.len(), target_len);
    out
}

/// A decodable gradient PNG of `width`x`height` that is exactly `size_bytes` long.
pub fn png_of_size(width: u32, height: u32, size_bytes: usize) -> Vec<u8> {
    pad_png(&encode_png(&gradient_rgb(width, height)), size_bytes)
}

/// A baseline JPEG of `img` whose EXIF block carries the given orientation tag.
pub fn jpeg_with_orientation(img: &RgbImage, orientation: u16) -> Vec<u8> {
    let jpeg = encode_jpeg(img.as_raw(), img.width(), img.height(), 90)
        .expect("in-memory JPEG encode");

    // Big-endian TIFF header, one IFD entry: Orientation (0x0112), SHORT, count 1.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\0\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut out = Vec::with_capacity(jpeg.len() + app1.len());
    out.extend_from_slice(&jpeg[..JPEG_SOI_LEN]);
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[JPEG_SOI_LEN..]);
    out
}

/// Grow a JPEG to exactly `target_len` bytes with comment segments after SOI.
pub fn pad_jpeg(jpeg: &[u8], target_len: usize) -> Vec<u8> {
    let mut remaining = target_len
        .checked_sub(jpeg.len())
        .expect("JPEG is already larger than the target");
    assert!(
        remaining == 0 || remaining >= SEGMENT_OVERHEAD,
        "cannot pad a JPEG by {remaining} bytes"
    );

    let mut out = Vec::with_capacity(target_len);
    out.extend_from_slice(&jpeg[..JPEG_SOI_LEN]);
    while remaining > 0 {
        let mut segment_len = remaining.min(MAX_SEGMENT_LEN);
        if remaining - segment_len > 0 && remaining - segment_len < SEGMENT_OVERHEAD {
            segment_len -= SEGMENT_OVERHEAD;
        }
        out.extend_from_slice(&[0xFF, 0xFE]);
        out.extend_from_slice(&((segment_len - 2) as u16).to_be_bytes());
        out.resize(out.len() + segment_len - SEGMENT_OVERHEAD, 0);
        remaining -= segment_len;
    }
    out.extend_from_slice(&jpeg[JPEG_SOI_LEN..]);
    debug_assert_eq!(out.len(), target_len);
    out
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

#[test]
fn crc32_matches_reference_value() {
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    assert_eq!(crc32(b"IEND"), 0xAE42_6082);
}

#[test]
fn padded_png_keeps_size_and_decodes() {
    let png = png_of_size(16, 8, 4096);
    assert_eq!(png.len(), 4096);

    let img = crate::decode::decode_image(&png).unwrap();
    assert_eq!((img.width, img.height), (16, 8));
}

#[test]
fn padded_jpeg_keeps_size_orientation_and_decodes() {
    let jpeg = jpeg_with_orientation(&gradient_rgb(20, 10), 6);
    let padded = pad_jpeg(&jpeg, 200_000);
    assert_eq!(padded.len(), 200_000);

    assert_eq!(
        crate::decode::get_orientation(&padded),
        crate::decode::Orientation::Rotate90CW
    );
    let img = crate::decode::decode_image(&padded).unwrap();
    assert_eq!((img.width, img.height), (10, 20));
}

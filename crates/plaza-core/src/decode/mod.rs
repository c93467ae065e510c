//! Image decoding for the ingestion pipeline.
//!
//! This module provides functionality for:
//! - Recognizing an upload's container from its magic bytes
//! - Decoding JPEG, PNG, GIF and WebP uploads to RGB with EXIF orientation applied
//! - Scaling decoded images against a maximum edge
//!
//! # Architecture
//!
//! All operations are synchronous and allocate only owned buffers, so every
//! intermediate image is released when the calling function returns, on
//! success and error paths alike.

mod loader;
mod resize;
mod types;

pub use loader::{decode_image, get_orientation, sniff_format};
pub use resize::{resize, scale_to_max_edge, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, ImageFile, Orientation};

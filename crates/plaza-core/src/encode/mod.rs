//! Encoding for stored gallery images.
//!
//! This module provides functionality for:
//! - Encoding RGB pixels to JPEG with a configurable quality
//! - Wrapping encoded bytes into self-describing `data:` URL payloads

mod data_url;
mod jpeg;

pub use data_url::{to_data_url, DataUrl, DataUrlError};
pub use jpeg::{encode_jpeg, quality_from_factor, EncodeError};

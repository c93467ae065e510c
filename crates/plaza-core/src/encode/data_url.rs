//! `data:` URL payloads.
//!
//! A stored gallery image is a single string of the form
//! `data:<media type>;base64,<body>`, which any browser can render directly
//! from an `<img src>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("Payload does not start with `data:`")]
    MissingScheme,

    #[error("Payload has no `,` separating header and body")]
    MissingSeparator,

    #[error("Payload body is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Format a payload string from a media type and raw bytes.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("{SCHEME}{mime_type}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

/// A parsed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Parse a base64 `data:` URL back into its media type and bytes.
    ///
    /// # Errors
    ///
    /// Fails on a missing scheme or separator, a non-base64 body, or
    /// malformed base64.
    pub fn parse(url: &str) -> Result<Self, DataUrlError> {
        let rest = url.strip_prefix(SCHEME).ok_or(DataUrlError::MissingScheme)?;
        let (header, body) = rest.split_once(',').ok_or(DataUrlError::MissingSeparator)?;
        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(DataUrlError::NotBase64)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: STANDARD.decode(body)?,
        })
    }
}

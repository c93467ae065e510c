//! The ingest operation: validate, classify, compress, encode.

use thiserror::Error;
use tracing::{debug, warn};

use super::policy::{IngestPolicy, TierSettings};
use super::tier::{classify, original_size_kb, CompressionTier};
use crate::decode::{
    decode_image, scale_to_max_edge, sniff_format, DecodeError, FilterType, ImageFile,
};
use crate::encode::{encode_jpeg, quality_from_factor, to_data_url, EncodeError};

const JPEG_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File is {size_bytes} bytes; uploads are limited to {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("Only image files can be uploaded (got `{0}`)")]
    UnsupportedMimeType(String),

    #[error("Could not read image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),
}

impl IngestError {
    /// Whether choosing a different file fixes the problem.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, IngestError::FileTooLarge { .. } | IngestError::Decode(_))
    }
}

/// A stored-ready image and the metadata recorded alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// `data:` URL holding the stored image.
    pub payload: String,
    /// Size of the upload as received, not of the payload.
    pub original_size_kb: u64,
    pub tier: CompressionTier,
    /// Output dimensions for re-encoded tiers; `None` when stored as uploaded.
    pub dimensions: Option<(u32, u32)>,
}

/// Ingest an upload with the default tier table.
pub fn ingest(file: &ImageFile) -> Result<EncodedImage, IngestError> {
    ingest_with_policy(file, &IngestPolicy::default())
}

/// Ingest an upload with an explicit policy.
///
/// Oversized files are rejected before any bytes are inspected. Small files
/// are stored as uploaded, larger ones are decoded, scaled against the tier's
/// max edge and re-encoded as JPEG.
///
/// # Errors
///
/// `FileTooLarge` above the policy limit, `Decode` when the bytes are not a
/// readable image, `Encode` if JPEG encoding fails.
pub fn ingest_with_policy(
    file: &ImageFile,
    policy: &IngestPolicy,
) -> Result<EncodedImage, IngestError> {
    let size_bytes = file.size_bytes();
    let tier = classify(size_bytes, policy);
    debug!(size_bytes, tier = tier.as_str(), "classified upload");

    if tier == CompressionTier::Reject {
        warn!(size_bytes, limit_bytes = policy.max_bytes, "upload exceeds size limit");
        return Err(IngestError::FileTooLarge {
            size_bytes,
            limit_bytes: policy.max_bytes,
        });
    }

    let (payload, dimensions) = match policy.settings_for(tier) {
        Some(settings) => {
            let (payload, width, height) = recompress(file.bytes(), settings, policy.filter)
                .inspect_err(|e| warn!(size_bytes, error = %e, "failed to recompress upload"))?;
            (payload, Some((width, height)))
        }
        None => (passthrough(file)?, None),
    };

    debug!(payload_len = payload.len(), "encoded upload");
    Ok(EncodedImage {
        payload,
        original_size_kb: original_size_kb(size_bytes),
        tier,
        dimensions,
    })
}

/// Store the upload's own bytes, labelled with the sniffed media type.
///
/// The bytes are fully decoded first so a truncated or unreadable file is
/// rejected the same way it would be in the re-encoding tiers.
fn passthrough(file: &ImageFile) -> Result<String, IngestError> {
    let format = sniff_format(file.bytes())
        .and_then(|format| decode_image(file.bytes()).map(|_| format))
        .inspect_err(|e| {
            warn!(declared = file.mime_type(), error = %e, "upload is not a readable image")
        })?;

    let mime_type = format.to_mime_type();
    if !mime_type.eq_ignore_ascii_case(file.mime_type()) {
        debug!(
            declared = file.mime_type(),
            sniffed = mime_type,
            "declared type differs from content"
        );
    }
    Ok(to_data_url(mime_type, file.bytes()))
}

fn recompress(
    bytes: &[u8],
    settings: TierSettings,
    filter: FilterType,
) -> Result<(String, u32, u32), IngestError> {
    let scaled = {
        let decoded = decode_image(bytes)?;
        scale_to_max_edge(&decoded, settings.max_edge, filter)?
    };
    debug!(width = scaled.width, height = scaled.height, "scaled upload");

    let jpeg = encode_jpeg(
        &scaled.pixels,
        scaled.width,
        scaled.height,
        quality_from_factor(settings.quality),
    )?;
    Ok((to_data_url(JPEG_MIME, &jpeg), scaled.width, scaled.height))
}

//! Size-based tier selection.

use serde::{Deserialize, Serialize};

use super::policy::{IngestPolicy, TierSettings, KIB};

/// Compression policy chosen for an upload from its byte size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionTier {
    /// Above the upload limit; nothing is decoded or stored.
    Reject,
    /// Strong downscale and low quality re-encode.
    Heavy,
    /// Mild downscale and re-encode.
    Light,
    /// Stored as uploaded.
    None,
}

impl CompressionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionTier::Reject => "reject",
            CompressionTier::Heavy => "heavy",
            CompressionTier::Light => "light",
            CompressionTier::None => "none",
        }
    }
}

/// Pick the tier for an upload of `size_bytes`.
///
/// Thresholds are strict: a file exactly at a threshold falls into the
/// lower tier.
pub fn classify(size_bytes: u64, policy: &IngestPolicy) -> CompressionTier {
    if size_bytes > policy.max_bytes {
        CompressionTier::Reject
    } else if size_bytes > policy.heavy.above_bytes {
        CompressionTier::Heavy
    } else if size_bytes > policy.light.above_bytes {
        CompressionTier::Light
    } else {
        CompressionTier::None
    }
}

impl IngestPolicy {
    /// Re-encode settings for a compressed tier.
    pub fn settings_for(&self, tier: CompressionTier) -> Option<TierSettings> {
        match tier {
            CompressionTier::Heavy => Some(self.heavy.settings),
            CompressionTier::Light => Some(self.light.settings),
            CompressionTier::Reject | CompressionTier::None => None,
        }
    }
}

/// Upload size in whole kilobytes, rounded half up.
pub fn original_size_kb(size_bytes: u64) -> u64 {
    (size_bytes + KIB / 2) / KIB
}

//! Size thresholds and compression settings for uploads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;

/// Hard ceiling on upload size.
pub const MAX_UPLOAD_BYTES: u64 = 5 * MIB;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Light threshold ({light}) must be below heavy threshold ({heavy})")]
    ThresholdOrder { light: u64, heavy: u64 },

    #[error("Heavy threshold ({heavy}) must not exceed the upload limit ({max})")]
    ThresholdAboveLimit { heavy: u64, max: u64 },

    #[error("Max edge must be non-zero")]
    ZeroMaxEdge,

    #[error("Quality factor {0} is outside (0, 1]")]
    QualityOutOfRange(f32),
}

/// How a compressed tier re-encodes an upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSettings {
    /// Longest edge of the re-encoded image, in pixels.
    pub max_edge: u32,
    /// Lossy quality factor in `(0, 1]`.
    pub quality: f32,
}

/// A compressed tier applies to uploads strictly larger than `above_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierThreshold {
    pub above_bytes: u64,
    pub settings: TierSettings,
}

/// Upload limits and tier table.
///
/// Deserializes with `#[serde(default)]`, so a partial configuration only
/// overrides the fields it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngestPolicy {
    /// Uploads larger than this are rejected outright.
    pub max_bytes: u64,
    pub heavy: TierThreshold,
    pub light: TierThreshold,
    pub filter: FilterType,
}

impl Default for IngestPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            heavy: TierThreshold {
                above_bytes: MIB,
                settings: TierSettings {
                    max_edge: 600,
                    quality: 0.7,
                },
            },
            light: TierThreshold {
                above_bytes: MIB / 2,
                settings: TierSettings {
                    max_edge: 800,
                    quality: 0.8,
                },
            },
            filter: FilterType::Bilinear,
        }
    }
}

impl IngestPolicy {
    /// Check that the tiers are ordered and their settings usable.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.light.above_bytes >= self.heavy.above_bytes {
            return Err(PolicyError::ThresholdOrder {
                light: self.light.above_bytes,
                heavy: self.heavy.above_bytes,
            });
        }
        if self.heavy.above_bytes > self.max_bytes {
            return Err(PolicyError::ThresholdAboveLimit {
                heavy: self.heavy.above_bytes,
                max: self.max_bytes,
            });
        }
        for settings in [self.heavy.settings, self.light.settings] {
            if settings.max_edge == 0 {
                return Err(PolicyError::ZeroMaxEdge);
            }
            if !(settings.quality > 0.0 && settings.quality <= 1.0) {
                return Err(PolicyError::QualityOutOfRange(settings.quality));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_table() {
        let policy = IngestPolicy::default();

        assert_eq!(policy.max_bytes, 5 * 1024 * 1024);
        assert_eq!(policy.heavy.above_bytes, 1024 * 1024);
        assert_eq!(policy.heavy.settings.max_edge, 600);
        assert_eq!(policy.heavy.settings.quality, 0.7);
        assert_eq!(policy.light.above_bytes, 512 * 1024);
        assert_eq!(policy.light.settings.max_edge, 800);
        assert_eq!(policy.light.settings.quality, 0.8);
        assert_eq!(policy.filter, FilterType::Bilinear);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut policy = IngestPolicy::default();
        policy.light.above_bytes = policy.heavy.above_bytes;

        assert!(matches!(
            policy.validate(),
            Err(PolicyError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_heavy_above_limit() {
        let mut policy = IngestPolicy::default();
        policy.max_bytes = MIB / 2 + 1;

        assert!(matches!(
            policy.validate(),
            Err(PolicyError::ThresholdAboveLimit { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut policy = IngestPolicy::default();
        policy.light.settings.max_edge = 0;
        assert_eq!(policy.validate(), Err(PolicyError::ZeroMaxEdge));

        let mut policy = IngestPolicy::default();
        policy.heavy.settings.quality = 1.5;
        assert_eq!(policy.validate(), Err(PolicyError::QualityOutOfRange(1.5)));

        let mut policy = IngestPolicy::default();
        policy.heavy.settings.quality = f32::NAN;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let policy: IngestPolicy =
            serde_json::from_str(r#"{ "maxBytes": 2097152, "filter": "lanczos3" }"#).unwrap();

        assert_eq!(policy.max_bytes, 2 * MIB);
        assert_eq!(policy.filter, FilterType::Lanczos3);
        assert_eq!(policy.heavy, IngestPolicy::default().heavy);
    }

    #[test]
    fn test_policy_json_shape() {
        let json = serde_json::to_value(IngestPolicy::default()).unwrap();
        assert_eq!(json["heavy"]["aboveBytes"], 1_048_576);
        assert_eq!(json["light"]["settings"]["maxEdge"], 800);
        assert_eq!(json["filter"], "bilinear");
    }
}

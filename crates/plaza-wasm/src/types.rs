//! WASM-compatible wrapper types for ingestion results and policy.
//!
//! JavaScript numbers cannot carry a `u64` without going through `BigInt`,
//! so byte and kilobyte counts cross the boundary as `f64`/`u32`.

use plaza_core::ingest::{EncodedImage, IngestPolicy};
use wasm_bindgen::prelude::*;

/// An ingested upload, ready to be written into a gallery post.
#[wasm_bindgen]
pub struct JsEncodedImage {
    payload: String,
    original_size_kb: u32,
    tier: &'static str,
    width: Option<u32>,
    height: Option<u32>,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// The `data:` URL to store in the post's `image` field.
    #[wasm_bindgen(getter)]
    pub fn payload(&self) -> String {
        self.payload.clone()
    }

    /// Upload size in KB before compression, for the post's `imageSize` field.
    #[wasm_bindgen(getter = originalSizeKB)]
    pub fn original_size_kb(&self) -> u32 {
        self.original_size_kb
    }

    /// `"heavy"`, `"light"` or `"none"`.
    #[wasm_bindgen(getter)]
    pub fn tier(&self) -> String {
        self.tier.to_string()
    }

    /// Output width, `undefined` when the upload was stored as is.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.height
    }
}

impl JsEncodedImage {
    pub(crate) fn from_encoded(encoded: EncodedImage) -> Self {
        let (width, height) = encoded.dimensions.unzip();
        Self {
            payload: encoded.payload,
            original_size_kb: u32::try_from(encoded.original_size_kb).unwrap_or(u32::MAX),
            tier: encoded.tier.as_str(),
            width,
            height,
        }
    }
}

/// Ingestion policy wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsIngestPolicy {
    inner: IngestPolicy,
}

#[wasm_bindgen]
impl JsIngestPolicy {
    /// The site's default tier table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: IngestPolicy::default(),
        }
    }

    /// Upload limit in bytes.
    #[wasm_bindgen(getter = maxBytes)]
    pub fn max_bytes(&self) -> f64 {
        self.inner.max_bytes as f64
    }

    /// Serialize to a plain object.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from a (possibly partial) plain object; missing fields take defaults.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(value: JsValue) -> Result<JsIngestPolicy, JsValue> {
        let inner: IngestPolicy = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid ingest policy: {}", e)))?;
        Self::from_policy(inner).map_err(|e| JsValue::from_str(&e))
    }
}

impl Default for JsIngestPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl JsIngestPolicy {
    pub(crate) fn from_policy(inner: IngestPolicy) -> Result<Self, String> {
        inner.validate().map_err(|e| e.to_string())?;
        Ok(Self { inner })
    }

    pub(crate) fn inner(&self) -> &IngestPolicy {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::CompressionTier;

    #[test]
    fn test_from_encoded_compressed() {
        let js = JsEncodedImage::from_encoded(EncodedImage {
            payload: "data:image/jpeg;base64,AAAA".to_string(),
            original_size_kb: 3072,
            tier: CompressionTier::Heavy,
            dimensions: Some((600, 300)),
        });

        assert_eq!(js.payload(), "data:image/jpeg;base64,AAAA");
        assert_eq!(js.original_size_kb(), 3072);
        assert_eq!(js.tier(), "heavy");
        assert_eq!(js.width(), Some(600));
        assert_eq!(js.height(), Some(300));
    }

    #[test]
    fn test_from_encoded_passthrough() {
        let js = JsEncodedImage::from_encoded(EncodedImage {
            payload: "data:image/png;base64,AAAA".to_string(),
            original_size_kb: 12,
            tier: CompressionTier::None,
            dimensions: None,
        });

        assert_eq!(js.tier(), "none");
        assert_eq!(js.width(), None);
        assert_eq!(js.height(), None);
    }

    #[test]
    fn test_policy_default_and_validation() {
        let policy = JsIngestPolicy::new();
        assert_eq!(policy.max_bytes(), 5.0 * 1024.0 * 1024.0);

        let mut bad = IngestPolicy::default();
        bad.light.above_bytes = bad.heavy.above_bytes + 1;
        assert!(JsIngestPolicy::from_policy(bad).is_err());
    }
}

//! Upload ingestion WASM bindings.
//!
//! The page reads the picked file into a `Uint8Array` and hands it over
//! together with the file's declared type:
//!
//! ```typescript
//! import { ingest_image, is_image_mime_type } from '@plaza/wasm';
//!
//! if (!is_image_mime_type(file.type)) throw new Error('images only');
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const encoded = ingest_image(bytes, file.type);
//! await addDoc(collection(db, 'galleryPosts'), {
//!   author, description,
//!   image: encoded.payload,
//!   imageSize: encoded.originalSizeKB,
//!   createdAt: new Date(),
//! });
//! ```

use crate::types::{JsEncodedImage, JsIngestPolicy};
use plaza_core::ingest::{self, IngestError, IngestPolicy};
use plaza_core::ImageFile;
use wasm_bindgen::prelude::*;

/// Ingest an upload with the default tier table.
///
/// # Errors
///
/// Rejects files over 5 MiB and bytes that are not a readable image; the
/// error message is suitable for showing to the user.
#[wasm_bindgen]
pub fn ingest_image(bytes: &[u8], mime_type: &str) -> Result<JsEncodedImage, JsValue> {
    run_ingest(bytes, mime_type, &IngestPolicy::default())
}

/// Ingest an upload with a custom policy.
#[wasm_bindgen]
pub fn ingest_image_with_policy(
    bytes: &[u8],
    mime_type: &str,
    policy: &JsIngestPolicy,
) -> Result<JsEncodedImage, JsValue> {
    run_ingest(bytes, mime_type, policy.inner())
}

/// Tier an upload of `size_bytes` would get: `"reject"`, `"heavy"`, `"light"` or `"none"`.
///
/// Lets the file picker warn about oversized files before reading them.
#[wasm_bindgen]
pub fn classify_tier(size_bytes: f64) -> String {
    tier_name(size_bytes, &IngestPolicy::default()).to_string()
}

/// Whether a declared type is an `image/*` media type.
#[wasm_bindgen]
pub fn is_image_mime_type(mime_type: &str) -> bool {
    ImageFile::new(Vec::new(), mime_type).has_image_mime_type()
}

fn tier_name(size_bytes: f64, policy: &IngestPolicy) -> &'static str {
    // Negative or NaN sizes saturate to zero.
    ingest::classify(size_bytes as u64, policy).as_str()
}

fn run_ingest(
    bytes: &[u8],
    mime_type: &str,
    policy: &IngestPolicy,
) -> Result<JsEncodedImage, JsValue> {
    let started = now_ms();
    let file = ImageFile::new(bytes.to_vec(), mime_type);

    match ingest::ingest_with_policy(&file, policy) {
        Ok(encoded) => {
            log(&format!(
                "ingested {} KB upload as {} in {:.0}ms",
                encoded.original_size_kb,
                encoded.tier.as_str(),
                now_ms() - started
            ));
            Ok(JsEncodedImage::from_encoded(encoded))
        }
        Err(err) => Err(to_js_error(&err)),
    }
}

fn to_js_error(err: &IngestError) -> JsValue {
    let message = err.to_string();
    warn(&message);
    JsValue::from_str(&message)
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

#[cfg(target_arch = "wasm32")]
fn log(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_message: &str) {}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

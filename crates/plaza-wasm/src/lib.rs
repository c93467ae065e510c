//! Plaza WASM - WebAssembly bindings for Plaza
//!
//! This crate exposes the plaza-core ingestion pipeline to the community
//! page, so gallery uploads are validated and compressed in the browser
//! before the page writes them to the document store.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for ingestion results and policy
//! - `ingest` - Upload ingestion bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { ingest_image } from '@plaza/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const encoded = ingest_image(bytes, file.type);
//! console.log(`${encoded.tier}: ${encoded.originalSizeKB} KB uploaded`);
//! ```

use wasm_bindgen::prelude::*;

mod ingest;
mod types;

pub use ingest::{classify_tier, ingest_image, ingest_image_with_policy, is_image_mime_type};
pub use types::{JsEncodedImage, JsIngestPolicy};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

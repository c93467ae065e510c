//! Plaza Core - image ingestion and content services
//!
//! This crate provides the pieces of the community site that are more than
//! display logic: turning uploaded photos into storable payloads, and the
//! content operations that sit on top of the document store.
//!
//! # Module Structure
//!
//! - `decode` - Recognize and decode uploads, scale against a max edge
//! - `encode` - JPEG re-encoding and `data:` URL payloads
//! - `ingest` - Size-tiered compression of gallery uploads
//! - `store` - Document store contract and an in-memory implementation
//! - `community` - Statements, news, practice records and gallery posts

pub mod community;
pub mod decode;
pub mod encode;
pub mod ingest;
pub mod store;

#[cfg(test)]
mod test_support;

pub use decode::ImageFile;
pub use ingest::{
    ingest, ingest_with_policy, CompressionTier, EncodedImage, IngestError, IngestPolicy,
};

//! Upload ingestion for gallery posts.
//!
//! Turns an uploaded file into a `data:` URL payload suitable for storing as
//! a single document field, choosing how hard to compress from the upload's
//! byte size:
//!
//! | Upload size | Tier | Action |
//! |---|---|---|
//! | > 5 MiB | Reject | `FileTooLarge`, nothing decoded |
//! | > 1 MiB | Heavy | scale to max edge 600, JPEG quality 0.7 |
//! | > 0.5 MiB | Light | scale to max edge 800, JPEG quality 0.8 |
//! | otherwise | None | stored as uploaded |
//!
//! The recorded original size always describes the upload, never the payload.
//! Ingestion is a pure function of the input bytes and the policy; calls
//! share no state and can run concurrently.

mod pipeline;
mod policy;
mod tier;

pub use pipeline::{ingest, ingest_with_policy, EncodedImage, IngestError};
pub use policy::{
    IngestPolicy, PolicyError, TierSettings, TierThreshold, KIB, MAX_UPLOAD_BYTES, MIB,
};
pub use tier::{classify, original_size_kb, CompressionTier};

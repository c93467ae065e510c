//! Content services behind the community page.
//!
//! Vision and mission statements, the news feed, practice records and the
//! photo gallery, all kept in a [`DocumentStore`](crate::store::DocumentStore).
//! Edits to the statements and the news feed need [`Access::Admin`]; anyone
//! can write a practice record or a gallery post.

mod records;
mod service;

use thiserror::Error;

use crate::ingest::IngestError;
use crate::store::StoreError;

pub use records::{GalleryPost, NewsItem, PracticeRecord, Statement};
pub use service::Community;

/// Who is making a request. Supplied by the caller on every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Visitor,
    Admin,
}

impl Access {
    pub fn require_admin(self) -> Result<(), ServiceError> {
        match self {
            Access::Admin => Ok(()),
            Access::Visitor => Err(ServiceError::Forbidden),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("This action requires admin access")]
    Forbidden,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Typed views over the site's collections.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, StoredDocument};

pub const VISION: &str = "vision";
pub const MISSION: &str = "mission";
pub const NEWS: &str = "news";
pub const PRACTICE_RECORDS: &str = "practiceRecords";
pub const GALLERY_POSTS: &str = "galleryPosts";

/// Which single-document statement collection to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Vision,
    Mission,
}

impl Statement {
    pub fn collection(self) -> &'static str {
        match self {
            Statement::Vision => VISION,
            Statement::Mission => MISSION,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatementFields {
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NewsFields {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PracticeFields {
    pub author: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GalleryFields {
    pub author: String,
    pub description: String,
    /// `data:` URL payload.
    pub image: String,
    /// Upload size in KB before compression.
    pub image_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRecord {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPost {
    pub id: String,
    pub author: String,
    pub description: String,
    pub image: String,
    pub original_size_kb: u64,
    pub created_at: DateTime<Utc>,
}

impl PracticeRecord {
    /// Calendar day the record was written (UTC).
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl GalleryPost {
    /// Calendar day the post was written (UTC).
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl TryFrom<StoredDocument> for NewsItem {
    type Error = StoreError;

    fn try_from(doc: StoredDocument) -> Result<Self, Self::Error> {
        let fields: NewsFields = doc.decode()?;
        Ok(Self {
            id: doc.id,
            content: fields.content,
            created_at: doc.created_at,
        })
    }
}

impl TryFrom<StoredDocument> for PracticeRecord {
    type Error = StoreError;

    fn try_from(doc: StoredDocument) -> Result<Self, Self::Error> {
        let fields: PracticeFields = doc.decode()?;
        Ok(Self {
            id: doc.id,
            author: fields.author,
            content: fields.content,
            created_at: doc.created_at,
        })
    }
}

impl TryFrom<StoredDocument> for GalleryPost {
    type Error = StoreError;

    fn try_from(doc: StoredDocument) -> Result<Self, Self::Error> {
        let fields: GalleryFields = doc.decode()?;
        Ok(Self {
            id: doc.id,
            author: fields.author,
            description: fields.description,
            image: fields.image,
            original_size_kb: fields.image_size,
            created_at: doc.created_at,
        })
    }
}

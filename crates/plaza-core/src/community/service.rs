use chrono::Utc;
use tracing::info;

use super::records::{
    GalleryFields, GalleryPost, NewsFields, NewsItem, PracticeFields, PracticeRecord, Statement,
    StatementFields, GALLERY_POSTS, NEWS, PRACTICE_RECORDS,
};
use super::{Access, ServiceError};
use crate::decode::ImageFile;
use crate::ingest::{ingest_with_policy, IngestError, IngestPolicy};
use crate::store::{to_document, DocumentStore, StoreError, StoredDocument};

/// The site's content operations over a document store.
pub struct Community<S> {
    store: S,
    policy: IngestPolicy,
}

impl<S: DocumentStore> Community<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, IngestPolicy::default())
    }

    pub fn with_policy(store: S, policy: IngestPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current statement text, if one was ever saved.
    pub fn statement(&self, which: Statement) -> Result<Option<String>, ServiceError> {
        let docs = self.store.list(which.collection())?;
        match docs.first() {
            Some(doc) => Ok(Some(doc.decode::<StatementFields>()?.content)),
            None => Ok(None),
        }
    }

    /// Replace the statement text, creating its document on first save.
    pub fn save_statement(
        &self,
        access: Access,
        which: Statement,
        content: &str,
    ) -> Result<(), ServiceError> {
        access.require_admin()?;
        let fields = to_document(&StatementFields {
            content: content.to_string(),
            updated_at: Utc::now(),
        })?;

        let collection = which.collection();
        match self.store.list(collection)?.first() {
            Some(doc) => self.store.update(collection, &doc.id, fields)?,
            None => {
                self.store.create(collection, fields)?;
            }
        }
        info!(collection, "saved statement");
        Ok(())
    }

    pub fn vision(&self) -> Result<Option<String>, ServiceError> {
        self.statement(Statement::Vision)
    }

    pub fn save_vision(&self, access: Access, content: &str) -> Result<(), ServiceError> {
        self.save_statement(access, Statement::Vision, content)
    }

    pub fn mission(&self) -> Result<Option<String>, ServiceError> {
        self.statement(Statement::Mission)
    }

    pub fn save_mission(&self, access: Access, content: &str) -> Result<(), ServiceError> {
        self.save_statement(access, Statement::Mission, content)
    }

    /// News items, newest first.
    pub fn news(&self) -> Result<Vec<NewsItem>, ServiceError> {
        Ok(newest_first(self.store.list(NEWS)?)?)
    }

    pub fn add_news(&self, access: Access, content: &str) -> Result<NewsItem, ServiceError> {
        access.require_admin()?;
        let content = required("content", content)?;

        let doc = self.store.create(NEWS, to_document(&NewsFields { content })?)?;
        info!(id = %doc.id, "added news item");
        Ok(NewsItem::try_from(doc)?)
    }

    pub fn delete_news(&self, access: Access, id: &str) -> Result<(), ServiceError> {
        access.require_admin()?;
        self.store.delete(NEWS, id)?;
        info!(id, "deleted news item");
        Ok(())
    }

    /// Practice records, newest first.
    pub fn practice_records(&self) -> Result<Vec<PracticeRecord>, ServiceError> {
        Ok(newest_first(self.store.list(PRACTICE_RECORDS)?)?)
    }

    pub fn add_practice_record(
        &self,
        author: &str,
        content: &str,
    ) -> Result<PracticeRecord, ServiceError> {
        let fields = PracticeFields {
            author: required("author", author)?,
            content: required("content", content)?,
        };

        let doc = self.store.create(PRACTICE_RECORDS, to_document(&fields)?)?;
        info!(id = %doc.id, "added practice record");
        Ok(PracticeRecord::try_from(doc)?)
    }

    /// Gallery posts, newest first.
    pub fn gallery_posts(&self) -> Result<Vec<GalleryPost>, ServiceError> {
        Ok(newest_first(self.store.list(GALLERY_POSTS)?)?)
    }

    /// Ingest the upload and store it as a gallery post.
    ///
    /// Nothing is written unless ingestion succeeds.
    pub fn add_gallery_post(
        &self,
        author: &str,
        description: &str,
        file: &ImageFile,
    ) -> Result<GalleryPost, ServiceError> {
        let author = required("author", author)?;
        let description = required("description", description)?;
        if !file.has_image_mime_type() {
            return Err(IngestError::UnsupportedMimeType(file.mime_type().to_string()).into());
        }

        let encoded = ingest_with_policy(file, &self.policy)?;
        let fields = GalleryFields {
            author,
            description,
            image: encoded.payload,
            image_size: encoded.original_size_kb,
        };

        let doc = self.store.create(GALLERY_POSTS, to_document(&fields)?)?;
        info!(
            id = %doc.id,
            tier = encoded.tier.as_str(),
            original_size_kb = encoded.original_size_kb,
            "added gallery post"
        );
        Ok(GalleryPost::try_from(doc)?)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Order by creation time, latest first; ties keep the later insertion first.
fn newest_first<T>(mut docs: Vec<StoredDocument>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<StoredDocument, Error = StoreError>,
{
    docs.reverse();
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    docs.into_iter().map(T::try_from).collect()
}

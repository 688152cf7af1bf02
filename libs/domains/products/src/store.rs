//! Minimal document-store seam used by the persistence gateway.
//!
//! Each operation is a single round-trip. "No matching document" is reported as
//! `Ok(None)`, never as an error.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{Bson, Document},
    Collection,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error("store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return the identifier the store assigned.
    async fn insert_one(&self, document: Document) -> StoreResult<Bson>;

    async fn find_many(&self, filter: Document) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>>;

    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: Document,
    ) -> StoreResult<Option<Document>>;

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> StoreResult<Option<Document>>;

    async fn find_one_and_delete(&self, filter: Document) -> StoreResult<Option<Document>>;
}

#[async_trait]
impl DocumentStore for Collection<Document> {
    async fn insert_one(&self, document: Document) -> StoreResult<Bson> {
        let result = Collection::insert_one(self, document).await?;
        Ok(result.inserted_id)
    }

    async fn find_many(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(Collection::find_one(self, filter).await?)
    }

    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: Document,
    ) -> StoreResult<Option<Document>> {
        Ok(Collection::find_one_and_replace(self, filter, replacement).await?)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> StoreResult<Option<Document>> {
        Ok(Collection::find_one_and_update(self, filter, update).await?)
    }

    async fn find_one_and_delete(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(Collection::find_one_and_delete(self, filter).await?)
    }
}

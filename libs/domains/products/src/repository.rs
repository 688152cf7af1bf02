use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::context::OperationContext;
use crate::error::ProductResult;
use crate::models::Product;

/// Persistence gateway for products
///
/// Identifier-taking operations validate the identifier before touching the
/// store and fail with `BadRequest` on malformed input. A missing document is
/// always `NotFound`; every other store failure is `Internal`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product, returning the store-assigned identifier
    async fn create(&self, ctx: &OperationContext, document: Document) -> ProductResult<ObjectId>;

    /// Every stored product; an empty collection is `NotFound`
    async fn find_all(&self, ctx: &OperationContext) -> ProductResult<Vec<Product>>;

    async fn find_one(&self, ctx: &OperationContext, id: &str) -> ProductResult<Product>;

    /// Replace the whole stored document
    async fn fully_replace(
        &self,
        ctx: &OperationContext,
        id: &str,
        document: Document,
    ) -> ProductResult<()>;

    /// Merge the given fields into the stored document
    async fn partially_update(
        &self,
        ctx: &OperationContext,
        id: &str,
        document: Document,
    ) -> ProductResult<()>;

    async fn delete(&self, ctx: &OperationContext, id: &str) -> ProductResult<()>;
}

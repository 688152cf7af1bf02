//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, Bson, Document},
    Collection, Database,
};
use tracing::instrument;

use crate::context::OperationContext;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDocument};
use crate::object_id::{self, id_filter};
use crate::repository::ProductRepository;
use crate::store::DocumentStore;

pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
///
/// Generic over the store so the translation rules can be exercised without a
/// running server; production uses `Collection<Document>`.
pub struct MongoProductRepository<S: DocumentStore = Collection<Document>> {
    store: S,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            store: db.collection::<Document>(collection_name),
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.store
    }
}

impl<S: DocumentStore> MongoProductRepository<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }
}

fn decode_product(document: Document) -> ProductResult<Product> {
    let stored: ProductDocument = from_document(document)?;
    Ok(stored.into())
}

fn not_found(id: ObjectId) -> ProductError {
    ProductError::not_found(format!("product {} not found", id.to_hex()))
}

#[async_trait]
impl<S: DocumentStore> ProductRepository for MongoProductRepository<S> {
    #[instrument(skip(self, ctx, document))]
    async fn create(&self, ctx: &OperationContext, document: Document) -> ProductResult<ObjectId> {
        let inserted = ctx
            .run(|| self.store.insert_one(document))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to insert product"))?;

        match inserted {
            Bson::ObjectId(id) => {
                tracing::info!(product_id = %id, "Product created");
                Ok(id)
            }
            other => {
                tracing::error!(inserted_id = %other, "Inserted id is not an ObjectId");
                Err(ProductError::bad_request(
                    "failed to extract identifier of inserted product",
                ))
            }
        }
    }

    #[instrument(skip(self, ctx))]
    async fn find_all(&self, ctx: &OperationContext) -> ProductResult<Vec<Product>> {
        let documents = ctx
            .run(|| self.store.find_many(doc! {}))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list products"))?;

        if documents.is_empty() {
            return Err(ProductError::not_found("no products stored"));
        }

        documents.into_iter().map(decode_product).collect()
    }

    #[instrument(skip(self, ctx))]
    async fn find_one(&self, ctx: &OperationContext, id: &str) -> ProductResult<Product> {
        let oid = object_id::decode(id)?;

        let document = ctx
            .run(|| self.store.find_one(id_filter(oid)))
            .await
            .inspect_err(|e| tracing::error!(product_id = %oid, error = %e, "Failed to fetch product"))?
            .ok_or_else(|| not_found(oid))?;

        decode_product(document)
    }

    #[instrument(skip(self, ctx, document))]
    async fn fully_replace(
        &self,
        ctx: &OperationContext,
        id: &str,
        document: Document,
    ) -> ProductResult<()> {
        let oid = object_id::decode(id)?;

        ctx.run(|| self.store.find_one_and_replace(id_filter(oid), document))
            .await
            .inspect_err(|e| tracing::error!(product_id = %oid, error = %e, "Failed to replace product"))?
            .ok_or_else(|| not_found(oid))?;

        tracing::info!(product_id = %oid, "Product replaced");
        Ok(())
    }

    #[instrument(skip(self, ctx, document))]
    async fn partially_update(
        &self,
        ctx: &OperationContext,
        id: &str,
        document: Document,
    ) -> ProductResult<()> {
        let oid = object_id::decode(id)?;

        if document.is_empty() {
            return Err(ProductError::bad_request("no fields to update"));
        }

        ctx.run(|| {
            self.store
                .find_one_and_update(id_filter(oid), doc! { "$set": document })
        })
        .await
        .inspect_err(|e| tracing::error!(product_id = %oid, error = %e, "Failed to update product"))?
        .ok_or_else(|| not_found(oid))?;

        tracing::info!(product_id = %oid, "Product updated");
        Ok(())
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &OperationContext, id: &str) -> ProductResult<()> {
        let oid = object_id::decode(id)?;

        ctx.run(|| self.store.find_one_and_delete(id_filter(oid)))
            .await
            .inspect_err(|e| tracing::error!(product_id = %oid, error = %e, "Failed to delete product"))?
            .ok_or_else(|| not_found(oid))?;

        tracing::info!(product_id = %oid, "Product deleted");
        Ok(())
    }
}

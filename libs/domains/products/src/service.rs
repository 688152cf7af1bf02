//! Product Service - use cases over the persistence gateway

use std::sync::Arc;
use tracing::instrument;

use crate::context::OperationContext;
use crate::error::ProductResult;
use crate::mapper::{DocumentMapper, ProductMapper};
use crate::models::{CreateProduct, Product, ReplaceProduct, UpdateProduct};
use crate::object_id;
use crate::repository::ProductRepository;

/// Product service
///
/// Each use case maps its payload, makes exactly one gateway call and returns the
/// gateway's result as-is. Failures are logged here, never reclassified.
pub struct ProductService<R: ProductRepository, M: DocumentMapper = ProductMapper> {
    repository: Arc<R>,
    mapper: M,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self::with_mapper(repository, ProductMapper)
    }
}

impl<R: ProductRepository, M: DocumentMapper> ProductService<R, M> {
    pub fn with_mapper(repository: R, mapper: M) -> Self {
        Self {
            repository: Arc::new(repository),
            mapper,
        }
    }

    /// Create a product and return its external identifier
    #[instrument(skip(self, ctx, input), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        ctx: &OperationContext,
        input: CreateProduct,
    ) -> ProductResult<String> {
        let document = self.mapper.to_new_document(input);
        self.repository
            .create(ctx, document)
            .await
            .map(object_id::encode)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to create product"))
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_products(&self, ctx: &OperationContext) -> ProductResult<Vec<Product>> {
        self.repository
            .find_all(ctx)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to list products"))
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_product(&self, ctx: &OperationContext, id: &str) -> ProductResult<Product> {
        self.repository
            .find_one(ctx, id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to get product"))
    }

    /// Replace every field of a product
    #[instrument(skip(self, ctx, input))]
    pub async fn replace_product(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: ReplaceProduct,
    ) -> ProductResult<()> {
        let document = self.mapper.to_replacement_document(input);
        self.repository
            .fully_replace(ctx, id, document)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to replace product"))
    }

    /// Apply only the supplied fields
    #[instrument(skip(self, ctx, input))]
    pub async fn update_product(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: UpdateProduct,
    ) -> ProductResult<()> {
        let document = self.mapper.to_merge_document(input);
        self.repository
            .partially_update(ctx, id, document)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to update product"))
    }

    #[instrument(skip(self, ctx))]
    pub async fn delete_product(&self, ctx: &OperationContext, id: &str) -> ProductResult<()> {
        self.repository
            .delete(ctx, id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to delete product"))
    }
}

impl<R: ProductRepository, M: DocumentMapper + Clone> Clone for ProductService<R, M> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            mapper: self.mapper.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::Characteristics;
    use crate::repository::MockProductRepository;
    use mongodb::bson::{doc, oid::ObjectId};

    fn ctx() -> OperationContext {
        OperationContext::background()
    }

    #[tokio::test]
    async fn test_create_maps_payload_and_encodes_id() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|_, document| {
                *document == doc! { "name": "Lamp", "type": "Lighting", "in_stock": 10 }
            })
            .times(1)
            .returning(move |_, _| Ok(id));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(
                &ctx(),
                CreateProduct {
                    name: "Lamp".to_string(),
                    description: None,
                    product_type: "Lighting".to_string(),
                    in_stock: 10,
                    characteristics: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created, id.to_hex());
    }

    #[tokio::test]
    async fn test_update_sends_merge_document() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_partially_update()
            .withf(|_, id, document| {
                id == "65a1b2c3d4e5f60718293a4b"
                    && *document == doc! { "in_stock": 3, "characteristics.color": "red" }
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = ProductService::new(mock_repo);
        service
            .update_product(
                &ctx(),
                "65a1b2c3d4e5f60718293a4b",
                UpdateProduct {
                    in_stock: Some(3),
                    characteristics: Some(Characteristics {
                        color: Some("red".to_string()),
                        material: None,
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_replace_sends_replacement_document() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_fully_replace()
            .withf(|_, _, document| {
                *document == doc! { "name": "Chair", "type": "Furniture", "in_stock": 5 }
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = ProductService::new(mock_repo);
        service
            .replace_product(
                &ctx(),
                "65a1b2c3d4e5f60718293a4b",
                ReplaceProduct {
                    name: "Chair".to_string(),
                    description: None,
                    product_type: "Furniture".to_string(),
                    in_stock: 5,
                    characteristics: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|_| Err(ProductError::not_found("no products stored")));
        mock_repo
            .expect_find_one()
            .withf(|_, id| id == "bogus")
            .times(1)
            .returning(|_, _| Err(ProductError::bad_request("invalid product id")));
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(ProductError::internal("connection reset")));

        let service = ProductService::new(mock_repo);

        assert_eq!(
            service.list_products(&ctx()).await.unwrap_err(),
            ProductError::not_found("no products stored")
        );
        assert_eq!(
            service.get_product(&ctx(), "bogus").await.unwrap_err(),
            ProductError::bad_request("invalid product id")
        );
        assert_eq!(
            service
                .delete_product(&ctx(), &ObjectId::new().to_hex())
                .await
                .unwrap_err(),
            ProductError::internal("connection reset")
        );
    }
}

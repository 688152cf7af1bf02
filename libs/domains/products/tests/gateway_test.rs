//! Gateway and service tests against an in-memory document store
//!
//! These run the real mapper, id codec and repository translation rules; only
//! the driver is replaced.

mod common;

use domain_products::*;
use ::mongodb::bson::{doc, oid::ObjectId};

fn ctx() -> OperationContext {
    OperationContext::background()
}

fn lamp() -> CreateProduct {
    CreateProduct {
        name: "Lamp".to_string(),
        description: None,
        product_type: "Lighting".to_string(),
        in_stock: 10,
        characteristics: None,
    }
}

#[tokio::test]
async fn test_lamp_lifecycle() {
    let (service, _store) = common::service();

    let id = service.create_product(&ctx(), lamp()).await.unwrap();
    assert_eq!(id.len(), 24);

    let product = service.get_product(&ctx(), &id).await.unwrap();
    assert_eq!(product.id, id);
    assert_eq!(product.name, "Lamp");
    assert_eq!(product.product_type, "Lighting");
    assert_eq!(product.in_stock, 10);
    assert_eq!(product.description, None);
    assert_eq!(product.characteristics, None);

    let restock = UpdateProduct {
        in_stock: Some(3),
        ..Default::default()
    };
    service.update_product(&ctx(), &id, restock).await.unwrap();

    let product = service.get_product(&ctx(), &id).await.unwrap();
    assert_eq!(product.in_stock, 3);
    assert_eq!(product.name, "Lamp");

    service.delete_product(&ctx(), &id).await.unwrap();

    let err = service.get_product(&ctx(), &id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
async fn test_created_document_has_only_supplied_fields() {
    let (service, store) = common::service();

    let id = service.create_product(&ctx(), lamp()).await.unwrap();
    let oid = ObjectId::parse_str(&id).unwrap();

    let stored = store.get(oid).unwrap();
    assert_eq!(
        stored,
        doc! { "_id": oid, "name": "Lamp", "type": "Lighting", "in_stock": 10 }
    );
}

#[tokio::test]
async fn test_full_replace_drops_omitted_fields() {
    let (service, store) = common::service();

    let input = CreateProduct {
        description: Some("Brass desk lamp".to_string()),
        characteristics: Some(Characteristics {
            color: Some("gold".to_string()),
            material: Some("brass".to_string()),
        }),
        ..lamp()
    };
    let id = service.create_product(&ctx(), input).await.unwrap();

    let replacement = ReplaceProduct {
        name: "Lamp v2".to_string(),
        description: None,
        product_type: "Lighting".to_string(),
        in_stock: 2,
        characteristics: None,
    };
    service.replace_product(&ctx(), &id, replacement).await.unwrap();

    let oid = ObjectId::parse_str(&id).unwrap();
    assert_eq!(
        store.get(oid).unwrap(),
        doc! { "_id": oid, "name": "Lamp v2", "type": "Lighting", "in_stock": 2 }
    );

    let product = service.get_product(&ctx(), &id).await.unwrap();
    assert_eq!(product.description, None);
    assert_eq!(product.characteristics, None);
    assert_eq!(product.in_stock, 2);
}

#[tokio::test]
async fn test_partial_update_merges_nested_characteristics() {
    let (service, _store) = common::service();

    let input = CreateProduct {
        characteristics: Some(Characteristics {
            color: Some("white".to_string()),
            material: Some("glass".to_string()),
        }),
        ..lamp()
    };
    let id = service.create_product(&ctx(), input).await.unwrap();

    let recolor = UpdateProduct {
        characteristics: Some(Characteristics {
            color: Some("black".to_string()),
            material: None,
        }),
        ..Default::default()
    };
    service.update_product(&ctx(), &id, recolor).await.unwrap();

    let product = service.get_product(&ctx(), &id).await.unwrap();
    assert_eq!(
        product.characteristics,
        Some(Characteristics {
            color: Some("black".to_string()),
            material: Some("glass".to_string()),
        })
    );
    assert_eq!(product.in_stock, 10);
}

#[tokio::test]
async fn test_partial_update_cannot_clear_to_zero() {
    let (service, _store) = common::service();
    let id = service.create_product(&ctx(), lamp()).await.unwrap();

    let zero = UpdateProduct {
        name: Some("Desk lamp".to_string()),
        in_stock: Some(0),
        ..Default::default()
    };
    service.update_product(&ctx(), &id, zero).await.unwrap();

    let product = service.get_product(&ctx(), &id).await.unwrap();
    assert_eq!(product.name, "Desk lamp");
    assert_eq!(product.in_stock, 10);
}

#[tokio::test]
async fn test_empty_partial_update_is_bad_request() {
    let (service, _store) = common::service();
    let id = service.create_product(&ctx(), lamp()).await.unwrap();

    let err = service
        .update_product(&ctx(), &id, UpdateProduct::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::BadRequest(_)));
}

#[tokio::test]
async fn test_list_products() {
    let (service, _store) = common::service();

    let err = service.list_products(&ctx()).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));

    let first = service.create_product(&ctx(), lamp()).await.unwrap();
    let second = service
        .create_product(
            &ctx(),
            CreateProduct {
                name: "Chair".to_string(),
                product_type: "Furniture".to_string(),
                in_stock: 4,
                ..lamp()
            },
        )
        .await
        .unwrap();

    let products = service.list_products(&ctx()).await.unwrap();
    let ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_unknown_id_is_not_found_everywhere() {
    let (service, _store) = common::service();
    service.create_product(&ctx(), lamp()).await.unwrap();
    let missing = ObjectId::new().to_hex();

    let replacement = ReplaceProduct {
        name: "Lamp".to_string(),
        description: None,
        product_type: "Lighting".to_string(),
        in_stock: 1,
        characteristics: None,
    };
    let update = UpdateProduct {
        in_stock: Some(1),
        ..Default::default()
    };

    let results = [
        service.get_product(&ctx(), &missing).await.map(|_| ()),
        service.replace_product(&ctx(), &missing, replacement).await,
        service.update_product(&ctx(), &missing, update).await,
        service.delete_product(&ctx(), &missing).await,
    ];

    for result in results {
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}

#[tokio::test]
async fn test_malformed_id_is_bad_request_and_store_untouched() {
    let (service, store) = common::service();
    service.create_product(&ctx(), lamp()).await.unwrap();
    let before = store.documents();

    let err = service.delete_product(&ctx(), "zzz").await.unwrap_err();
    assert!(matches!(err, ProductError::BadRequest(_)));

    assert_eq!(store.documents(), before);
}

#[tokio::test]
async fn test_delete_removes_only_target() {
    let (service, store) = common::service();
    let keep = service.create_product(&ctx(), lamp()).await.unwrap();
    let remove = service.create_product(&ctx(), lamp()).await.unwrap();

    service.delete_product(&ctx(), &remove).await.unwrap();

    let remaining: Vec<_> = store
        .documents()
        .iter()
        .map(|d| d.get_object_id("_id").unwrap().to_hex())
        .collect();
    assert_eq!(remaining, vec![keep]);
}

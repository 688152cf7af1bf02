use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::object_id;

/// Nested product characteristics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Characteristics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Characteristics {
    /// True when no sub-field carries a value.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.color).is_none() && non_blank(&self.material).is_none()
    }
}

/// Product as returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// External identifier (24-character hex ObjectId)
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub in_stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Characteristics>,
}

/// Stored shape of a product document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub in_stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Characteristics>,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: object_id::encode(doc.id),
            name: doc.name,
            description: doc.description.filter(|d| !d.is_empty()),
            product_type: doc.product_type,
            in_stock: doc.in_stock,
            characteristics: doc.characteristics.filter(|c| !c.is_empty()),
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub product_type: String,
    #[validate(range(min = 1))]
    pub in_stock: i32,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
}

/// DTO describing the complete new state of a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReplaceProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub product_type: String,
    #[validate(range(min = 1))]
    pub in_stock: i32,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
}

/// DTO for a partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    #[validate(length(max = 100))]
    pub product_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub in_stock: Option<i32>,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
}

/// Response body for a created product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedProduct {
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};
    use serde_json::json;

    #[test]
    fn test_document_decodes_into_product() {
        let id = ObjectId::new();
        let doc = doc! {
            "_id": id,
            "name": "Lamp",
            "type": "Lighting",
            "in_stock": 10_i64,
        };

        let product: Product = from_document::<ProductDocument>(doc).unwrap().into();

        assert_eq!(product.id, id.to_hex());
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.product_type, "Lighting");
        assert_eq!(product.in_stock, 10);
        assert!(product.description.is_none());
        assert!(product.characteristics.is_none());
    }

    #[test]
    fn test_product_json_omits_empty_optionals() {
        let product = Product {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: "Lamp".to_string(),
            description: None,
            product_type: "Lighting".to_string(),
            in_stock: 10,
            characteristics: None,
        };

        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({
                "id": "65a1b2c3d4e5f60718293a4b",
                "name": "Lamp",
                "type": "Lighting",
                "in_stock": 10
            })
        );
    }

    #[test]
    fn test_replace_requires_in_stock() {
        let result = serde_json::from_value::<ReplaceProduct>(json!({
            "name": "Chair",
            "type": "Furniture"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_in_stock_fails_validation() {
        let create: CreateProduct = serde_json::from_value(json!({
            "name": "Lamp",
            "type": "Lighting",
            "in_stock": 0
        }))
        .unwrap();
        assert!(create.validate().is_err());

        let replace: ReplaceProduct = serde_json::from_value(json!({
            "name": "Lamp",
            "type": "Lighting",
            "in_stock": 0
        }))
        .unwrap();
        let errors = replace.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("in_stock"));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let input: CreateProduct = serde_json::from_value(json!({
            "name": "",
            "type": "Lighting",
            "in_stock": 1
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_characteristics_is_empty() {
        assert!(Characteristics::default().is_empty());
        assert!(Characteristics {
            color: Some(String::new()),
            material: None
        }
        .is_empty());
        assert!(!Characteristics {
            color: Some("red".into()),
            material: None
        }
        .is_empty());
    }
}

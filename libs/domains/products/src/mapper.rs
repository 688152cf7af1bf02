//! Request payload to BSON document conversion.
//!
//! Two update disciplines are supported and they treat absent values differently:
//!
//! - **replace**: the document becomes the complete new state, so required fields
//!   are always written even when they hold an empty or zero value.
//! - **merge**: only fields carrying a non-default value are written, leaving the
//!   stored value untouched otherwise. An explicit `""` or `0` is therefore
//!   indistinguishable from "not supplied" and is never applied.
//!
//! Mapping cannot fail.

use mongodb::bson::{doc, Document};

use crate::models::{non_blank, Characteristics, CreateProduct, ReplaceProduct, UpdateProduct};

/// Converts request payloads into store documents.
pub trait DocumentMapper: Send + Sync {
    /// Document for a new product. Never carries an identifier.
    fn to_new_document(&self, input: CreateProduct) -> Document;

    /// Document that replaces the stored product wholesale.
    fn to_replacement_document(&self, input: ReplaceProduct) -> Document;

    /// Field set to merge into the stored product.
    fn to_merge_document(&self, input: UpdateProduct) -> Document;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductMapper;

impl DocumentMapper for ProductMapper {
    fn to_new_document(&self, input: CreateProduct) -> Document {
        let mut document = doc! {
            "name": input.name,
            "type": input.product_type,
            "in_stock": input.in_stock,
        };
        insert_optionals(&mut document, &input.description, &input.characteristics);
        document
    }

    fn to_replacement_document(&self, input: ReplaceProduct) -> Document {
        let mut document = doc! {
            "name": input.name,
            "type": input.product_type,
            "in_stock": input.in_stock,
        };
        insert_optionals(&mut document, &input.description, &input.characteristics);
        document
    }

    fn to_merge_document(&self, input: UpdateProduct) -> Document {
        let mut document = Document::new();

        if let Some(name) = non_blank(&input.name) {
            document.insert("name", name);
        }
        if let Some(description) = non_blank(&input.description) {
            document.insert("description", description);
        }
        if let Some(product_type) = non_blank(&input.product_type) {
            document.insert("type", product_type);
        }
        if let Some(in_stock) = input.in_stock.filter(|n| *n != 0) {
            document.insert("in_stock", in_stock);
        }
        // Sub-fields merge individually so a partial characteristics object
        // does not clear its siblings.
        if let Some(characteristics) = &input.characteristics {
            if let Some(color) = non_blank(&characteristics.color) {
                document.insert("characteristics.color", color);
            }
            if let Some(material) = non_blank(&characteristics.material) {
                document.insert("characteristics.material", material);
            }
        }

        document
    }
}

fn insert_optionals(
    document: &mut Document,
    description: &Option<String>,
    characteristics: &Option<Characteristics>,
) {
    if let Some(description) = non_blank(description) {
        document.insert("description", description);
    }
    if let Some(characteristics) = characteristics.as_ref().filter(|c| !c.is_empty()) {
        document.insert("characteristics", characteristics_document(characteristics));
    }
}

fn characteristics_document(characteristics: &Characteristics) -> Document {
    let mut document = Document::new();
    if let Some(color) = non_blank(&characteristics.color) {
        document.insert("color", color);
    }
    if let Some(material) = non_blank(&characteristics.material) {
        document.insert("material", material);
    }
    document
}

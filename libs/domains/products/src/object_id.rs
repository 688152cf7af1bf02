//! Conversion between external product identifiers and MongoDB ObjectIds.
//!
//! External identifiers are the 24-character hex form of an ObjectId. Decoding
//! happens before any store access so malformed input never reaches MongoDB.

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::error::{ProductError, ProductResult};

/// Parse an external identifier into an ObjectId.
pub fn decode(external: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(external).map_err(|e| {
        ProductError::bad_request(format!("invalid product id '{}': {}", external, e))
    })
}

/// Render an ObjectId as its external (lowercase hex) identifier.
pub fn encode(id: ObjectId) -> String {
    id.to_hex()
}

/// Filter document matching a single product by identifier.
pub(crate) fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

//! In-memory document store for exercising the gateway without a server.
//!
//! Supports equality filters on top-level fields, `$set` with dotted paths,
//! and store-assigned ObjectIds. Nothing else.

#![allow(dead_code)]

use async_trait::async_trait;
use domain_products::{
    service::ProductService, DocumentStore, MongoProductRepository, StoreError, StoreResult,
};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored document, in insertion order
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn get(&self, id: ObjectId) -> Option<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.get_object_id("_id").ok() == Some(id))
            .cloned()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

fn set_path(document: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            document.insert(path, value);
        }
        Some((head, rest)) => {
            if !matches!(document.get(head), Some(Bson::Document(_))) {
                document.insert(head, Document::new());
            }
            if let Some(Bson::Document(nested)) = document.get_mut(head) {
                set_path(nested, rest, value);
            }
        }
    }
}

fn apply_update(document: &mut Document, update: &Document) -> StoreResult<()> {
    for (operator, fields) in update {
        let fields = match (operator.as_str(), fields) {
            ("$set", Bson::Document(fields)) => fields,
            _ => return Err(StoreError::Other(format!("unsupported update {}", operator))),
        };
        for (path, value) in fields {
            set_path(document, path, value.clone());
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, mut document: Document) -> StoreResult<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        self.documents.lock().unwrap().push(document);
        Ok(id)
    }

    async fn find_many(&self, filter: Document) -> StoreResult<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| matches(d, &filter))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| matches(d, &filter))
            .cloned())
    }

    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: Document,
    ) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.lock().unwrap();
        let Some(slot) = documents.iter_mut().find(|d| matches(d, &filter)) else {
            return Ok(None);
        };

        let previous = slot.clone();
        let mut next = Document::new();
        if let Some(id) = previous.get("_id") {
            next.insert("_id", id.clone());
        }
        for (key, value) in replacement {
            next.insert(key, value);
        }
        *slot = next;
        Ok(Some(previous))
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.lock().unwrap();
        let Some(slot) = documents.iter_mut().find(|d| matches(d, &filter)) else {
            return Ok(None);
        };

        let previous = slot.clone();
        apply_update(slot, &update)?;
        Ok(Some(previous))
    }

    async fn find_one_and_delete(&self, filter: Document) -> StoreResult<Option<Document>> {
        let mut documents = self.documents.lock().unwrap();
        let position = documents.iter().position(|d| matches(d, &filter));
        Ok(position.map(|index| documents.remove(index)))
    }
}

pub type InMemoryService = ProductService<MongoProductRepository<InMemoryStore>>;

/// Service over a fresh store, plus a handle on that store for assertions
pub fn service() -> (InMemoryService, InMemoryStore) {
    let store = InMemoryStore::new();
    let repository = MongoProductRepository::with_store(store.clone());
    (ProductService::new(repository), store)
}

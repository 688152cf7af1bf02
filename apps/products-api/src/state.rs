//! Application state management

use domain_products::MongoProductRepository;
use mongodb::{Client, Database};
use std::sync::Arc;

use crate::config::Config;

/// Handles built once at startup and shared by the routers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config: Arc::new(config),
            mongo_client,
            db,
        }
    }

    /// Repository over the configured products collection
    pub fn products_repository(&self) -> MongoProductRepository {
        MongoProductRepository::with_collection(&self.db, &self.config.products_collection)
    }
}

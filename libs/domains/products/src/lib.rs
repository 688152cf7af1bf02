//! Products Domain
//!
//! Product documents stored in MongoDB, exposed over HTTP with create, read,
//! full replace, partial update and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request deadline
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────┐
//! │   Service   │ ───▶ │  Mapper  │  ← payload → BSON (replace vs merge rules)
//! └──────┬──────┘      └──────────┘
//!        │
//! ┌──────▼──────┐      ┌──────────┐
//! │ Repository  │ ───▶ │ ObjectId │  ← id codec, error classification
//! └──────┬──────┘      └──────────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← single round-trip document operations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod mongodb;
pub mod object_id;
pub mod repository;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use context::OperationContext;
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use mapper::{DocumentMapper, ProductMapper};
pub use models::{
    Characteristics, CreateProduct, CreatedProduct, Product, ReplaceProduct, UpdateProduct,
};
pub use self::mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
pub use store::{DocumentStore, StoreError, StoreResult};

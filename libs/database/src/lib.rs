//! MongoDB connection management shared by the services in this workspace.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, configuration and health checks
//! - `config` - `core_config::FromEnv` support for the configuration types
//!
//! # Example
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let client = connect_from_config_with_retry(&config, Some(RetryConfig::new())).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

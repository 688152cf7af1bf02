//! Configuration for Products API

use core_config::{app_info, env_or_default, env_parse_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::common::RetryConfig;
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Startup connection policy
    pub retry: RetryConfig,
    pub products_collection: String,
    /// Deadline for the store work behind a single request
    pub request_timeout: Duration,
    /// Upper bound on cleanup after the listener stops
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let mongodb = MongoConfig::from_env()?;
        let retry = RetryConfig::from_env()?;

        let products_collection = env_or_default("PRODUCTS_COLLECTION", "products");
        if products_collection.trim().is_empty() {
            eyre::bail!("PRODUCTS_COLLECTION cannot be empty");
        }

        let request_timeout =
            Duration::from_secs(env_parse_or_default("REQUEST_TIMEOUT_SECS", 10u64)?);
        let shutdown_timeout =
            Duration::from_secs(env_parse_or_default("SHUTDOWN_TIMEOUT_SECS", 30u64)?);

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            mongodb,
            retry,
            products_collection,
            request_timeout,
            shutdown_timeout,
        })
    }
}

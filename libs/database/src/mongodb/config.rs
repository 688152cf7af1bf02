#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default};

/// Explicit authentication settings, applied on top of the connection URL
#[derive(Clone, PartialEq, Eq)]
pub struct MongoCredentials {
    pub username: String,
    pub password: String,
    /// Authentication database; the configured database when `None`
    pub auth_source: Option<String>,
}

impl std::fmt::Debug for MongoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth_source", &self.auth_source)
            .finish()
    }
}

/// MongoDB connection configuration
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop")
///     .with_credentials("shop", "secret", Some("admin"));
///
/// // With the `config` feature
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    pub credentials: Option<MongoCredentials>,

    /// Reported to the server in its logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` using the "default" database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_source: Option<&str>,
    ) -> Self {
        self.credentials = Some(MongoCredentials {
            username: username.into(),
            password: password.into(),
            auth_source: auth_source.map(String::from),
        });
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Authentication database: explicit source, else the configured database
    pub fn auth_source(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| {
            c.auth_source
                .as_deref()
                .unwrap_or(self.database.as_str())
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            credentials: None,
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_USERNAME` / `MONGODB_PASSWORD` (optional, both or neither)
/// - `MONGODB_AUTH_SOURCE` (optional, defaults to the database)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE or MONGO_DATABASE".to_string())
            })?;

        let credentials = match (
            std::env::var("MONGODB_USERNAME").ok(),
            std::env::var("MONGODB_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(MongoCredentials {
                username,
                password,
                auth_source: std::env::var("MONGODB_AUTH_SOURCE").ok(),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid(
                    "MONGODB_USERNAME and MONGODB_PASSWORD must be set together".to_string(),
                ));
            }
        };

        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            credentials,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or_default("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or_default("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or_default(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or_default(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

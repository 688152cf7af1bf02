//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let products = mongo.database().collection::<mongodb::bson::Document>("products");
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    database: Database,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a container and use the "test" database
    pub async fn new() -> Self {
        Self::with_database("test").await
    }

    pub async fn with_database(name: &str) -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        let database = client.database(name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .expect("MongoDB did not answer ping");

        tracing::info!(port = host_port, database = name, "Test MongoDB ready");

        Self {
            container,
            client,
            database,
            connection_string,
        }
    }

    /// Get a handle to the test database (cheap clone)
    pub fn database(&self) -> Database {
        self.database.clone()
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

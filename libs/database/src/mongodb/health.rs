use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Ping `database` and report the outcome with its latency
pub async fn check_health_detailed(client: &Client, database: &str) -> HealthStatus {
    let start = Instant::now();
    let result = client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

/// Ping `database`; `Err` carries the driver message
pub async fn check_health(client: &Client, database: &str) -> Result<(), String> {
    let status = check_health_detailed(client, database).await;
    match status.message {
        None if status.healthy => Ok(()),
        message => Err(message.unwrap_or_else(|| "MongoDB ping failed".to_string())),
    }
}

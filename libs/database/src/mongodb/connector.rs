use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{error, info};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Build a client from `config` without touching the network.
///
/// The driver connects lazily, so the returned client is usable even when the
/// server is down; operations fail individually until it comes back.
pub async fn client_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Send a `ping` to the configured database
pub async fn ping(client: &Client, database: &str) -> DatabaseResult<()> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// Connect using a MongoConfig and verify the server answers.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
/// let client = connect(&config).await?;
/// ```
pub async fn connect(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let client = client_from_config(config).await?;
    ping(&client, config.database()).await?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect without failing when the server is unreachable.
///
/// A failed initial ping is logged and the lazily-connecting client is still
/// returned. Only an unparseable connection string is an error.
pub async fn connect_lazy(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB at {}", config.redacted_url());

    let client = client_from_config(config).await?;

    match ping(&client, config.database()).await {
        Ok(()) => info!(database = config.database(), "MongoDB connected"),
        Err(e) => error!(
            error = %e,
            "MongoDB connection error; requests will fail until it is reachable"
        ),
    }

    Ok(client)
}

/// Shut the client down, waiting for in-use sessions and cursors to be
/// returned. Call once during graceful shutdown.
pub async fn close(client: Client) {
    client.shutdown().await;
    info!("MongoDB client closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_from_config_rejects_bad_scheme() {
        let config = MongoConfig::new("postgres://localhost:5432");
        let result = client_from_config(&config).await;
        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_connect_lazy_tolerates_unreachable_server() {
        let mut config = MongoConfig::new("mongodb://127.0.0.1:1");
        config.server_selection_timeout_secs = 1;
        config.connect_timeout_secs = 1;

        let result = connect_lazy(&config).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let url = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let result = connect(&MongoConfig::new(url)).await;
        assert!(result.is_ok());
    }
}

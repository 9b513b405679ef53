//! Shared application state handed to the route builders.

use mongodb::{Client, Database};

/// Cloned into each router; `Client` and `Database` share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database named by `MONGODB_DATABASE`
    pub db: Database,
}

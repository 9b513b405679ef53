//! MongoDB connection management and health checks

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{client_from_config, close, connect, connect_lazy, ping};
pub use health::{HealthStatus, check_health_detailed};

pub use mongodb::{Client, Collection, Database};

//! Events Domain
//!
//! Owner-scoped CRUD for event records stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JWT gate on mutations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, ownership rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, read model
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_events::{EventService, MongoEventRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoEventRepository::new(client.database("events"));
//! let service = EventService::new(repository);
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-signing-secret-of-at-least-32-chars"));
//! let router = handlers::router(service, auth);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EventAction, EventError, EventResult};
pub use handlers::{ApiDoc, SecurityAddon};
pub use models::{CreateEvent, Event, EventView, MessageResponse, OwnerRef, UpdateEvent};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;

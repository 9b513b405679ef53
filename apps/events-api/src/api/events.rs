use axum::Router;
use axum_helpers::JwtAuth;
use domain_events::{EventService, MongoEventRepository, handlers};

use crate::state::AppState;

/// Events routes backed by the `events` and `users` collections
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.db.clone());
    let service = EventService::new(repository);

    handlers::router(service, JwtAuth::new(&state.config.jwt))
}

//! Event Service - Business logic layer

use axum_helpers::AuthUser;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventAction, EventError, EventResult};
use crate::models::{CreateEvent, Event, EventView, UpdateEvent};
use crate::repository::EventRepository;

/// Event service providing business logic operations
///
/// Ownership is enforced here: creation binds the caller as owner, and
/// update/delete only touch events the caller owns.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an event owned by `caller`
    #[instrument(skip(self, caller, input), fields(user_id = %caller.id, event_name = %input.name))]
    pub async fn create_event(
        &self,
        caller: &AuthUser,
        input: CreateEvent,
    ) -> EventResult<EventView> {
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let event = self
            .repository
            .insert(Event::new(input, caller.id.clone()))
            .await
            .map_err(|e| e.during(EventAction::Create))?;

        self.read_back(event, EventAction::Create).await
    }

    /// List all events with owners resolved
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<EventView>> {
        self.repository
            .list()
            .await
            .map_err(|e| e.during(EventAction::List))
    }

    /// Get one event by its id
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> EventResult<EventView> {
        let id = parse_id(id, EventAction::Get)?;

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| e.during(EventAction::Get))?
            .ok_or(EventError::NotFound)
    }

    /// Update an event owned by `caller`
    #[instrument(skip(self, caller, input), fields(user_id = %caller.id))]
    pub async fn update_event(
        &self,
        caller: &AuthUser,
        id: &str,
        input: UpdateEvent,
    ) -> EventResult<EventView> {
        let id = parse_id(id, EventAction::Update)?;
        input
            .validate()
            .map_err(|e| EventError::Validation(e.to_string()))?;

        let updated = self
            .repository
            .update_owned(id, &caller.id, input)
            .await
            .map_err(|e| e.during(EventAction::Update))?;

        match updated {
            Some(event) => self.read_back(event, EventAction::Update).await,
            None => Err(self.unmatched(id, EventAction::Update).await),
        }
    }

    /// Delete an event owned by `caller`
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn delete_event(&self, caller: &AuthUser, id: &str) -> EventResult<()> {
        let id = parse_id(id, EventAction::Delete)?;

        let deleted = self
            .repository
            .delete_owned(id, &caller.id)
            .await
            .map_err(|e| e.during(EventAction::Delete))?;

        if deleted {
            Ok(())
        } else {
            Err(self.unmatched(id, EventAction::Delete).await)
        }
    }

    /// Re-read a just-written event so its owner resolves from `users`,
    /// exactly as on `get_event`
    async fn read_back(&self, event: Event, action: EventAction) -> EventResult<EventView> {
        let view = self
            .repository
            .get_by_id(event.id)
            .await
            .map_err(|e| e.during(action))?;

        // Deleted between the write and the read
        Ok(view.unwrap_or_else(|| event.into_view(None)))
    }

    /// Explain why an owner-scoped mutation matched nothing
    async fn unmatched(&self, id: Uuid, action: EventAction) -> EventError {
        match self.repository.exists(id).await {
            Ok(true) => {
                tracing::info!(event_id = %id, %action, "Rejected mutation by non-owner");
                EventError::Forbidden
            }
            Ok(false) => EventError::NotFound,
            Err(e) => e.during(action),
        }
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn parse_id(id: &str, action: EventAction) -> EventResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| EventError::InvalidId {
        action,
        id: id.to_string(),
    })
}

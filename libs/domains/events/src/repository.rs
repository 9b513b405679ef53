use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventView, UpdateEvent};

/// Repository trait for Event persistence
///
/// Mutations are conditional on the owner so the ownership check and the
/// write happen in one datastore operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a fully built event
    async fn insert(&self, event: Event) -> EventResult<Event>;

    /// All events in store order, owners resolved
    async fn list(&self) -> EventResult<Vec<EventView>>;

    /// One event with its owner resolved
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<EventView>>;

    /// Update the event only if `owner` owns it; `None` when nothing matched
    async fn update_owned(
        &self,
        id: Uuid,
        owner: &str,
        input: UpdateEvent,
    ) -> EventResult<Option<Event>>;

    /// Delete the event only if `owner` owns it; `false` when nothing matched
    async fn delete_owned(&self, id: Uuid, owner: &str) -> EventResult<bool>;

    /// Whether an event with this id exists at all
    async fn exists(&self, id: Uuid) -> EventResult<bool>;
}

//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, to_bson},
    options::ReturnDocument,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{EVENTS_COLLECTION, Event, EventView, USERS_COLLECTION, UpdateEvent};
use crate::repository::EventRepository;

/// MongoDB implementation of the EventRepository
pub struct MongoEventRepository {
    collection: Collection<Event>,
    users_collection: String,
}

impl MongoEventRepository {
    /// Create a repository over the `events` collection, resolving owners
    /// from `users`
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect_lazy(&config).await?;
    /// let repo = MongoEventRepository::new(client.database("events"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collections(db, EVENTS_COLLECTION, USERS_COLLECTION)
    }

    /// Create a repository with custom collection names
    pub fn with_collections(db: Database, events: &str, users: &str) -> Self {
        Self {
            collection: db.collection::<Event>(events),
            users_collection: users.to_string(),
        }
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    fn owned_filter(id: Uuid, owner: &str) -> Document {
        doc! { "_id": id.to_string(), "owner": owner }
    }

    /// `$set` for the allowed fields plus `updated_at`; `$unset` for a
    /// cleared description
    fn build_update(input: UpdateEvent) -> EventResult<Document> {
        let mut set = doc! { "updated_at": to_bson(&Utc::now())? };
        let mut unset = Document::new();

        if let Some(name) = input.name {
            set.insert("name", name);
        }
        match input.description {
            Some(Some(description)) => {
                set.insert("description", description);
            }
            Some(None) => {
                unset.insert("description", "");
            }
            None => {}
        }
        if let Some(date) = input.date {
            set.insert("date", to_bson(&date)?);
        }

        let mut update = doc! { "$set": set };
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }
        Ok(update)
    }

    /// Aggregation that joins each matched event with its owner's username.
    ///
    /// Owner ids are compared as strings so both string and ObjectId user
    /// `_id`s resolve.
    fn view_pipeline(&self, filter: Document) -> Vec<Document> {
        vec![
            doc! { "$match": filter },
            doc! {
                "$lookup": {
                    "from": self.users_collection.as_str(),
                    "let": { "owner_id": "$owner" },
                    "pipeline": [
                        { "$match": { "$expr": { "$eq": [{ "$toString": "$_id" }, "$$owner_id"] } } },
                        { "$project": { "_id": 0, "username": 1 } },
                    ],
                    "as": "owner_docs",
                }
            },
            doc! {
                "$project": {
                    "name": 1,
                    "description": 1,
                    "date": 1,
                    "created_at": 1,
                    "updated_at": 1,
                    "owner": {
                        "id": "$owner",
                        "username": { "$arrayElemAt": ["$owner_docs.username", 0] },
                    },
                }
            },
        ]
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id, owner = %event.owner))]
    async fn insert(&self, event: Event) -> EventResult<Event> {
        self.collection.insert_one(&event).await?;

        tracing::info!(event_id = %event.id, "Event created successfully");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> EventResult<Vec<EventView>> {
        let cursor = self
            .collection
            .aggregate(self.view_pipeline(doc! {}))
            .with_type::<EventView>()
            .await?;
        let events: Vec<EventView> = cursor.try_collect().await?;

        Ok(events)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<EventView>> {
        let mut cursor = self
            .collection
            .aggregate(self.view_pipeline(Self::id_filter(id)))
            .with_type::<EventView>()
            .await?;

        Ok(cursor.try_next().await?)
    }

    #[instrument(skip(self, input))]
    async fn update_owned(
        &self,
        id: Uuid,
        owner: &str,
        input: UpdateEvent,
    ) -> EventResult<Option<Event>> {
        let updated = self
            .collection
            .find_one_and_update(Self::owned_filter(id, owner), Self::build_update(input)?)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(event_id = %id, "Event updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Uuid, owner: &str) -> EventResult<bool> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::owned_filter(id, owner))
            .await?;

        if deleted.is_some() {
            tracing::info!(event_id = %id, "Event deleted successfully");
        }
        Ok(deleted.is_some())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Uuid) -> EventResult<bool> {
        let count = self
            .collection
            .count_documents(Self::id_filter(id))
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_update_only_sets_allowed_fields() {
        let update = MongoEventRepository::build_update(UpdateEvent {
            name: Some("Renamed".to_string()),
            ..Default::default()
        })
        .unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("name").unwrap(), "Renamed");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("date"));
        assert!(!set.contains_key("owner"));
        assert!(!update.contains_key("$unset"));
    }

    #[test]
    fn test_build_update_null_description_unsets() {
        let update = MongoEventRepository::build_update(UpdateEvent {
            description: Some(None),
            ..Default::default()
        })
        .unwrap();

        let unset = update.get_document("$unset").unwrap();
        assert!(unset.contains_key("description"));
        assert!(!update.get_document("$set").unwrap().contains_key("description"));
    }

    #[test]
    fn test_build_update_with_date() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let update = MongoEventRepository::build_update(UpdateEvent {
            date: Some(date),
            ..Default::default()
        })
        .unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get("date"), Some(&to_bson(&date).unwrap()));
    }

    #[test]
    fn test_owned_filter_matches_id_and_owner() {
        let id = Uuid::now_v7();
        let filter = MongoEventRepository::owned_filter(id, "u1");

        assert_eq!(filter.get_str("_id").unwrap(), id.to_string());
        assert_eq!(filter.get_str("owner").unwrap(), "u1");
    }
}

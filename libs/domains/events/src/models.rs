//! Event domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Collection holding event documents
pub const EVENTS_COLLECTION: &str = "events";

/// Collection holding user documents, joined to resolve owner usernames
pub const USERS_COLLECTION: &str = "users";

/// Event entity - represents an event stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the event takes place
    pub date: DateTime<Utc>,
    /// Id of the user who created the event; never changes
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Build a new event owned by `owner`
    pub fn new(input: CreateEvent, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            date: input.date,
            owner: owner.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the allowed fields of `input` and bump `updated_at`
    pub fn apply_update(&mut self, input: UpdateEvent) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(date) = input.date {
            self.date = date;
        }
        self.updated_at = Utc::now();
    }

    /// Pair the event with its owner's username
    pub fn into_view(self, username: Option<String>) -> EventView {
        EventView {
            id: self.id,
            name: self.name,
            description: self.description,
            date: self.date,
            owner: OwnerRef {
                id: self.owner,
                username,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Owner reference with the username resolved from `users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnerRef {
    pub id: String,
    /// `null` when no user document matches the owner id
    #[serde(default)]
    pub username: Option<String>,
}

/// Event as returned by the API, with the owner expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventView {
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub owner: OwnerRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an event
///
/// Any `owner` in the body is ignored; the caller becomes the owner.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "date_input::deserialize")]
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: DateTime<Utc>,
}

/// DTO for updating an event
///
/// Only these fields can change. Unknown fields, `owner` included, are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// `null` clears the description; an absent key leaves it unchanged
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "date_input::deserialize_option")]
    #[schema(value_type = Option<String>, example = "2024-06-01T18:00:00Z")]
    pub date: Option<DateTime<Utc>>,
}

impl UpdateEvent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.date.is_none()
    }
}

/// Body of a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Event ids as hyphenated strings in both JSON and BSON.
///
/// `Uuid`'s own impl writes binary to non-human-readable serializers, which
/// would not match the string ids used in query filters.
pub mod id_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }
}

/// Tells an explicit `null` apart from a missing key.
///
/// Use with `#[serde(default)]`: missing is `None`, `null` is `Some(None)`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Lenient date parsing for request bodies.
pub mod date_input {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    /// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
    /// UTC) or a plain `YYYY-MM-DD` (midnight UTC).
    pub fn parse(value: &str) -> Result<DateTime<Utc>, String> {
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }

        Err(format!("invalid date '{value}', expected RFC 3339 or YYYY-MM-DD"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_input() -> CreateEvent {
        CreateEvent {
            name: "Meetup".to_string(),
            description: Some("Monthly".to_string()),
            date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_event_new_binds_owner() {
        let event = Event::new(create_input(), "u1");
        assert_eq!(event.owner, "u1");
        assert_eq!(event.name, "Meetup");
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_create_event_accepts_plain_date() {
        let input: CreateEvent =
            serde_json::from_str(r#"{"name":"Meetup","date":"2024-06-01"}"#).unwrap();
        assert_eq!(input.date, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_create_event_accepts_rfc3339_with_offset() {
        let input: CreateEvent =
            serde_json::from_str(r#"{"name":"Meetup","date":"2024-06-01T20:00:00+02:00"}"#)
                .unwrap();
        assert_eq!(input.date, Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_create_event_ignores_owner_field() {
        let input: CreateEvent = serde_json::from_str(
            r#"{"name":"Meetup","date":"2024-06-01","owner":"someone-else"}"#,
        )
        .unwrap();
        let event = Event::new(input, "u1");
        assert_eq!(event.owner, "u1");
    }

    #[test]
    fn test_create_event_rejects_bad_date() {
        let result = serde_json::from_str::<CreateEvent>(r#"{"name":"Meetup","date":"June 1st"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_event_validation() {
        let mut input = create_input();
        assert!(input.validate().is_ok());

        input.name = String::new();
        assert!(input.validate().is_err());

        input.name = "x".repeat(500);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_event_drops_owner() {
        let input: UpdateEvent =
            serde_json::from_str(r#"{"name":"Renamed","owner":"u2"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Renamed"));
        assert!(input.date.is_none());
        assert!(!input.is_empty());
    }

    #[test]
    fn test_update_event_null_description_clears() {
        let input: UpdateEvent = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(input.description, Some(None));
        assert!(!input.is_empty());

        let mut event = Event::new(create_input(), "u1");
        event.apply_update(input);
        assert_eq!(event.description, None);

        let absent: UpdateEvent = serde_json::from_str(r#"{"name":"Renamed"}"#).unwrap();
        assert_eq!(absent.description, None);
    }

    #[test]
    fn test_update_event_empty_and_null_date() {
        let input: UpdateEvent = serde_json::from_str(r#"{"date":null}"#).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn test_apply_update_keeps_owner() {
        let mut event = Event::new(create_input(), "u1");
        let before = event.updated_at;

        event.apply_update(UpdateEvent {
            name: Some("Renamed".to_string()),
            date: Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        });

        assert_eq!(event.name, "Renamed");
        assert_eq!(event.description.as_deref(), Some("Monthly"));
        assert_eq!(event.owner, "u1");
        assert!(event.updated_at >= before);
    }

    #[test]
    fn test_into_view_serializes_owner_object() {
        let view = Event::new(create_input(), "u1").into_view(Some("alice".to_string()));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["owner"]["id"], "u1");
        assert_eq!(json["owner"]["username"], "alice");
        assert_eq!(json["_id"], view.id.to_string());
    }

    #[test]
    fn test_event_id_is_stored_as_string() {
        let event = Event::new(create_input(), "u1");
        let document = mongodb::bson::to_document(&event).unwrap();

        assert_eq!(document.get_str("_id").unwrap(), event.id.to_string());
        let back: Event = mongodb::bson::from_document(document).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_view_without_username_deserializes() {
        let json = r#"{
            "_id": "0190a6b2-7c3e-7000-8000-000000000001",
            "name": "Meetup",
            "date": "2024-06-01T00:00:00Z",
            "owner": {"id": "u1"},
            "created_at": "2024-05-01T00:00:00Z",
            "updated_at": "2024-05-01T00:00:00Z"
        }"#;
        let view: EventView = serde_json::from_str(json).unwrap();
        assert_eq!(view.owner.username, None);
    }
}

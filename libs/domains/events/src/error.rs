use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::Display;
use thiserror::Error;

/// Operation a failure happened in; selects the public 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventAction {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl EventAction {
    /// Message returned to clients when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Create => "Error creating event",
            Self::List => "Error fetching events",
            Self::Get => "Error fetching event",
            Self::Update => "Error updating event",
            Self::Delete => "Error deleting event",
        }
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found")]
    NotFound,

    #[error("Not authorized")]
    Forbidden,

    #[error("Invalid event id '{id}'")]
    InvalidId { action: EventAction, id: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Raw datastore failure, before the service attaches the operation
    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to {action} event: {message}")]
    Persistence {
        action: EventAction,
        message: String,
    },
}

impl EventError {
    /// Attach the failing operation to a raw datastore error
    pub fn during(self, action: EventAction) -> Self {
        match self {
            EventError::Database(message) => EventError::Persistence { action, message },
            other => other,
        }
    }
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
///
/// Datastore causes are logged here and replaced by the fixed
/// per-operation message.
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound => AppError::NotFound("Event not found".to_string()),
            EventError::Forbidden => AppError::Forbidden("Not authorized".to_string()),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::InvalidId { action, id } => {
                tracing::error!(%action, %id, "Malformed event id");
                AppError::InternalServerError(action.failure_message().to_string())
            }
            EventError::Persistence { action, message } => {
                tracing::error!(%action, error = %message, "Event persistence failure");
                AppError::InternalServerError(action.failure_message().to_string())
            }
            EventError::Database(message) => {
                tracing::error!(error = %message, "Event persistence failure");
                AppError::InternalServerError(
                    axum_helpers::ErrorCode::InternalError
                        .default_message()
                        .to_string(),
                )
            }
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        EventError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_during_wraps_database_errors_only() {
        let err = EventError::Database("socket closed".to_string()).during(EventAction::Update);
        assert!(matches!(
            err,
            EventError::Persistence {
                action: EventAction::Update,
                ..
            }
        ));

        let err = EventError::NotFound.during(EventAction::Update);
        assert!(matches!(err, EventError::NotFound));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::NotFound, StatusCode::NOT_FOUND),
            (EventError::Forbidden, StatusCode::FORBIDDEN),
            (
                EventError::Validation("name".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                EventError::InvalidId {
                    action: EventAction::Get,
                    id: "abc".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                EventError::Persistence {
                    action: EventAction::Create,
                    message: "timeout".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(EventAction::Create.failure_message(), "Error creating event");
        assert_eq!(EventAction::List.failure_message(), "Error fetching events");
        assert_eq!(EventAction::Get.failure_message(), "Error fetching event");
        assert_eq!(EventAction::Update.failure_message(), "Error updating event");
        assert_eq!(EventAction::Delete.failure_message(), "Error deleting event");
        assert_eq!(EventAction::Delete.to_string(), "delete");
    }
}

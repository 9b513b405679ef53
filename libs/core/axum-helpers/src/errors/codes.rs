//! Error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! ```rust
//! use axum::http::StatusCode;
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Forbidden;
//! assert_eq!(code.as_str(), "FORBIDDEN");
//! assert_eq!(code.code(), 1007);
//! assert_eq!(code.status(), StatusCode::FORBIDDEN);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body parsed but failed field validation
    ValidationError,
    /// Body missing, not JSON, or the wrong shape
    JsonExtraction,
    NotFound,
    InternalError,
    /// Missing or invalid bearer token
    Unauthorized,
    /// Authenticated, but not allowed to touch the resource
    Forbidden,
}

impl ErrorCode {
    /// Identifier sent as the `error` field
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Stable integer for logs and dashboards
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError | Self::JsonExtraction => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Message used when the caller has nothing more specific to say
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Not authorized",
        }
    }
}

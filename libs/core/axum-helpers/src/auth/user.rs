use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::jwt::JwtClaims;

/// Authenticated caller, inserted into request extensions by
/// [`jwt_auth_middleware`](super::jwt_auth_middleware)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

impl From<JwtClaims> for AuthUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

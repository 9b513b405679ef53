//! Bearer-token authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens
//! - [`jwt_auth_middleware`] rejects requests without a valid token and
//!   stores the caller as [`AuthUser`] in request extensions
//!
//! # Example
//!
//! ```ignore
//! use axum::{Extension, Router, middleware, routing::post};
//! use axum_helpers::auth::{AuthUser, JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/", post(|Extension(user): Extension<AuthUser>| async move { user.id }))
//!     .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{DEFAULT_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
pub use user::AuthUser;

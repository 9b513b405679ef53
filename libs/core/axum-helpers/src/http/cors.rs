use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Environment variable holding comma-separated allowed origins
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer restricted to `allowed_origins`.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Authorization, Accept, Cookie
/// - Credentials allowed, 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Creates a CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or `*` allows any origin. Otherwise the value is a comma-separated
/// origin list, e.g. `http://localhost:3000,https://example.com`.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let origins = std::env::var(CORS_ALLOWED_ORIGIN).unwrap_or_else(|_| "*".to_string());
    cors_layer_for(&origins)
}

fn cors_layer_for(origins: &str) -> io::Result<CorsLayer> {
    if origins.trim() == "*" {
        tracing::info!("CORS configured to allow any origin");
        return Ok(create_permissive_cors_layer());
    }

    let allowed_origins = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {CORS_ALLOWED_ORIGIN} value: {e}"),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{CORS_ALLOWED_ORIGIN} cannot be empty"),
        ));
    }

    tracing::info!("CORS configured with allowed origins: {}", origins);
    Ok(create_cors_layer(allowed_origins))
}

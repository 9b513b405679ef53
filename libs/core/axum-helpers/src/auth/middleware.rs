use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use super::{jwt::JwtAuth, user::AuthUser};
use crate::errors::{ErrorCode, error_response};

/// Name of the cookie checked when no `Authorization` header is present
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extract JWT from `Authorization: Bearer` or the access token cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == ACCESS_TOKEN_COOKIE).then(|| value.to_string())
                    })
                })
        })
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Responds with 401 before the handler runs when the token is missing or
/// fails verification. On success the caller is available to handlers as
/// `Extension<AuthUser>`.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&headers) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return error_response(ErrorCode::Unauthorized, "No token provided");
    };

    let claims = match auth.verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return error_response(ErrorCode::Unauthorized, "Invalid token");
        }
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    next.run(request).await
}

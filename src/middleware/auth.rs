use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity attached to a request by `jwt_auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: String,
}

/// Validates the bearer token and injects the caller's identity into the request
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers()).map_err(ApiError::unauthorized)?;

    let claims = state
        .services
        .auth
        .parse_token(token)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    debug!(user_id = claims.sub, role = %claims.role, jti = %claims.jti, "Authenticated request");
    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Accepts exactly `Bearer <token>`
pub(crate) fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        ["Bearer"] => Err("Empty bearer token"),
        _ => Err("Authorization header must use Bearer token format"),
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Missing authentication context"))
    }
}

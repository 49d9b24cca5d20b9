use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::auth::AuthUser;
use crate::database::models::ROLE_ADMIN;
use crate::error::ApiError;

/// Requires the `admin` role; rejects with 403 before the handler body runs.
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(ApiError::forbidden("Admin role required"));
        }
        Ok(RequireAdmin(user))
    }
}

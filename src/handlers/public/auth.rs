// handlers/public/auth.rs - POST /auth/sign-up, POST /auth/sign-in

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::database::models::Credentials;
use crate::middleware::{ApiResponse, ApiResult, IdResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Creates an account with role "user"; responds 201 `{"id"}`.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let Json(credentials) = payload?;
    let id = state.services.auth.create_user(&credentials).await?;
    Ok(ApiResponse::created(IdResponse { id }))
}

/// Exchanges credentials for a bearer token.
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(credentials) = payload?;
    let token = state
        .services
        .auth
        .generate_token(&credentials.username, &credentials.password)
        .await
        .map_err(|e| {
            tracing::info!("Sign-in failed for {}: {}", credentials.username, e);
            e
        })?;
    Ok(ApiResponse::success(TokenResponse { token }))
}

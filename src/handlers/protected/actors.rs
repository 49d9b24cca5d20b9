// handlers/protected/actors.rs - /api/actors, /api/actor, /api/actor/:id

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::database::models::{ActorWithMovies, InputActor};
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, IdResponse, MessageResponse, RequireAdmin};
use crate::state::AppState;

pub async fn list_actors(_user: AuthUser, State(state): State<AppState>) -> ApiResult<Vec<ActorWithMovies>> {
    let actors = state.services.actors.get_all().await?;
    Ok(ApiResponse::success(actors))
}

pub async fn create_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<InputActor>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let Json(input) = payload?;
    let (actor, movies) = input.into_new()?;

    let id = state.services.actors.create(&actor, &movies).await?;
    tracing::info!(user_id = admin.user_id, "Created actor {}", id);
    Ok(ApiResponse::created(IdResponse { id }))
}

pub async fn get_actor(
    _user: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<ActorWithMovies> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "actor")?;

    let actor = state.services.actors.get(id).await?;
    Ok(ApiResponse::success(actor))
}

pub async fn update_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<InputActor>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "actor")?;
    let Json(input) = payload?;
    input.validate_patch()?;

    state.services.actors.update(id, &input).await?;
    tracing::info!(user_id = admin.user_id, "Updated actor {}", id);
    Ok(ApiResponse::success(MessageResponse::new(format!("Actor {} updated", id))))
}

pub async fn delete_actor(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "actor")?;

    state.services.actors.delete(id).await?;
    tracing::info!(user_id = admin.user_id, "Deleted actor {}", id);
    Ok(ApiResponse::success(MessageResponse::new(format!("Actor {} deleted", id))))
}

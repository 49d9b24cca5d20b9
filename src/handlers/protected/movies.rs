// handlers/protected/movies.rs - /api/movies, /api/movie, /api/movie/:id, /api/movie/search

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::database::models::{InputMovie, MovieWithActors};
use crate::database::MovieSort;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, IdResponse, MessageResponse, RequireAdmin};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub actor: Option<String>,
}

/// Which search a query string asks for; blank values count as absent.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchQuery {
    Title(String),
    Actor(String),
}

impl TryFrom<SearchParams> for SearchQuery {
    type Error = ApiError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(params.title), present(params.actor)) {
            (Some(title), None) => Ok(SearchQuery::Title(title)),
            (None, Some(actor)) => Ok(SearchQuery::Actor(actor)),
            (Some(_), Some(_)) => Err(ApiError::bad_request(
                "Search by either title or actor, not both",
            )),
            (None, None) => Err(ApiError::bad_request(
                "Either title or actor query parameter is required",
            )),
        }
    }
}

pub async fn list_movies(
    _user: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<MovieWithActors>> {
    let Query(params) = query?;
    let sort = MovieSort::parse(params.sort_by.as_deref(), params.sort_order.as_deref())?;

    let movies = state.services.movies.get_all(sort).await?;
    Ok(ApiResponse::success(movies))
}

pub async fn create_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<InputMovie>, JsonRejection>,
) -> ApiResult<IdResponse> {
    let Json(input) = payload?;
    let (movie, actors) = input.into_new()?;

    let id = state.services.movies.create(&movie, &actors).await?;
    tracing::info!(user_id = admin.user_id, "Created movie {}", id);
    Ok(ApiResponse::created(IdResponse { id }))
}

pub async fn get_movie(
    _user: AuthUser,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<MovieWithActors> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "movie")?;

    let movie = state.services.movies.get(id).await?;
    Ok(ApiResponse::success(movie))
}

pub async fn update_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<InputMovie>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "movie")?;
    let Json(input) = payload?;
    input.validate_patch()?;

    state.services.movies.update(id, &input).await?;
    tracing::info!(user_id = admin.user_id, "Updated movie {}", id);
    Ok(ApiResponse::success(MessageResponse::new(format!("Movie {} updated", id))))
}

pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(raw) = path?;
    let id = parse_id(&raw, "movie")?;

    state.services.movies.delete(id).await?;
    tracing::info!(user_id = admin.user_id, "Deleted movie {}", id);
    Ok(ApiResponse::success(MessageResponse::new(format!("Movie {} deleted", id))))
}

pub async fn search_movies(
    _user: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<MovieWithActors>> {
    let Query(params) = query?;

    let movies = match SearchQuery::try_from(params)? {
        SearchQuery::Title(title) => state.services.movies.search_by_title(&title).await?,
        SearchQuery::Actor(actor) => state.services.movies.search_by_actor(&actor).await?,
    };
    Ok(ApiResponse::success(movies))
}

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    BoxError, Router,
};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::error::ApiError;
use crate::handlers::{method_not_allowed, protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root).fallback(method_not_allowed))
        .route("/health", get(public::health).fallback(method_not_allowed))
        .merge(auth_public_routes())
        // Protected API
        .merge(catalog_routes(state.clone()))
        .fallback(route_not_found)
        // Global middleware
        .layer(cors_layer(&config.security))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/sign-up", post(auth::sign_up).fallback(method_not_allowed))
        .route("/auth/sign-in", post(auth::sign_in).fallback(method_not_allowed))
}

fn catalog_routes(state: AppState) -> Router<AppState> {
    use protected::{actors, movies};

    Router::new()
        .route("/api/actors", get(actors::list_actors).fallback(method_not_allowed))
        .route("/api/actor", post(actors::create_actor).fallback(method_not_allowed))
        .route(
            "/api/actor/:id",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor)
                .fallback(method_not_allowed),
        )
        .route("/api/movies", get(movies::list_movies).fallback(method_not_allowed))
        .route("/api/movie", post(movies::create_movie).fallback(method_not_allowed))
        .route(
            "/api/movie/search",
            get(movies::search_movies).fallback(method_not_allowed),
        )
        .route(
            "/api/movie/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie)
                .fallback(method_not_allowed),
        )
        // Only matched routes require a token; unknown paths still 404
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

// Dropping the timed-out future also cancels the store query it was awaiting
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::service_unavailable("Request timed out")
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::internal_server_error("Internal server error")
    }
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

pub mod actor_service;
pub mod auth_service;
pub mod movie_service;

pub use actor_service::ActorService;
pub use auth_service::AuthService;
pub use movie_service::MovieService;

use crate::auth::TokenService;
use crate::database::Repository;

/// Domain operations exposed to the HTTP layer
pub struct Service {
    pub auth: AuthService,
    pub actors: ActorService,
    pub movies: MovieService,
}

impl Service {
    pub fn new(repo: &Repository, tokens: TokenService, password_salt: impl Into<String>) -> Self {
        Self {
            auth: AuthService::new(repo.authorization(), tokens, password_salt),
            actors: ActorService::new(repo.actors()),
            movies: MovieService::new(repo.movies()),
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ActorWithMovies, InputActor, InputMovie, MovieWithActors, NewActor, NewMovie, User,
};
use crate::database::postgres::{PgActorStore, PgAuthStore, PgMovieStore};
use crate::database::sort::MovieSort;

/// Credential store
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Inserts a user with role "user" and returns its id.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i32, DatabaseError>;

    /// Looks a user up by the (username, password hash) pair.
    async fn get_user(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError>;
}

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn create_actor(&self, actor: &NewActor, movies: &[NewMovie]) -> Result<i32, DatabaseError>;
    async fn get_all_actors(&self) -> Result<Vec<ActorWithMovies>, DatabaseError>;
    async fn get_actor(&self, id: i32) -> Result<ActorWithMovies, DatabaseError>;
    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError>;
    async fn update_actor(&self, id: i32, input: &InputActor) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn get_all_movies(&self, sort: MovieSort) -> Result<Vec<MovieWithActors>, DatabaseError>;
    async fn create_movie(&self, movie: &NewMovie, actors: &[NewActor]) -> Result<i32, DatabaseError>;
    async fn get_movie(&self, id: i32) -> Result<MovieWithActors, DatabaseError>;
    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError>;
    async fn update_movie(&self, id: i32, input: &InputMovie) -> Result<(), DatabaseError>;
    async fn search_by_title(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError>;
    async fn search_by_actor(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError>;
}

/// The three store capabilities behind one handle
#[derive(Clone)]
pub struct Repository {
    authorization: Arc<dyn AuthorizationRepository>,
    actors: Arc<dyn ActorRepository>,
    movies: Arc<dyn MovieRepository>,
}

impl Repository {
    pub fn new(
        authorization: Arc<dyn AuthorizationRepository>,
        actors: Arc<dyn ActorRepository>,
        movies: Arc<dyn MovieRepository>,
    ) -> Self {
        Self {
            authorization,
            actors,
            movies,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgAuthStore::new(pool.clone())),
            Arc::new(PgActorStore::new(pool.clone())),
            Arc::new(PgMovieStore::new(pool)),
        )
    }

    pub fn authorization(&self) -> Arc<dyn AuthorizationRepository> {
        Arc::clone(&self.authorization)
    }

    pub fn actors(&self) -> Arc<dyn ActorRepository> {
        Arc::clone(&self.actors)
    }

    pub fn movies(&self) -> Arc<dyn MovieRepository> {
        Arc::clone(&self.movies)
    }
}

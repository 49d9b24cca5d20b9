use std::sync::Arc;

use tracing::debug;

use crate::database::models::{InputMovie, MovieWithActors, NewActor, NewMovie};
use crate::database::{DatabaseError, MovieRepository, MovieSort};

pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(repo: Arc<dyn MovieRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, sort: MovieSort) -> Result<Vec<MovieWithActors>, DatabaseError> {
        self.repo.get_all_movies(sort).await
    }

    pub async fn create(&self, movie: &NewMovie, actors: &[NewActor]) -> Result<i32, DatabaseError> {
        debug!("Creating movie {}", movie.title);
        self.repo.create_movie(movie, actors).await
    }

    pub async fn get(&self, id: i32) -> Result<MovieWithActors, DatabaseError> {
        self.repo.get_movie(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        debug!("Deleting movie {}", id);
        self.repo.delete_movie(id).await
    }

    pub async fn update(&self, id: i32, input: &InputMovie) -> Result<(), DatabaseError> {
        debug!("Updating movie {}", id);
        self.repo.update_movie(id, input).await
    }

    pub async fn search_by_title(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        self.repo.search_by_title(fragment).await
    }

    pub async fn search_by_actor(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        self.repo.search_by_actor(fragment).await
    }
}

use std::sync::Arc;

use tracing::debug;

use crate::database::models::{ActorWithMovies, InputActor, NewActor, NewMovie};
use crate::database::{ActorRepository, DatabaseError};

pub struct ActorService {
    repo: Arc<dyn ActorRepository>,
}

impl ActorService {
    pub fn new(repo: Arc<dyn ActorRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, actor: &NewActor, movies: &[NewMovie]) -> Result<i32, DatabaseError> {
        debug!("Creating actor {}", actor.name);
        self.repo.create_actor(actor, movies).await
    }

    pub async fn get_all(&self) -> Result<Vec<ActorWithMovies>, DatabaseError> {
        self.repo.get_all_actors().await
    }

    pub async fn get(&self, id: i32) -> Result<ActorWithMovies, DatabaseError> {
        self.repo.get_actor(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        debug!("Deleting actor {}", id);
        self.repo.delete_actor(id).await
    }

    pub async fn update(&self, id: i32, input: &InputActor) -> Result<(), DatabaseError> {
        debug!("Updating actor {}", id);
        self.repo.update_actor(id, input).await
    }
}

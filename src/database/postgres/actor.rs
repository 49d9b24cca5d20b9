use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{find_actor, find_or_insert_movie, insert_actor, link, ACTOR_MOVIE_SELECT};
use crate::database::fold::{fold, ActorMovieRow};
use crate::database::manager::DatabaseError;
use crate::database::models::{ActorWithMovies, InputActor, NewActor, NewMovie};
use crate::database::query_builder::UpdateBuilder;
use crate::database::repository::ActorRepository;

pub struct PgActorStore {
    pool: PgPool,
}

impl PgActorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorRepository for PgActorStore {
    async fn create_actor(&self, actor: &NewActor, movies: &[NewMovie]) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        if find_actor(&mut tx, actor).await?.is_some() {
            return Err(DatabaseError::DuplicateActor);
        }
        let id = insert_actor(&mut tx, actor).await?;

        for movie in movies {
            let movie_id = find_or_insert_movie(&mut tx, movie).await?;
            link(&mut tx, movie_id, id).await?;
        }

        tx.commit().await?;
        debug!("Created actor {} with {} movie link(s)", id, movies.len());
        Ok(id)
    }

    async fn get_all_actors(&self) -> Result<Vec<ActorWithMovies>, DatabaseError> {
        let sql = format!("{} ORDER BY a.id ASC, m.id ASC", ACTOR_MOVIE_SELECT);
        let rows = sqlx::query_as::<_, ActorMovieRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(fold(rows))
    }

    async fn get_actor(&self, id: i32) -> Result<ActorWithMovies, DatabaseError> {
        let sql = format!("{} WHERE a.id = $1 ORDER BY m.id ASC", ACTOR_MOVIE_SELECT);
        let rows = sqlx::query_as::<_, ActorMovieRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        fold(rows)
            .into_iter()
            .next()
            .ok_or_else(|| DatabaseError::not_found(format!("actor {} not found", id)))
    }

    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM actor WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("actor {} not found", id)));
        }
        Ok(())
    }

    async fn update_actor(&self, id: i32, input: &InputActor) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i32>("SELECT id FROM actor WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("actor {} not found", id)))?;

        let update = UpdateBuilder::new("actor")
            .set("name", input.name.clone())
            .set("gender", input.gender)
            .set("birth_date", input.birth_date);
        debug!("Updating actor {} columns {:?}", id, update.columns());
        update
            .execute(&mut tx, id)
            .await
            .map_err(|e| e.unique_as(DatabaseError::DuplicateActor))?;

        match input.movies.as_deref() {
            None => {}
            Some([]) => {
                sqlx::query("DELETE FROM movie_actor WHERE actor_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            Some(movies) => {
                for movie in movies {
                    let movie_id = find_or_insert_movie(&mut tx, movie).await?;
                    link(&mut tx, movie_id, id).await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

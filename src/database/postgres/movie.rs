use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{escape_like, find_movie, find_or_insert_actor, insert_movie, link, MOVIE_ACTOR_SELECT};
use crate::database::fold::{fold, MovieActorRow};
use crate::database::manager::DatabaseError;
use crate::database::models::{InputMovie, MovieWithActors, NewActor, NewMovie};
use crate::database::query_builder::UpdateBuilder;
use crate::database::repository::MovieRepository;
use crate::database::sort::MovieSort;

pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_folded(&self, sql: &str, bind: Option<String>) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let mut q = sqlx::query_as::<_, MovieActorRow>(sql);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(fold(rows))
    }
}

#[async_trait]
impl MovieRepository for PgMovieStore {
    async fn get_all_movies(&self, sort: MovieSort) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let sql = format!("{} ORDER BY {}, a.id ASC", MOVIE_ACTOR_SELECT, sort.order_terms("m"));
        self.fetch_folded(&sql, None).await
    }

    async fn create_movie(&self, movie: &NewMovie, actors: &[NewActor]) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        if find_movie(&mut tx, movie).await?.is_some() {
            return Err(DatabaseError::DuplicateMovie);
        }
        let id = insert_movie(&mut tx, movie).await?;

        for actor in actors {
            let actor_id = find_or_insert_actor(&mut tx, actor).await?;
            link(&mut tx, id, actor_id).await?;
        }

        tx.commit().await?;
        debug!("Created movie {} with {} actor link(s)", id, actors.len());
        Ok(id)
    }

    async fn get_movie(&self, id: i32) -> Result<MovieWithActors, DatabaseError> {
        let sql = format!("{} WHERE m.id = $1 ORDER BY a.id ASC", MOVIE_ACTOR_SELECT);
        let rows = sqlx::query_as::<_, MovieActorRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        fold(rows)
            .into_iter()
            .next()
            .ok_or_else(|| DatabaseError::not_found(format!("movie {} not found", id)))
    }

    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("movie {} not found", id)));
        }
        Ok(())
    }

    async fn update_movie(&self, id: i32, input: &InputMovie) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i32>("SELECT id FROM movie WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("movie {} not found", id)))?;

        let update = UpdateBuilder::new("movie")
            .set("title", input.title.clone())
            .set("description", input.description.clone())
            .set("release_date", input.release_date)
            .set("rating", input.rating);
        debug!("Updating movie {} columns {:?}", id, update.columns());
        update
            .execute(&mut tx, id)
            .await
            .map_err(|e| e.unique_as(DatabaseError::DuplicateMovie))?;

        match input.actors.as_deref() {
            None => {}
            Some([]) => {
                sqlx::query("DELETE FROM movie_actor WHERE movie_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            Some(actors) => {
                for actor in actors {
                    let actor_id = find_or_insert_actor(&mut tx, actor).await?;
                    link(&mut tx, id, actor_id).await?;
                }
            }
        }

        // Dropping the transaction on any early return above rolls it back
        tx.commit().await?;
        Ok(())
    }

    async fn search_by_title(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let sql = format!(
            "{} WHERE m.title ILIKE '%' || $1 || '%' ORDER BY m.id ASC, a.id ASC",
            MOVIE_ACTOR_SELECT
        );
        self.fetch_folded(&sql, Some(escape_like(fragment))).await
    }

    async fn search_by_actor(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let sql = format!(
            "{} WHERE m.id IN (\
                SELECT ma2.movie_id FROM movie_actor ma2 \
                JOIN actor a2 ON a2.id = ma2.actor_id \
                WHERE a2.name ILIKE '%' || $1 || '%'\
             ) ORDER BY m.id ASC, a.id ASC",
            MOVIE_ACTOR_SELECT
        );
        self.fetch_folded(&sql, Some(escape_like(fragment))).await
    }
}

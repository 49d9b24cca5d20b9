//! Postgres implementations of the repository traits

mod actor;
mod auth;
mod movie;

pub use actor::PgActorStore;
pub use auth::PgAuthStore;
pub use movie::PgMovieStore;

use sqlx::PgConnection;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewActor, NewMovie};

pub(crate) const MOVIE_ACTOR_SELECT: &str = "SELECT m.id, m.title, m.description, m.release_date, m.rating, \
     a.id AS actor_id, a.name AS actor_name, a.gender AS actor_gender, a.birth_date AS actor_birth_date \
     FROM movie m \
     LEFT JOIN movie_actor ma ON ma.movie_id = m.id \
     LEFT JOIN actor a ON a.id = ma.actor_id";

pub(crate) const ACTOR_MOVIE_SELECT: &str = "SELECT a.id, a.name, a.gender, a.birth_date, \
     m.id AS movie_id, m.title AS movie_title, m.description AS movie_description, \
     m.release_date AS movie_release_date, m.rating AS movie_rating \
     FROM actor a \
     LEFT JOIN movie_actor ma ON ma.actor_id = a.id \
     LEFT JOIN movie m ON m.id = ma.movie_id";

pub(crate) async fn find_actor(
    conn: &mut PgConnection,
    actor: &NewActor,
) -> Result<Option<i32>, DatabaseError> {
    let id = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM actor WHERE LOWER(name) = LOWER($1) AND gender = $2 AND birth_date = $3",
    )
    .bind(&actor.name)
    .bind(actor.gender.as_str())
    .bind(actor.birth_date)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

pub(crate) async fn insert_actor(
    conn: &mut PgConnection,
    actor: &NewActor,
) -> Result<i32, DatabaseError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO actor (name, gender, birth_date) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&actor.name)
    .bind(actor.gender.as_str())
    .bind(actor.birth_date)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DatabaseError::on_unique_violation(e, DatabaseError::DuplicateActor))
}

/// Resolves an embedded actor to its id, inserting it when absent. A concurrent
/// insert of the same actor resolves to that row instead of failing.
pub(crate) async fn find_or_insert_actor(
    conn: &mut PgConnection,
    actor: &NewActor,
) -> Result<i32, DatabaseError> {
    if let Some(id) = find_actor(conn, actor).await? {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i32>(
        "INSERT INTO actor (name, gender, birth_date) VALUES ($1, $2, $3) \
         ON CONFLICT DO NOTHING RETURNING id",
    )
    .bind(&actor.name)
    .bind(actor.gender.as_str())
    .bind(actor.birth_date)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(id) => {
            debug!("Inserted embedded actor {} ({})", id, actor.name);
            Ok(id)
        }
        None => find_actor(conn, actor)
            .await?
            // The conflicting row was removed again before we could read it
            .ok_or(DatabaseError::Sqlx(sqlx::Error::RowNotFound)),
    }
}

pub(crate) async fn find_movie(
    conn: &mut PgConnection,
    movie: &NewMovie,
) -> Result<Option<i32>, DatabaseError> {
    let id = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM movie \
         WHERE title = $1 AND description = $2 AND rating = $3 AND release_date = $4",
    )
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(movie.rating)
    .bind(movie.release_date)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

pub(crate) async fn insert_movie(
    conn: &mut PgConnection,
    movie: &NewMovie,
) -> Result<i32, DatabaseError> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO movie (title, description, release_date, rating) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(movie.release_date)
    .bind(movie.rating)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DatabaseError::on_unique_violation(e, DatabaseError::DuplicateMovie))
}

/// Movie counterpart of `find_or_insert_actor`.
pub(crate) async fn find_or_insert_movie(
    conn: &mut PgConnection,
    movie: &NewMovie,
) -> Result<i32, DatabaseError> {
    if let Some(id) = find_movie(conn, movie).await? {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i32>(
        "INSERT INTO movie (title, description, release_date, rating) \
         VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING RETURNING id",
    )
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(movie.release_date)
    .bind(movie.rating)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(id) => {
            debug!("Inserted embedded movie {} ({})", id, movie.title);
            Ok(id)
        }
        None => find_movie(conn, movie)
            .await?
            // The conflicting row was removed again before we could read it
            .ok_or(DatabaseError::Sqlx(sqlx::Error::RowNotFound)),
    }
}

/// Links a movie and an actor; linking an existing pair is a no-op.
pub(crate) async fn link(
    conn: &mut PgConnection,
    movie_id: i32,
    actor_id: i32,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO movie_actor (movie_id, actor_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(actor_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Makes `fragment` a literal for `ILIKE '%' || $n || '%'`.
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

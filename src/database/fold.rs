//! Reassembles nested catalog objects from flat LEFT JOIN rows.
//!
//! Rows are grouped by parent id in first-seen order. The parent columns of the
//! first row for an id become the record; every row contributes at most one
//! child. A row whose child columns are NULL (parent without links) adds
//! nothing, so childless parents come back with an empty list.

use chrono::NaiveDate;
use indexmap::IndexMap;
use sqlx::FromRow;

use crate::database::models::{Actor, ActorWithMovies, Movie, MovieWithActors};

pub trait Keyed {
    fn key(&self) -> i32;
}

pub trait WithChildren {
    type Child: Keyed;

    fn children(&self) -> &[Self::Child];
    fn push_child(&mut self, child: Self::Child);
}

/// One row of a parent-to-children join
pub trait JoinRow {
    type Parent: WithChildren;

    fn parent_id(&self) -> i32;
    fn split(self) -> (Self::Parent, Option<<Self::Parent as WithChildren>::Child>);
}

pub fn fold<R: JoinRow>(rows: impl IntoIterator<Item = R>) -> Vec<R::Parent> {
    let mut grouped: IndexMap<i32, R::Parent> = IndexMap::new();

    for row in rows {
        let id = row.parent_id();
        let (parent, child) = row.split();
        let entry = grouped.entry(id).or_insert(parent);

        if let Some(child) = child {
            // A parent reached through several join paths repeats its children
            if !entry.children().iter().any(|c| c.key() == child.key()) {
                entry.push_child(child);
            }
        }
    }

    grouped.into_values().collect()
}

impl Keyed for Actor {
    fn key(&self) -> i32 {
        self.id
    }
}

impl Keyed for Movie {
    fn key(&self) -> i32 {
        self.id
    }
}

impl WithChildren for MovieWithActors {
    type Child = Actor;

    fn children(&self) -> &[Actor] {
        &self.actors
    }

    fn push_child(&mut self, child: Actor) {
        self.actors.push(child);
    }
}

impl WithChildren for ActorWithMovies {
    type Child = Movie;

    fn children(&self) -> &[Movie] {
        &self.movies
    }

    fn push_child(&mut self, child: Movie) {
        self.movies.push(child);
    }
}

/// `movie LEFT JOIN movie_actor LEFT JOIN actor`
#[derive(Debug, Clone, FromRow)]
pub struct MovieActorRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: i32,
    pub actor_id: Option<i32>,
    pub actor_name: Option<String>,
    pub actor_gender: Option<String>,
    pub actor_birth_date: Option<NaiveDate>,
}

impl MovieActorRow {
    pub fn new(movie: &Movie, actor: Option<&Actor>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_date: movie.release_date,
            rating: movie.rating,
            actor_id: actor.map(|a| a.id),
            actor_name: actor.map(|a| a.name.clone()),
            actor_gender: actor.map(|a| a.gender.clone()),
            actor_birth_date: actor.map(|a| a.birth_date),
        }
    }
}

impl JoinRow for MovieActorRow {
    type Parent = MovieWithActors;

    fn parent_id(&self) -> i32 {
        self.id
    }

    fn split(self) -> (MovieWithActors, Option<Actor>) {
        let actor = match (
            self.actor_id,
            self.actor_name,
            self.actor_gender,
            self.actor_birth_date,
        ) {
            (Some(id), Some(name), Some(gender), Some(birth_date)) => Some(Actor {
                id,
                name,
                gender,
                birth_date,
            }),
            _ => None,
        };

        let movie = MovieWithActors {
            id: self.id,
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            rating: self.rating,
            actors: Vec::new(),
        };
        (movie, actor)
    }
}

/// `actor LEFT JOIN movie_actor LEFT JOIN movie`
#[derive(Debug, Clone, FromRow)]
pub struct ActorMovieRow {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub movie_id: Option<i32>,
    pub movie_title: Option<String>,
    pub movie_description: Option<String>,
    pub movie_release_date: Option<NaiveDate>,
    pub movie_rating: Option<i32>,
}

impl ActorMovieRow {
    pub fn new(actor: &Actor, movie: Option<&Movie>) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            gender: actor.gender.clone(),
            birth_date: actor.birth_date,
            movie_id: movie.map(|m| m.id),
            movie_title: movie.map(|m| m.title.clone()),
            movie_description: movie.map(|m| m.description.clone()),
            movie_release_date: movie.map(|m| m.release_date),
            movie_rating: movie.map(|m| m.rating),
        }
    }
}

impl JoinRow for ActorMovieRow {
    type Parent = ActorWithMovies;

    fn parent_id(&self) -> i32 {
        self.id
    }

    fn split(self) -> (ActorWithMovies, Option<Movie>) {
        let movie = match (
            self.movie_id,
            self.movie_title,
            self.movie_release_date,
            self.movie_rating,
        ) {
            (Some(id), Some(title), Some(release_date), Some(rating)) => Some(Movie {
                id,
                title,
                description: self.movie_description.unwrap_or_default(),
                release_date,
                rating,
            }),
            _ => None,
        };

        let actor = ActorWithMovies {
            id: self.id,
            name: self.name,
            gender: self.gender,
            birth_date: self.birth_date,
            movies: Vec::new(),
        };
        (actor, movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn movie(id: i32, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            description: String::new(),
            release_date: date("2000-01-01"),
            rating: 7,
        }
    }

    fn actor(id: i32, name: &str) -> Actor {
        Actor {
            id,
            name: name.to_string(),
            gender: "female".to_string(),
            birth_date: date("1980-05-05"),
        }
    }

    #[test]
    fn groups_rows_by_parent_in_first_seen_order() {
        let (m1, m2) = (movie(2, "B"), movie(1, "A"));
        let (a1, a2) = (actor(10, "X"), actor(11, "Y"));
        let rows = vec![
            MovieActorRow::new(&m1, Some(&a1)),
            MovieActorRow::new(&m2, Some(&a2)),
            MovieActorRow::new(&m1, Some(&a2)),
        ];

        let movies = fold(rows);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 2);
        assert_eq!(
            movies[0].actors.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(movies[1].id, 1);
        assert_eq!(movies[1].actors.len(), 1);
    }

    #[test]
    fn null_child_columns_yield_empty_list() {
        let a = actor(3, "Jane");
        let actors = fold(vec![ActorMovieRow::new(&a, None)]);
        assert_eq!(actors.len(), 1);
        assert!(actors[0].movies.is_empty());
    }

    #[test]
    fn repeated_child_is_appended_once() {
        let m = movie(5, "Heat");
        let a = actor(9, "Val");
        let rows = vec![
            MovieActorRow::new(&m, Some(&a)),
            MovieActorRow::new(&m, Some(&a)),
        ];
        assert_eq!(fold(rows)[0].actors.len(), 1);
    }

    #[test]
    fn empty_input_folds_to_empty_output() {
        let rows: Vec<MovieActorRow> = Vec::new();
        assert!(fold(rows).is_empty());
    }
}

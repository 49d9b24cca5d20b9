use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::database::fold::{fold, ActorMovieRow, MovieActorRow};
use crate::database::models::{
    Actor, ActorWithMovies, InputActor, InputMovie, Movie, MovieWithActors, NewActor, NewMovie,
    User, ROLE_USER,
};
use crate::database::sort::{MovieSort, MovieSortColumn, SortDirection};
use crate::database::{ActorRepository, AuthorizationRepository, DatabaseError, MovieRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    actors: Vec<Actor>,
    movies: Vec<Movie>,
    /// (movie_id, actor_id)
    links: BTreeSet<(i32, i32)>,
    next_user_id: i32,
    next_actor_id: i32,
    next_movie_id: i32,
}

impl Tables {
    fn find_actor(&self, actor: &NewActor) -> Option<i32> {
        self.actors
            .iter()
            .find(|a| {
                a.name.to_lowercase() == actor.name.to_lowercase()
                    && a.gender == actor.gender.as_str()
                    && a.birth_date == actor.birth_date
            })
            .map(|a| a.id)
    }

    fn insert_actor(&mut self, actor: &NewActor) -> i32 {
        self.next_actor_id += 1;
        self.actors.push(Actor {
            id: self.next_actor_id,
            name: actor.name.clone(),
            gender: actor.gender.as_str().to_string(),
            birth_date: actor.birth_date,
        });
        self.next_actor_id
    }

    fn find_or_insert_actor(&mut self, actor: &NewActor) -> i32 {
        match self.find_actor(actor) {
            Some(id) => id,
            None => self.insert_actor(actor),
        }
    }

    fn find_movie(&self, movie: &NewMovie) -> Option<i32> {
        self.movies
            .iter()
            .find(|m| {
                m.title == movie.title
                    && m.description == movie.description
                    && m.rating == movie.rating
                    && m.release_date == movie.release_date
            })
            .map(|m| m.id)
    }

    fn insert_movie(&mut self, movie: &NewMovie) -> i32 {
        self.next_movie_id += 1;
        self.movies.push(Movie {
            id: self.next_movie_id,
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_date: movie.release_date,
            rating: movie.rating,
        });
        self.next_movie_id
    }

    fn find_or_insert_movie(&mut self, movie: &NewMovie) -> i32 {
        match self.find_movie(movie) {
            Some(id) => id,
            None => self.insert_movie(movie),
        }
    }

    fn actor_rows(&self, actors: &[&Actor]) -> Vec<ActorMovieRow> {
        let mut rows = Vec::new();
        for actor in actors {
            let mut movies: Vec<&Movie> = self
                .movies
                .iter()
                .filter(|m| self.links.contains(&(m.id, actor.id)))
                .collect();
            movies.sort_by_key(|m| m.id);

            if movies.is_empty() {
                rows.push(ActorMovieRow::new(actor, None));
            }
            rows.extend(movies.into_iter().map(|m| ActorMovieRow::new(actor, Some(m))));
        }
        rows
    }

    fn movie_rows(&self, movies: &[&Movie]) -> Vec<MovieActorRow> {
        let mut rows = Vec::new();
        for movie in movies {
            let mut actors: Vec<&Actor> = self
                .actors
                .iter()
                .filter(|a| self.links.contains(&(movie.id, a.id)))
                .collect();
            actors.sort_by_key(|a| a.id);

            if actors.is_empty() {
                rows.push(MovieActorRow::new(movie, None));
            }
            rows.extend(actors.into_iter().map(|a| MovieActorRow::new(movie, Some(a))));
        }
        rows
    }
}

/// In-memory stand-in for the Postgres stores, sharing their semantics
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }

    pub fn actor_count(&self) -> usize {
        self.with(|t| t.actors.len())
    }

    pub fn movie_count(&self) -> usize {
        self.with(|t| t.movies.len())
    }

    pub fn link_count(&self) -> usize {
        self.with(|t| t.links.len())
    }

    pub fn set_role(&self, username: &str, role: &str) {
        self.with(|t| {
            if let Some(user) = t.users.iter_mut().find(|u| u.username == username) {
                user.role = role.to_string();
            }
        })
    }
}

fn compare(sort: &MovieSort, a: &Movie, b: &Movie) -> Ordering {
    let primary = match sort.column {
        MovieSortColumn::Id => a.id.cmp(&b.id),
        MovieSortColumn::Title => a.title.cmp(&b.title),
        MovieSortColumn::Rating => a.rating.cmp(&b.rating),
        MovieSortColumn::ReleaseDate => a.release_date.cmp(&b.release_date),
    };
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl AuthorizationRepository for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i32, DatabaseError> {
        self.with(|t| {
            if t.users.iter().any(|u| u.username == username) {
                return Err(DatabaseError::DuplicateUser(username.to_string()));
            }
            t.next_user_id += 1;
            t.users.push(User {
                id: t.next_user_id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role: ROLE_USER.to_string(),
            });
            Ok(t.next_user_id)
        })
    }

    async fn get_user(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        self.with(|t| {
            t.users
                .iter()
                .find(|u| u.username == username && u.password_hash == password_hash)
                .cloned()
                .ok_or_else(|| DatabaseError::not_found("user not found"))
        })
    }
}

#[async_trait]
impl ActorRepository for MemoryStore {
    async fn create_actor(&self, actor: &NewActor, movies: &[NewMovie]) -> Result<i32, DatabaseError> {
        self.with(|t| {
            if t.find_actor(actor).is_some() {
                return Err(DatabaseError::DuplicateActor);
            }
            let id = t.insert_actor(actor);
            for movie in movies {
                let movie_id = t.find_or_insert_movie(movie);
                t.links.insert((movie_id, id));
            }
            Ok(id)
        })
    }

    async fn get_all_actors(&self) -> Result<Vec<ActorWithMovies>, DatabaseError> {
        self.with(|t| {
            let mut actors: Vec<&Actor> = t.actors.iter().collect();
            actors.sort_by_key(|a| a.id);
            Ok(fold(t.actor_rows(&actors)))
        })
    }

    async fn get_actor(&self, id: i32) -> Result<ActorWithMovies, DatabaseError> {
        self.with(|t| {
            let actors: Vec<&Actor> = t.actors.iter().filter(|a| a.id == id).collect();
            fold(t.actor_rows(&actors))
                .into_iter()
                .next()
                .ok_or_else(|| DatabaseError::not_found(format!("actor {} not found", id)))
        })
    }

    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError> {
        self.with(|t| {
            let before = t.actors.len();
            t.actors.retain(|a| a.id != id);
            if t.actors.len() == before {
                return Err(DatabaseError::not_found(format!("actor {} not found", id)));
            }
            t.links.retain(|(_, actor_id)| *actor_id != id);
            Ok(())
        })
    }

    async fn update_actor(&self, id: i32, input: &InputActor) -> Result<(), DatabaseError> {
        self.with(|t| {
            let index = t
                .actors
                .iter()
                .position(|a| a.id == id)
                .ok_or_else(|| DatabaseError::not_found(format!("actor {} not found", id)))?;

            let mut updated = t.actors[index].clone();
            if let Some(name) = &input.name {
                updated.name = name.clone();
            }
            if let Some(gender) = input.gender {
                updated.gender = gender.as_str().to_string();
            }
            if let Some(birth_date) = input.birth_date {
                updated.birth_date = birth_date;
            }
            let clash = t.actors.iter().any(|a| {
                a.id != id
                    && a.name.to_lowercase() == updated.name.to_lowercase()
                    && a.gender == updated.gender
                    && a.birth_date == updated.birth_date
            });
            if clash {
                return Err(DatabaseError::DuplicateActor);
            }
            t.actors[index] = updated;

            match input.movies.as_deref() {
                None => {}
                Some([]) => t.links.retain(|(_, actor_id)| *actor_id != id),
                Some(movies) => {
                    for movie in movies {
                        let movie_id = t.find_or_insert_movie(movie);
                        t.links.insert((movie_id, id));
                    }
                }
            }
            Ok(())
        })
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn get_all_movies(&self, sort: MovieSort) -> Result<Vec<MovieWithActors>, DatabaseError> {
        self.with(|t| {
            let mut movies: Vec<&Movie> = t.movies.iter().collect();
            movies.sort_by(|a, b| compare(&sort, a, b));
            Ok(fold(t.movie_rows(&movies)))
        })
    }

    async fn create_movie(&self, movie: &NewMovie, actors: &[NewActor]) -> Result<i32, DatabaseError> {
        self.with(|t| {
            if t.find_movie(movie).is_some() {
                return Err(DatabaseError::DuplicateMovie);
            }
            let id = t.insert_movie(movie);
            for actor in actors {
                let actor_id = t.find_or_insert_actor(actor);
                t.links.insert((id, actor_id));
            }
            Ok(id)
        })
    }

    async fn get_movie(&self, id: i32) -> Result<MovieWithActors, DatabaseError> {
        self.with(|t| {
            let movies: Vec<&Movie> = t.movies.iter().filter(|m| m.id == id).collect();
            fold(t.movie_rows(&movies))
                .into_iter()
                .next()
                .ok_or_else(|| DatabaseError::not_found(format!("movie {} not found", id)))
        })
    }

    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError> {
        self.with(|t| {
            let before = t.movies.len();
            t.movies.retain(|m| m.id != id);
            if t.movies.len() == before {
                return Err(DatabaseError::not_found(format!("movie {} not found", id)));
            }
            t.links.retain(|(movie_id, _)| *movie_id != id);
            Ok(())
        })
    }

    async fn update_movie(&self, id: i32, input: &InputMovie) -> Result<(), DatabaseError> {
        self.with(|t| {
            let index = t
                .movies
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| DatabaseError::not_found(format!("movie {} not found", id)))?;

            let mut updated = t.movies[index].clone();
            if let Some(title) = &input.title {
                updated.title = title.clone();
            }
            if let Some(description) = &input.description {
                updated.description = description.clone();
            }
            if let Some(release_date) = input.release_date {
                updated.release_date = release_date;
            }
            if let Some(rating) = input.rating {
                updated.rating = rating;
            }
            let clash = t.movies.iter().any(|m| {
                m.id != id
                    && m.title == updated.title
                    && m.description == updated.description
                    && m.rating == updated.rating
                    && m.release_date == updated.release_date
            });
            if clash {
                return Err(DatabaseError::DuplicateMovie);
            }
            t.movies[index] = updated;

            match input.actors.as_deref() {
                None => {}
                Some([]) => t.links.retain(|(movie_id, _)| *movie_id != id),
                Some(actors) => {
                    for actor in actors {
                        let actor_id = t.find_or_insert_actor(actor);
                        t.links.insert((id, actor_id));
                    }
                }
            }
            Ok(())
        })
    }

    async fn search_by_title(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let needle = fragment.to_lowercase();
        self.with(|t| {
            let mut movies: Vec<&Movie> = t
                .movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .collect();
            movies.sort_by_key(|m| m.id);
            Ok(fold(t.movie_rows(&movies)))
        })
    }

    async fn search_by_actor(&self, fragment: &str) -> Result<Vec<MovieWithActors>, DatabaseError> {
        let needle = fragment.to_lowercase();
        self.with(|t| {
            let mut movies: Vec<&Movie> = t
                .movies
                .iter()
                .filter(|m| {
                    t.actors.iter().any(|a| {
                        t.links.contains(&(m.id, a.id)) && a.name.to_lowercase().contains(&needle)
                    })
                })
                .collect();
            movies.sort_by_key(|m| m.id);
            Ok(fold(t.movie_rows(&movies)))
        })
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::movie::{Movie, NewMovie};
use super::{check_text, ValidationError};

pub const NAME_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!(
                "invalid gender '{}', expected one of: male, female, other",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorWithMovies {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub movies: Vec<Movie>,
}

/// Full identity tuple of an actor, as embedded in movie payloads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewActor {
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
}

impl NewActor {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name, NAME_MAX_LEN, false)
    }
}

/// Body of `POST /api/actor` and `PUT /api/actor/{id}`. Every field is
/// optional so the same shape serves partial updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputActor {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub movies: Option<Vec<NewMovie>>,
}

impl InputActor {
    /// Creation needs the whole identity tuple.
    pub fn into_new(self) -> Result<(NewActor, Vec<NewMovie>), ValidationError> {
        let actor = NewActor {
            name: self.name.ok_or_else(|| ValidationError::required("name"))?,
            gender: self.gender.ok_or_else(|| ValidationError::required("gender"))?,
            birth_date: self
                .birth_date
                .ok_or_else(|| ValidationError::required("birth_date"))?,
        };
        actor.validate()?;

        let movies = self.movies.unwrap_or_default();
        for movie in &movies {
            movie.validate()?;
        }
        Ok((actor, movies))
    }

    pub fn validate_patch(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_text("name", name, NAME_MAX_LEN, false)?;
        }
        for movie in self.movies.iter().flatten() {
            movie.validate()?;
        }
        Ok(())
    }

    pub fn has_field_changes(&self) -> bool {
        self.name.is_some() || self.gender.is_some() || self.birth_date.is_some()
    }
}

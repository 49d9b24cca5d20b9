use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::actor::{Actor, NewActor};
use super::{check_text, ValidationError};

pub const TITLE_MAX_LEN: usize = 150;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const RATING_MIN: i32 = 0;
pub const RATING_MAX: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieWithActors {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: i32,
    pub actors: Vec<Actor>,
}

/// Full identity tuple of a movie, as embedded in actor payloads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: i32,
}

impl NewMovie {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, TITLE_MAX_LEN, false)?;
        check_text("description", &self.description, DESCRIPTION_MAX_LEN, true)?;
        check_rating(self.rating)
    }
}

/// Body of `POST /api/movie` and `PUT /api/movie/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<i32>,
    pub actors: Option<Vec<NewActor>>,
}

impl InputMovie {
    pub fn into_new(self) -> Result<(NewMovie, Vec<NewActor>), ValidationError> {
        let movie = NewMovie {
            title: self.title.ok_or_else(|| ValidationError::required("title"))?,
            description: self.description.unwrap_or_default(),
            release_date: self
                .release_date
                .ok_or_else(|| ValidationError::required("release_date"))?,
            rating: self.rating.ok_or_else(|| ValidationError::required("rating"))?,
        };
        movie.validate()?;

        let actors = self.actors.unwrap_or_default();
        for actor in &actors {
            actor.validate()?;
        }
        Ok((movie, actors))
    }

    pub fn validate_patch(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_text("title", title, TITLE_MAX_LEN, false)?;
        }
        if let Some(description) = &self.description {
            check_text("description", description, DESCRIPTION_MAX_LEN, true)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        for actor in self.actors.iter().flatten() {
            actor.validate()?;
        }
        Ok(())
    }

    pub fn has_field_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.release_date.is_some()
            || self.rating.is_some()
    }
}

fn check_rating(rating: i32) -> Result<(), ValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(ValidationError::new(
            "rating",
            format!("must be between {} and {}", RATING_MIN, RATING_MAX),
        ));
    }
    Ok(())
}

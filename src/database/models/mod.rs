pub mod actor;
pub mod movie;
pub mod user;

pub use actor::{Actor, ActorWithMovies, Gender, InputActor, NewActor};
pub use movie::{InputMovie, Movie, MovieWithActors, NewMovie};
pub use user::{Credentials, User, ROLE_ADMIN, ROLE_USER};

use thiserror::Error;

/// A payload that parsed as JSON but violates a field rule
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "this field is required")
    }
}

pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max_len: usize,
    allow_empty: bool,
) -> Result<(), ValidationError> {
    if !allow_empty && value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }
    Ok(())
}

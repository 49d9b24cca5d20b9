//! Credential hashing and bearer token issue/validation.

pub mod password;
pub mod token;

pub use password::hash_password;
pub use token::{Claims, TokenService};

use thiserror::Error;

use crate::database::models::ValidationError;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signing key is not configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    TokenGeneration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

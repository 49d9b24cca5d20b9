use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::{hash_password, AuthError, Claims, TokenService};
use crate::database::models::{check_text, Credentials, ValidationError};
use crate::database::{AuthorizationRepository, DatabaseError};

const USERNAME_MAX_LEN: usize = 255;

pub struct AuthService {
    users: Arc<dyn AuthorizationRepository>,
    tokens: TokenService,
    salt: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn AuthorizationRepository>, tokens: TokenService, salt: impl Into<String>) -> Self {
        Self {
            users,
            tokens,
            salt: salt.into(),
        }
    }

    /// Registers a new account with role "user" and returns its id.
    pub async fn create_user(&self, credentials: &Credentials) -> Result<i32, AuthError> {
        check_text("username", &credentials.username, USERNAME_MAX_LEN, false)?;
        if credentials.password.is_empty() {
            return Err(ValidationError::new("password", "must not be empty").into());
        }

        let hash = hash_password(&self.salt, &credentials.password);
        let id = self.users.create_user(&credentials.username, &hash).await?;
        info!("Registered user {} ({})", id, credentials.username);
        Ok(id)
    }

    pub async fn generate_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let hash = hash_password(&self.salt, password);
        let user = self.users.get_user(username, &hash).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => AuthError::InvalidCredentials,
            other => AuthError::Store(other),
        })?;

        let token = self.tokens.issue(user.id, &user.role)?;
        debug!("Issued token for user {} with role {}", user.id, user.role);
        Ok(token)
    }

    pub fn parse_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.validate(token)
    }
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::Service;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Service>,
    /// Present when backed by Postgres; used by `/health`
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(services: Service, pool: Option<PgPool>) -> Self {
        Self {
            services: Arc::new(services),
            pool,
        }
    }
}

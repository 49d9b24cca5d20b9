// handlers/mod.rs - Route handlers, split by security tier
//
// Public (no auth, /auth/* and service info) → Protected (bearer token, /api/*)

pub mod protected;
pub mod public;

use crate::error::ApiError;

/// Parses a positive integer path id.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("Invalid {} ID", entity))),
    }
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}

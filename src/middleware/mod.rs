pub mod auth;
pub mod rbac;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use rbac::RequireAdmin;
pub use response::{ApiResponse, ApiResult, IdResponse, MessageResponse};

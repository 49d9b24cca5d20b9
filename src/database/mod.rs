pub mod fold;
pub mod manager;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;
pub mod sort;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{ActorRepository, AuthorizationRepository, MovieRepository, Repository};
pub use sort::{MovieSort, SortError};

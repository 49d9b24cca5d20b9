// handlers/protected/mod.rs - Catalog handlers (bearer token required)
//
// Reads are open to any authenticated role; mutations take `RequireAdmin`.

pub mod actors;
pub mod movies;

// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod outcome;
pub mod repository;

pub use outcome::Outcome;
pub use repository::RepositoryRef;

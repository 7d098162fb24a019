//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL document tables via SeaORM

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use memory::{InMemoryCategoryRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;

//! In-memory document store - used when no database is configured.

mod document_store;

pub use document_store::{Document, InMemoryRepository};

use quill_core::domain::{Category, Post};

/// In-memory category repository.
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

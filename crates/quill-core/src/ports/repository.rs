use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Every record, in the order the store returns them.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Fails with `Constraint` if a unique key collides.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository with domain-specific methods.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// Batch lookup used to resolve post references. Missing ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {}

//! A process-local document collection behind an async RwLock.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Post};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};

/// A record that can live in an [`InMemoryRepository`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Value of a unique secondary index, if the collection has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Document for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Document for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// In-memory collection that keeps insertion order.
///
/// Writes to the same collection are serialized by the lock; nothing
/// coordinates across requests beyond that. Data is lost on restart.
pub struct InMemoryRepository<T> {
    docs: RwLock<Vec<T>>,
}

impl<T: Document> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Document> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn key_collides<T: Document>(docs: &[T], candidate: &T) -> bool {
    let Some(key) = candidate.unique_key() else {
        return false;
    };
    docs.iter()
        .any(|d| d.id() != candidate.id() && d.unique_key() == Some(key))
}

#[async_trait]
impl<T: Document> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.docs.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| d.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut docs = self.docs.write().await;
        if docs.iter().any(|d| d.id() == entity.id()) {
            return Err(RepoError::Constraint("duplicate id".to_string()));
        }
        if key_collides(&docs, &entity) {
            return Err(RepoError::Constraint("duplicate unique key".to_string()));
        }
        docs.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut docs = self.docs.write().await;
        if key_collides(&docs, &entity) {
            return Err(RepoError::Constraint("duplicate unique key".to_string()));
        }
        let slot = docs
            .iter_mut()
            .find(|d| d.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| d.id() != id);
        if docs.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository<Category> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|c| c.name == name).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository<Post> {}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::NewCategory;

    fn category(name: &str) -> Category {
        Category::new(NewCategory {
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn test_insert_and_find_keeps_order() {
        let repo = InMemoryRepository::<Category>::new();
        let a = repo.insert(category("Tech")).await.unwrap();
        let b = repo.insert(category("Life")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![a.clone(), b]);
        assert_eq!(repo.find_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_unique_name_is_enforced_by_store() {
        let repo = InMemoryRepository::<Category>::new();
        repo.insert(category("Tech")).await.unwrap();

        let result = repo.insert(category("Tech")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));

        // Case-sensitive
        repo.insert(category("tech")).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let repo = InMemoryRepository::<Category>::new();
        repo.insert(category("Tech")).await.unwrap();
        assert!(repo.find_by_name("TECH").await.unwrap().is_none());
        assert!(repo.find_by_name("Tech").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryRepository::<Category>::new();
        let ghost = category("Ghost");
        assert!(matches!(
            repo.update(ghost.clone()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.delete(ghost.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_missing() {
        let repo = InMemoryRepository::<Category>::new();
        let tech = repo.insert(category("Tech")).await.unwrap();

        let found = repo.find_by_ids(&[tech.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found, vec![tech]);
    }
}

//! Blog persistence-access service.
//!
//! Enforces what the store does not: a post's category reference must
//! resolve at write time, and every read joins the category's name in.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, CategoryRef, NewCategory, NewPost, PopulatedPost, Post, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, PostRepository};
use crate::validation;

const POST: &str = "Post";
const DUPLICATE_CATEGORY: &str = "Category with this name already exists";

/// CRUD over posts and categories with reference-integrity checks.
///
/// Built once at startup and shared by every request.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { posts, categories }
    }

    /// All posts with categories resolved, in store order.
    pub async fn list_posts(&self) -> Result<Vec<PopulatedPost>, DomainError> {
        let posts = self.posts.find_all().await?;
        tracing::debug!(count = posts.len(), "Listing posts");
        self.resolve(posts).await
    }

    pub async fn get_post(&self, id: &str) -> Result<PopulatedPost, DomainError> {
        let id = validation::parse_id(id)?;
        let post = self.find_post(id).await?;
        let mut resolved = self.resolve(vec![post]).await?;
        resolved.pop().ok_or(DomainError::NotFound {
            entity_type: POST,
            id,
        })
    }

    pub async fn create_post(&self, input: NewPost) -> Result<PopulatedPost, DomainError> {
        // Read-then-write: the reference is checked immediately before the insert.
        let category = self.existing_category(input.category).await?;

        let post = Post::new(input);
        validation::check_post(&post)?;
        let created = self.posts.insert(post).await?;

        tracing::info!(post_id = %created.id, category_id = %category.id, "Post created");
        Ok(created.populate(Some(CategoryRef::from(&category))))
    }

    pub async fn update_post(
        &self,
        id: &str,
        patch: PostPatch,
    ) -> Result<PopulatedPost, DomainError> {
        let id = validation::parse_id(id)?;
        let mut post = self.find_post(id).await?;

        let category = match patch.category {
            Some(category_id) => Some(self.existing_category(category_id).await?),
            None => None,
        };

        post.apply(patch);
        validation::check_post(&post)?;
        let updated = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: POST,
                id,
            },
            other => other.into(),
        })?;

        tracing::info!(post_id = %updated.id, "Post updated");
        match category {
            Some(category) => Ok(updated.populate(Some(CategoryRef::from(&category)))),
            None => {
                let mut resolved = self.resolve(vec![updated]).await?;
                resolved.pop().ok_or(DomainError::NotFound {
                    entity_type: POST,
                    id,
                })
            }
        }
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        let id = validation::parse_id(id)?;
        self.find_post(id).await?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: POST,
                id,
            },
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, "Post removed");
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    /// Create a category. The name check is not race-free; the store's
    /// unique index is the backstop and surfaces as the same error.
    pub async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        if self.categories.find_by_name(&input.name).await?.is_some() {
            tracing::warn!(name = %input.name, "Rejected duplicate category");
            return Err(DomainError::Duplicate(DUPLICATE_CATEGORY.to_string()));
        }

        let category = Category::new(input);
        validation::check_category(&category)?;
        let created = self.categories.insert(category).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Duplicate(DUPLICATE_CATEGORY.to_string()),
            other => other.into(),
        })?;

        tracing::info!(category_id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }

    async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts.find_by_id(id).await?.ok_or(DomainError::NotFound {
            entity_type: POST,
            id,
        })
    }

    async fn existing_category(&self, id: Uuid) -> Result<Category, DomainError> {
        match self.categories.find_by_id(id).await? {
            Some(category) => Ok(category),
            None => {
                tracing::warn!(category_id = %id, "Rejected write with unknown category");
                Err(DomainError::InvalidReference { id })
            }
        }
    }

    /// Read-time join: one batched category lookup for the whole page.
    async fn resolve(&self, posts: Vec<Post>) -> Result<Vec<PopulatedPost>, DomainError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.category).collect();
        ids.sort_unstable();
        ids.dedup();

        let names: HashMap<Uuid, CategoryRef> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.categories
                .find_by_ids(&ids)
                .await?
                .iter()
                .map(|c| (c.id, CategoryRef::from(c)))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let category = names.get(&post.category).cloned();
                if category.is_none() {
                    tracing::warn!(post_id = %post.id, category_id = %post.category, "Dangling category reference");
                }
                post.populate(category)
            })
            .collect())
    }
}

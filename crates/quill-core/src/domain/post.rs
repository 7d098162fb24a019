use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CategoryRef;

/// Post entity - a blog article as stored.
///
/// `category` is a non-owning reference by id; it is resolved into a
/// [`CategoryRef`] at read time, never denormalized into storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Uuid,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, defaulting `tags` to empty and `published` to false.
    pub fn new(input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            author: input.author,
            category: input.category,
            tags: input.tags.unwrap_or_default(),
            published: input.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Omitted fields keep their stored value.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        // An explicit empty list or `false` is a real update, not an omission.
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }

    /// Join the resolved category into the read shape.
    pub fn populate(self, category: Option<CategoryRef>) -> PopulatedPost {
        PopulatedPost {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            category,
            tags: self.tags,
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Uuid,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

/// Validated partial update. `None` means the field was omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

/// A post as returned on every read path, with its category resolved.
///
/// `category` is `None` when the referenced category no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Option<CategoryRef>,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedPost {
    /// Display name of the category, or `N/A` for a dangling reference.
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("N/A", |c| c.name.as_str())
    }
}

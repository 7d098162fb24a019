//! Page models.
//!
//! Each page owns the state of its requests and renders itself to plain
//! text. Rendering never fails: loading and error states have their own
//! output.

mod post_form;
mod post_list;
mod single_post;

pub use post_form::{FormMode, PostForm, PostFormPage};
pub use post_list::PostListPage;
pub use single_post::SinglePostPage;

use crate::error::ClientResult;

/// State of a request that feeds a page.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use quill_core::domain::{CategoryRef, PopulatedPost};
    use uuid::Uuid;

    pub(crate) fn post(category: Option<&str>) -> PopulatedPost {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        PopulatedPost {
            id: Uuid::nil(),
            title: "Hello World".to_string(),
            content: "1234567890".to_string(),
            author: "Ann".to_string(),
            category: category.map(|name| CategoryRef {
                id: Uuid::from_u128(1),
                name: name.to_string(),
            }),
            tags: vec!["rust".to_string(), "web".to_string()],
            published: false,
            created_at: at,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_from_result() {
        assert_eq!(ViewState::from_result(Ok(1)), ViewState::Ready(1));
        let failed: ViewState<i32> = ViewState::from_result(Err(ClientError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));
        assert_eq!(failed, ViewState::Failed("Internal Server Error".to_string()));
        assert!(ViewState::<i32>::default().is_loading());
    }
}

use std::fmt::Write;

use quill_core::domain::PopulatedPost;

use super::{ViewState, yes_no};
use crate::api::ApiClient;

const EXCERPT_CHARS: usize = 150;

/// All posts, newest data from the server.
#[derive(Debug, Clone, Default)]
pub struct PostListPage {
    pub state: ViewState<Vec<PopulatedPost>>,
}

impl PostListPage {
    pub async fn load(api: &ApiClient) -> Self {
        Self {
            state: ViewState::from_result(api.list_posts().await),
        }
    }

    pub fn render(&self) -> String {
        let posts = match &self.state {
            ViewState::Loading => return "Loading posts...".to_string(),
            ViewState::Failed(message) => return format!("Error: {}", message),
            ViewState::Ready(posts) if posts.is_empty() => {
                return "No posts found. Create one?".to_string();
            }
            ViewState::Ready(posts) => posts,
        };

        let mut out = String::from("All Blog Posts\n");
        for post in posts {
            let _ = write!(
                out,
                "\n{}\n  By {}\n  Category: {}\n  Published: {}\n",
                post.title,
                post.author,
                post.category_name(),
                yes_no(post.published)
            );
            if !post.tags.is_empty() {
                let _ = writeln!(out, "  Tags: {}", post.tags.join(", "));
            }
            let _ = writeln!(out, "  {}", excerpt(&post.content));
            let _ = writeln!(out, "  [{}]", post.id);
        }
        out
    }
}

fn excerpt(content: &str) -> String {
    let cut: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures;

    #[test]
    fn test_states() {
        assert_eq!(PostListPage::default().render(), "Loading posts...");

        let page = PostListPage {
            state: ViewState::Failed("HTTP error! Status: 500".to_string()),
        };
        assert_eq!(page.render(), "Error: HTTP error! Status: 500");

        let page = PostListPage {
            state: ViewState::Ready(Vec::new()),
        };
        assert_eq!(page.render(), "No posts found. Create one?");
    }

    #[test]
    fn test_dangling_category_renders_na() {
        let page = PostListPage {
            state: ViewState::Ready(vec![fixtures::post(Some("Tech")), fixtures::post(None)]),
        };
        let out = page.render();

        assert!(out.contains("Category: Tech"));
        assert!(out.contains("Category: N/A"));
        assert!(out.contains("Tags: rust, web"));
        assert!(out.contains("Published: No"));
        assert!(out.contains("1234567890..."));
    }

    #[test]
    fn test_excerpt_counts_chars() {
        let long = "é".repeat(200);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_CHARS + 3);
    }

    #[tokio::test]
    async fn test_load_from_server() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/posts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let page = PostListPage::load(&ApiClient::new(server.url())).await;
        assert_eq!(page.state, ViewState::Ready(Vec::new()));
    }
}

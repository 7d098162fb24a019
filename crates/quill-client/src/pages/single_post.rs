use std::fmt::Write;

use quill_core::domain::PopulatedPost;
use quill_shared::MessageResponse;

use super::{ViewState, yes_no};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::navigation::{Flash, Navigator, Optimistic, Route, navigate_then_mutate};

/// One post, plus any annotation carried over from the previous page.
#[derive(Debug, Clone)]
pub struct SinglePostPage {
    pub id: String,
    pub state: ViewState<PopulatedPost>,
    pub flash: Option<Flash>,
}

impl SinglePostPage {
    pub async fn load(api: &ApiClient, id: &str, flash: Option<Flash>) -> Self {
        Self {
            id: id.to_string(),
            state: ViewState::from_result(api.get_post(id).await),
            flash,
        }
    }

    /// Leave for the post list right away, then delete.
    ///
    /// On failure the user is sent back to this post with the error.
    pub async fn delete<N: Navigator + ?Sized>(
        &self,
        api: &ApiClient,
        nav: &mut N,
    ) -> ClientResult<MessageResponse> {
        let plan = Optimistic {
            success: Route::Home,
            notice: Some(Flash::Info("Post is being deleted...".to_string())),
            fallback: Route::Post(self.id.clone()),
            failure: "Failed to delete post".to_string(),
        };
        navigate_then_mutate(nav, plan, api.delete_post(&self.id)).await
    }

    pub fn render(&self) -> String {
        let post = match &self.state {
            ViewState::Loading => return "Loading post...".to_string(),
            ViewState::Failed(message) => return format!("Error: {}", message),
            ViewState::Ready(post) => post,
        };

        let mut out = String::new();
        match &self.flash {
            Some(Flash::Info(text)) => {
                let _ = writeln!(out, "[info] {}\n", text);
            }
            Some(Flash::Error(text)) => {
                let _ = writeln!(out, "[error] {}\n", text);
            }
            None => {}
        }

        let _ = writeln!(out, "{}", post.title);
        let _ = writeln!(
            out,
            "By {} | Category: {}",
            post.author,
            post.category_name()
        );
        let _ = writeln!(out, "Published: {}", yes_no(post.published));
        if !post.tags.is_empty() {
            let _ = writeln!(out, "Tags: {}", post.tags.join(", "));
        }
        let _ = writeln!(out, "\n{}", post.content);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::tests::RecordingNavigator;
    use crate::pages::fixtures;

    fn ready(category: Option<&str>, flash: Option<Flash>) -> SinglePostPage {
        SinglePostPage {
            id: "42".to_string(),
            state: ViewState::Ready(fixtures::post(category)),
            flash,
        }
    }

    #[test]
    fn test_render() {
        let out = ready(Some("Tech"), None).render();
        assert!(out.starts_with("Hello World\n"));
        assert!(out.contains("By Ann | Category: Tech"));
        assert!(out.contains("Published: No"));
        assert!(out.ends_with("1234567890\n"));
    }

    #[test]
    fn test_render_dangling_category_and_flash() {
        let flash = Flash::Error("Failed to delete post: Post not found".to_string());
        let out = ready(None, Some(flash)).render();
        assert!(out.starts_with("[error] Failed to delete post: Post not found"));
        assert!(out.contains("Category: N/A"));
    }

    #[test]
    fn test_render_states() {
        let mut page = ready(None, None);
        page.state = ViewState::Loading;
        assert_eq!(page.render(), "Loading post...");
        page.state = ViewState::Failed("Post not found".to_string());
        assert_eq!(page.render(), "Error: Post not found");
    }

    #[tokio::test]
    async fn test_failed_delete_returns_to_post() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/posts/42")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":[{"field":"id","message":"Invalid ID format"}]}"#)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();
        let result = ready(Some("Tech"), None).delete(&api, &mut nav).await;

        assert!(result.is_err());
        assert_eq!(nav.visits[0].0, Route::Home);
        assert_eq!(
            nav.visits[1],
            (
                Route::Post("42".to_string()),
                Some(Flash::Error(
                    "Failed to delete post: Validation Error: Invalid ID format".to_string()
                ))
            )
        );
    }

    #[tokio::test]
    async fn test_delete_success_stays_home() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/posts/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Post removed"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();
        let ack = ready(Some("Tech"), None)
            .delete(&api, &mut nav)
            .await
            .unwrap();

        assert_eq!(ack.message, "Resource deleted successfully");
        assert_eq!(
            nav.visits,
            vec![(
                Route::Home,
                Some(Flash::Info("Post is being deleted...".to_string()))
            )]
        );
    }
}

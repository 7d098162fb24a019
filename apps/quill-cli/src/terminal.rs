//! Navigation for a one-shot terminal session.

use quill_client::pages::{FormMode, PostFormPage, PostListPage, SinglePostPage};
use quill_client::{ApiClient, Flash, Navigator, Route};

/// Remembers the last route; the command renders it once it finishes.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Option<(Route, Option<Flash>)>,
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: Route, flash: Option<Flash>) {
        tracing::debug!(route = %route, "navigate");
        self.current = Some((route, flash));
    }
}

impl TerminalNavigator {
    pub async fn render_current(&self, api: &ApiClient) -> String {
        match &self.current {
            Some((route, flash)) => render_route(api, route, flash.clone()).await,
            None => PostListPage::load(api).await.render(),
        }
    }
}

/// Load and render the page behind `route`.
pub async fn render_route(api: &ApiClient, route: &Route, flash: Option<Flash>) -> String {
    match route {
        Route::Home => {
            let list = PostListPage::load(api).await.render();
            match flash {
                Some(flash) => format!("{}\n\n{}", flash.text(), list),
                None => list,
            }
        }
        Route::Post(id) => SinglePostPage::load(api, id, flash).await.render(),
        Route::NewPost => PostFormPage::load(api, FormMode::Create).await.render(),
        Route::EditPost(id) => {
            PostFormPage::load(api, FormMode::Edit(id.clone()))
                .await
                .render()
        }
    }
}

use std::fmt::Write;

use quill_core::ValidationErrors;
use quill_core::domain::{Category, PopulatedPost};
use quill_core::schema::post as rules;
use quill_core::validation::validate_create_post;
use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};
use serde_json::{Value, json};

use super::ViewState;
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::navigation::{Flash, Navigator, Route};

const CONTROLS: [&str; 6] = [
    rules::TITLE.field,
    rules::CONTENT.field,
    rules::AUTHOR.field,
    rules::CATEGORY.field,
    rules::TAGS.field,
    rules::PUBLISHED.field,
];

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub author: String,
    /// Selected category id, empty when none is chosen.
    pub category: String,
    /// Comma-separated.
    pub tags: String,
    pub published: bool,
}

impl PostForm {
    pub fn from_post(post: &PopulatedPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            category: post
                .category
                .as_ref()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            tags: post.tags.join(", "),
            published: post.published,
        }
    }

    /// Tags split on commas, trimmed, blanks dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn payload(&self) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "author": self.author,
            "category": self.category,
            "tags": self.tag_list(),
            "published": self.published,
        })
    }

    /// Run the same field rules the server applies to a new post.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_create_post(&self.payload()).map(|_| ())
    }

    pub fn create_request(&self) -> CreatePostRequest {
        CreatePostRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
            tags: Some(self.tag_list()),
            published: Some(self.published),
        }
    }

    pub fn update_request(&self) -> UpdatePostRequest {
        UpdatePostRequest {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            author: Some(self.author.clone()),
            category: Some(self.category.clone()),
            tags: Some(self.tag_list()),
            published: Some(self.published),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit(_) => "update",
        }
    }
}

/// Create or edit form for a post.
#[derive(Debug, Clone)]
pub struct PostFormPage {
    pub mode: FormMode,
    /// Category options; also reflects loading of the post being edited.
    pub state: ViewState<Vec<Category>>,
    pub form: PostForm,
    pub field_errors: ValidationErrors,
    pub banner: Option<String>,
}

impl PostFormPage {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            state: ViewState::Loading,
            form: PostForm::default(),
            field_errors: ValidationErrors::default(),
            banner: None,
        }
    }

    /// Fetch category options and, when editing, the current post.
    pub async fn load(api: &ApiClient, mode: FormMode) -> Self {
        let mut page = Self::new(mode);

        let categories = match api.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                page.state = ViewState::Failed(format!("Error loading categories: {}", e));
                return page;
            }
        };

        if let FormMode::Edit(id) = &page.mode {
            match api.get_post(id).await {
                Ok(post) => page.form = PostForm::from_post(&post),
                Err(e) => {
                    page.state =
                        ViewState::Failed(format!("Error loading post for editing: {}", e));
                    return page;
                }
            }
        }

        page.state = ViewState::Ready(categories);
        page
    }

    /// Change a text control and clear its error.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            "title" => &mut self.form.title,
            "content" => &mut self.form.content,
            "author" => &mut self.form.author,
            "category" => &mut self.form.category,
            "tags" => &mut self.form.tags,
            _ => return,
        };
        *slot = value;
        self.clear_error(field);
    }

    pub fn set_published(&mut self, published: bool) {
        self.form.published = published;
        self.clear_error(rules::PUBLISHED.field);
    }

    fn clear_error(&mut self, field: &str) {
        self.field_errors.0.retain(|e| e.field != field);
    }

    /// Validate locally, then send. Returns true when the post was saved.
    ///
    /// Local failures never reach the network. Server field errors land
    /// under their controls; anything else becomes the page banner.
    pub async fn submit<N: Navigator + ?Sized>(&mut self, api: &ApiClient, nav: &mut N) -> bool {
        self.banner = None;

        if let Err(errors) = self.form.validate() {
            self.field_errors = errors;
            return false;
        }
        self.field_errors = ValidationErrors::default();

        let result = match &self.mode {
            FormMode::Create => api.create_post(&self.form.create_request()).await,
            FormMode::Edit(id) => api.update_post(id, &self.form.update_request()).await,
        };

        match result {
            Ok(post) => {
                let notice = Flash::Info(format!("Post {}d successfully!", self.mode.verb()));
                nav.navigate(Route::Post(post.id.to_string()), Some(notice));
                true
            }
            Err(ClientError::Validation(errors)) => {
                self.field_errors = errors;
                false
            }
            Err(e) => {
                self.banner = Some(format!("Failed to {} post: {}", self.mode.verb(), e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let categories = match &self.state {
            ViewState::Loading => return "Loading form...".to_string(),
            ViewState::Failed(message) => return message.clone(),
            ViewState::Ready(categories) => categories,
        };

        let mut out = String::new();
        let heading = match self.mode {
            FormMode::Create => "Create New Post",
            FormMode::Edit(_) => "Edit Post",
        };
        let _ = writeln!(out, "{}\n", heading);

        self.control(&mut out, "Title", rules::TITLE.field, &self.form.title);
        self.control(&mut out, "Content", rules::CONTENT.field, &self.form.content);
        self.control(&mut out, "Author", rules::AUTHOR.field, &self.form.author);

        let selected = categories
            .iter()
            .find(|c| c.id.to_string() == self.form.category)
            .map_or("Select a Category", |c| c.name.as_str());
        self.control(&mut out, "Category", rules::CATEGORY.field, selected);
        for category in categories {
            let _ = writeln!(out, "    - {} ({})", category.name, category.id);
        }

        self.control(&mut out, "Tags (comma-separated)", rules::TAGS.field, &self.form.tags);
        let checked = if self.form.published { "[x]" } else { "[ ]" };
        self.control(&mut out, "Published", rules::PUBLISHED.field, checked);

        let unplaced: Vec<&str> = self
            .field_errors
            .iter()
            .filter(|e| !CONTROLS.contains(&e.field.as_str()))
            .map(|e| e.message.as_str())
            .collect();
        if !unplaced.is_empty() {
            let _ = writeln!(out, "\n{}", unplaced.join(", "));
        }
        if let Some(banner) = &self.banner {
            let _ = writeln!(out, "\n{}", banner);
        }
        out
    }

    fn control(&self, out: &mut String, label: &str, field: &str, value: &str) {
        let _ = writeln!(out, "{}: {}", label, value);
        if let Some(message) = self.field_errors.message_for(field) {
            let _ = writeln!(out, "  ! {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::tests::RecordingNavigator;
    use crate::pages::fixtures;

    const CATEGORY_ID: &str = "6f1c2f5a-7a3e-4f7b-9b1e-2f0c8d9e4a21";

    fn filled() -> PostForm {
        PostForm {
            title: "Hello World".to_string(),
            content: "1234567890".to_string(),
            author: "Ann".to_string(),
            category: CATEGORY_ID.to_string(),
            tags: " rust, ,web ".to_string(),
            published: false,
        }
    }

    fn ready_page(mode: FormMode, form: PostForm) -> PostFormPage {
        let mut page = PostFormPage::new(mode);
        page.state = ViewState::Ready(Vec::new());
        page.form = form;
        page
    }

    #[test]
    fn test_tag_list_splits_and_trims() {
        assert_eq!(filled().tag_list(), vec!["rust", "web"]);
        assert!(PostForm::default().tag_list().is_empty());
    }

    #[test]
    fn test_from_post_round_trips_fields() {
        let form = PostForm::from_post(&fixtures::post(Some("Tech")));
        assert_eq!(form.tags, "rust, web");
        assert_eq!(form.category, uuid::Uuid::from_u128(1).to_string());

        let orphan = PostForm::from_post(&fixtures::post(None));
        assert_eq!(orphan.category, "");
    }

    #[test]
    fn test_local_validation_uses_server_rules() {
        let errors = PostForm::default().validate().unwrap_err();
        assert_eq!(errors.message_for("title"), Some("Title is required"));
        assert_eq!(errors.message_for("category"), Some("Category ID is required"));

        let mut form = filled();
        form.title = "Hi".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.message_for("title"),
            Some("Title must be between 5 and 100 characters")
        );
        assert!(filled().validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let server = mockito::Server::new_async().await;
        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();

        let mut page = ready_page(FormMode::Create, PostForm::default());
        assert!(!page.submit(&api, &mut nav).await);

        assert!(nav.visits.is_empty());
        let out = page.render();
        assert!(out.contains("Title: \n  ! Title is required"));
        assert!(out.contains("  ! Content is required"));
        assert!(out.contains("Author: \n  ! Author is required"));
    }

    #[tokio::test]
    async fn test_server_field_errors_land_on_controls() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/posts")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":[{"field":"author","message":"Author name must be between 3 and 50 characters"}]}"#)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();
        let mut page = ready_page(FormMode::Create, filled());

        assert!(!page.submit(&api, &mut nav).await);
        assert_eq!(
            page.field_errors.message_for("author"),
            Some("Author name must be between 3 and 50 characters")
        );
        assert!(page.banner.is_none());

        page.set_text("author", "Annabel");
        assert!(page.field_errors.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_become_banner() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/posts")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"invalid category reference"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();
        let mut page = ready_page(FormMode::Create, filled());

        assert!(!page.submit(&api, &mut nav).await);
        assert_eq!(
            page.banner.as_deref(),
            Some("Failed to create post: invalid category reference")
        );
        assert!(page.render().ends_with("Failed to create post: invalid category reference\n"));
    }

    #[tokio::test]
    async fn test_successful_edit_navigates_to_post() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::to_string(&fixtures::post(Some("Tech"))).unwrap();
        let _mock = server
            .mock("PUT", "/api/posts/00000000-0000-0000-0000-000000000000")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let mut nav = RecordingNavigator::default();
        let mode = FormMode::Edit("00000000-0000-0000-0000-000000000000".to_string());
        let mut page = ready_page(mode, filled());

        assert!(page.submit(&api, &mut nav).await);
        assert_eq!(
            nav.visits,
            vec![(
                Route::Post("00000000-0000-0000-0000-000000000000".to_string()),
                Some(Flash::Info("Post updated successfully!".to_string()))
            )]
        );
    }

    #[tokio::test]
    async fn test_load_reports_category_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/categories")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Internal Server Error"}"#)
            .create_async()
            .await;

        let page = PostFormPage::load(&ApiClient::new(server.url()), FormMode::Create).await;
        assert_eq!(
            page.render(),
            "Error loading categories: Internal Server Error"
        );
    }
}

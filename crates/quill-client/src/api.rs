//! Generic request helper for the blog API.

use quill_core::ValidationErrors;
use quill_core::domain::{Category, PopulatedPost};
use quill_shared::MessageResponse;
use quill_shared::dto::{CreateCategoryRequest, CreatePostRequest, UpdatePostRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{ClientError, ClientResult};

const DELETED_MESSAGE: &str = "Resource deleted successfully";

/// HTTP client bound to one API origin.
///
/// Every path is resolved under `/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a JSON request and return the decoded response body.
    ///
    /// Non-2xx responses become a [`ClientError`]. DELETE does not read the
    /// response body and returns a fixed acknowledgment instead.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let url = format!("{}/api{}", self.base_url, path);
        tracing::debug!(%method, %url, "API request");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = error_from_body(status, &text);
            tracing::warn!(%method, %url, status = status.as_u16(), error = %error, "API call failed");
            return Err(error);
        }

        if method == Method::DELETE {
            return Ok(json!({ "message": DELETED_MESSAGE }));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn list_posts(&self) -> ClientResult<Vec<PopulatedPost>> {
        decode(self.request(Method::GET, "/posts", None).await?)
    }

    pub async fn get_post(&self, id: &str) -> ClientResult<PopulatedPost> {
        decode(self.request(Method::GET, &post_path(id), None).await?)
    }

    pub async fn create_post(&self, input: &CreatePostRequest) -> ClientResult<PopulatedPost> {
        let body = encode(input)?;
        decode(self.request(Method::POST, "/posts", Some(&body)).await?)
    }

    pub async fn update_post(
        &self,
        id: &str,
        input: &UpdatePostRequest,
    ) -> ClientResult<PopulatedPost> {
        let body = encode(input)?;
        decode(self.request(Method::PUT, &post_path(id), Some(&body)).await?)
    }

    pub async fn delete_post(&self, id: &str) -> ClientResult<MessageResponse> {
        decode(self.request(Method::DELETE, &post_path(id), None).await?)
    }

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        decode(self.request(Method::GET, "/categories", None).await?)
    }

    pub async fn create_category(&self, input: &CreateCategoryRequest) -> ClientResult<Category> {
        let body = encode(input)?;
        decode(self.request(Method::POST, "/categories", Some(&body)).await?)
    }
}

fn post_path(id: &str) -> String {
    format!("/posts/{}", id)
}

fn encode<T: serde::Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Turn a failed response into the most specific error it describes.
fn error_from_body(status: StatusCode, text: &str) -> ClientError {
    let body: Option<Value> = serde_json::from_str(text).ok();

    if status == StatusCode::BAD_REQUEST {
        let errors = body
            .as_ref()
            .and_then(|b| b.get("errors"))
            .and_then(|e| serde_json::from_value::<ValidationErrors>(e.clone()).ok());
        if let Some(errors) = errors {
            return ClientError::Validation(errors);
        }
    }

    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

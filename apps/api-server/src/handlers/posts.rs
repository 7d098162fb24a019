//! Post handlers.
//!
//! Bodies go through the validation layer first; ids are checked by the
//! access layer before it touches the store.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use quill_core::validation;
use quill_shared::MessageResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.blog.get_post(&path).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let input = validation::validate_create_post(&body)?;
    let post = state.blog.create_post(input).await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    // Report a bad id and a bad body together, as one rule set.
    let patch = match (
        validation::parse_id(&path),
        validation::validate_post_patch(&body),
    ) {
        (Ok(_), Ok(patch)) => patch,
        (Err(id_errors), Err(body_errors)) => return Err(id_errors.merge(body_errors).into()),
        (Err(errors), _) | (_, Err(errors)) => return Err(errors.into()),
    };

    let post = state.blog.update_post(&path, patch).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.blog.delete_post(&path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post removed")))
}

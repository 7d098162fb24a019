//! Category handlers.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use quill_core::validation;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.blog.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let input = validation::validate_new_category(&body)?;
    let category = state.blog.create_category(input).await?;
    Ok(HttpResponse::Created().json(category))
}

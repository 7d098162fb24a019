//! HTTP handlers and route configuration.

mod categories;
mod health;
mod posts;

use actix_web::{HttpRequest, HttpResponse, web};
use quill_shared::ErrorResponse;

use crate::middleware::error::{AppError, json_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(health::root))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                )
                .service(
                    web::scope("/categories")
                        .route("", web::get().to(categories::list_categories))
                        .route("", web::post().to(categories::create_category)),
                ),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_else(|| req.path());
    Err(AppError::NotFound(ErrorResponse::not_found(path).message))
}

//! Liveness endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
    pub timestamp: String,
}

/// GET /
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("API is running...")
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let reachable = store_reachable(&state).await;
    let response = HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store: state.store_kind(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if reachable {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn store_reachable(state: &AppState) -> bool {
    let Some(db) = &state.db else {
        return true;
    };
    match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            false
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn store_reachable(_state: &AppState) -> bool {
    true
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::BlogService;
use quill_core::ports::{CategoryRepository, PostRepository};
use quill_infra::{InMemoryCategoryRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    /// Whether error bodies carry a `stack`; off in production.
    pub expose_error_detail: bool,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let posts: Arc<dyn PostRepository> =
                            Arc::new(PostgresPostRepository::new(conn.main.clone()));
                        let categories: Arc<dyn CategoryRepository> =
                            Arc::new(PostgresCategoryRepository::new(conn.main.clone()));
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            blog: BlogService::new(posts, categories),
                            expose_error_detail: !config.app_env.is_production(),
                            db: Some(conn),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        Self::in_memory().with_error_detail(!config.app_env.is_production())
    }

    /// State backed by the in-memory document store.
    pub fn in_memory() -> Self {
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let categories: Arc<dyn CategoryRepository> = Arc::new(InMemoryCategoryRepository::new());

        Self {
            blog: BlogService::new(posts, categories),
            expose_error_detail: true,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    pub fn with_error_detail(mut self, expose: bool) -> Self {
        self.expose_error_detail = expose;
        self
    }

    /// Name of the active store, reported by the health check.
    pub fn store_kind(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        let kind = if self.db.is_some() { "postgres" } else { "memory" };
        #[cfg(not(feature = "postgres"))]
        let kind = "memory";
        kind
    }
}

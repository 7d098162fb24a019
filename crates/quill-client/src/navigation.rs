//! Routes and the navigate-then-mutate flow.

use std::fmt;
use std::future::Future;

use crate::error::ClientResult;

/// A client-side location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Post(String),
    NewPost,
    EditPost(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Post(id) => format!("/posts/{}", id),
            Self::NewPost => "/create-post".to_string(),
            Self::EditPost(id) => format!("/edit-post/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One-shot annotation carried to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Info(String),
    Error(String),
}

impl Flash {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }
}

/// Something that can move the user to another route.
pub trait Navigator {
    fn navigate(&mut self, route: Route, flash: Option<Flash>);
}

/// Where to go before a mutation runs and where to go if it fails.
#[derive(Debug, Clone)]
pub struct Optimistic {
    pub success: Route,
    pub notice: Option<Flash>,
    pub fallback: Route,
    /// Prefix of the error annotation, e.g. `Failed to delete post`.
    pub failure: String,
}

/// Navigate to the success route, then await the mutation.
///
/// A late failure navigates again to the fallback route with an error
/// annotation and is still returned to the caller. Nothing already rendered
/// is rolled back.
pub async fn navigate_then_mutate<N, F, T>(
    nav: &mut N,
    plan: Optimistic,
    mutation: F,
) -> ClientResult<T>
where
    N: Navigator + ?Sized,
    F: Future<Output = ClientResult<T>>,
{
    nav.navigate(plan.success, plan.notice);

    match mutation.await {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(error = %e, fallback = %plan.fallback, "Mutation failed after navigation");
            let flash = Flash::Error(format!("{}: {}", plan.failure, e));
            nav.navigate(plan.fallback, Some(flash));
            Err(e)
        }
    }
}

//! # Quill Client
//!
//! Data layer for applications that talk to the blog API: a request helper,
//! page models that render to text, and the navigation flow used after
//! mutations.

pub mod api;
pub mod error;
pub mod navigation;
pub mod pages;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use navigation::{Flash, Navigator, Route};
pub use pages::ViewState;

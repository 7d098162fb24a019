//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Records, field rules, request validation and the persistence-access
//! service live here; storage backends plug in through `ports`.

pub mod domain;
pub mod error;
pub mod ports;
pub mod schema;
pub mod service;
pub mod validation;

pub use error::DomainError;
pub use service::BlogService;
pub use validation::{FieldError, ValidationErrors};

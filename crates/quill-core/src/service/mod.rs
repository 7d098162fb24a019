//! Persistence-access services.

mod blog;

pub use blog::BlogService;

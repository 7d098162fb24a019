//! Domain entities - the core business objects.

mod category;
mod post;

pub use category::{Category, CategoryRef, NewCategory};
pub use post::{NewPost, PopulatedPost, Post, PostPatch};

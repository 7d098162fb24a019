//! # Quill API Server
//!
//! HTTP surface for the blog: routes, error shaping, state and bootstrap.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

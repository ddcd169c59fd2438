//! Shelfmark
//!
//! A small book lending server: books, the people who borrow them, and the
//! assign/return workflow between the two, exposed as a REST JSON API.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Used by the readiness probe; `None` when services run on other storage
    pub pool: Option<Pool<Postgres>>,
}

//! Lending catalog
//!
//! Tracks books and the people who borrow them. A book is held by at most
//! one person; the link lives only on the book, and a person's held books
//! are derived from it. Deleting a person puts their books back on the
//! shelf in the same transaction.

use std::sync::Arc;

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
}

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod params;
pub mod repository;
pub mod routes;

use crate::{config::AppConfig, repository::PostRepository};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config }
    }
}

impl FromRef<AppState> for PostRepository {
    fn from_ref(state: &AppState) -> Self {
        PostRepository::new(state.db.clone())
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

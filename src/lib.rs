pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod store;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenCodec;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &Config) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenCodec::from_config(config)),
        }
    }
}

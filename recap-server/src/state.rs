//! Shared application state
//!
//! Constructed once in `main` and handed to the router; handlers receive
//! it through axum's `State` extractor. No ambient singletons.

use sqlx::PgPool;

use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Settings,
}

//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod auth;
pub mod batch;
pub mod course;
pub mod error;
pub mod extract;
pub mod health;
pub mod worker;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth endpoints
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Course endpoints
        .route("/course/create", post(course::create_course))
        .route("/course/list", get(course::list_courses))
        .route("/course/{id}", get(course::get_course))
        // Batch endpoints
        .route("/batch/create", post(batch::create_batch_job))
        .route("/batch/list", get(batch::list_batch_jobs))
        .route("/batch/{id}", get(batch::get_batch_job))
        .route("/batch/{id}/tasks", get(batch::get_batch_tasks))
        // Worker endpoints
        .route("/worker/job/list/pending", get(worker::list_pending_jobs))
        .route("/worker/task/list/pending", get(worker::list_pending_tasks))
        .route("/worker/job/claim/{id}", post(worker::claim_job))
        .route("/worker/task/claim/{id}", post(worker::claim_task))
        .route("/worker/task/{id}/complete", post(worker::complete_task))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

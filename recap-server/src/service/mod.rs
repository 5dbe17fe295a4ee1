//! Service Module
//!
//! Business logic layer for the server.
//! Services orchestrate between repositories and contain domain logic.

pub mod auth;
pub mod batch;
pub mod course;

// Re-export for convenience
pub use auth as auth_service;
pub use batch as batch_service;
pub use course as course_service;

//! Repository Module
//!
//! Data access layer for the server.
//! Each repository handles database operations for a specific domain entity.

pub mod batch;
pub mod course;
pub mod user;

// Re-export for convenience
pub use batch as batch_repository;
pub use course as course_repository;
pub use user as user_repository;

//! Data transfer objects
//!
//! Request/response types exchanged between the API, its clients,
//! and the worker.

pub mod batch;
pub mod course;
pub mod user;

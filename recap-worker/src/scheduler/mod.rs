//! Scheduler module
//!
//! Polls the server for pending batch work and dispatches task
//! execution onto a bounded worker pool.

pub mod poller;

//! Course domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An online course owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Generated summary, empty until a batch task completes for this course
    pub ai_summary: String,
    pub status: CourseStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Course editorial status
///
/// A course starts Pending and moves to Draft once a summary
/// has been generated for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Pending,
    Draft,
}

//! Course DTOs

use serde::{Deserialize, Serialize};

use crate::domain::course::Course;

/// Request to create a new course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub description: String,
}

/// List of courses owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesPublic {
    pub courses: Vec<Course>,
}

// src/models/bug_report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Bug report filed by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BugReport {
    pub id: Uuid,
    pub reporter_id: Option<Uuid>,
    pub title: String,
    pub description: String,

    /// OPEN or RESOLVED
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Request DTO for POST /api/bug-reports
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBugReportRequest {
    #[validate(length(min = 3, max = 200))]
    pub title: String,

    #[validate(length(min = 10, max = 10000))]
    pub description: String,
}

/// Bug report DTO for admin listings
#[derive(Debug, Serialize)]
pub struct BugReportResponse {
    pub id: Uuid,
    pub reporter_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl BugReport {
    pub fn to_response(&self) -> BugReportResponse {
        BugReportResponse {
            id: self.id,
            reporter_id: self.reporter_id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        }
    }
}

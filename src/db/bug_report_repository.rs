// src/db/bug_report_repository.rs

use crate::errors::KopilkaError;
use crate::models::BugReport;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BugReportRepository;

impl BugReportRepository {
    /// File a bug report
    pub async fn create(
        pool: &PgPool,
        reporter_id: Option<Uuid>,
        title: &str,
        description: &str,
    ) -> Result<BugReport, KopilkaError> {
        sqlx::query_as::<_, BugReport>(
            r#"
            INSERT INTO bug_reports (id, reporter_id, title, description, status, created_at)
            VALUES ($1, $2, $3, $4, 'OPEN', NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reporter_id)
        .bind(title)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Bug report insert failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// All reports, open first, newest first within status
    pub async fn list(pool: &PgPool) -> Result<Vec<BugReport>, KopilkaError> {
        sqlx::query_as::<_, BugReport>(
            r#"
            SELECT * FROM bug_reports
            ORDER BY (status = 'OPEN') DESC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Bug report listing failed: {}", e);
            KopilkaError::DatabaseError(e.to_string())
        })
    }

    /// Resolve an open report; resolving twice is a conflict
    pub async fn resolve(pool: &PgPool, id: Uuid) -> Result<BugReport, KopilkaError> {
        sqlx::query_as::<_, BugReport>(
            r#"
            UPDATE bug_reports
            SET status = 'RESOLVED', resolved_at = NOW()
            WHERE id = $1 AND status = 'OPEN'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Bug report resolve failed for {}: {}", id, e);
            KopilkaError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| KopilkaError::InvalidTransition(format!("bug report {} is not open", id)))
    }
}

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formintake_core::models::{NewSubmission, StoredSubmission};
use formintake_core::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Persistence gateway for form submissions.
///
/// Implementations are shared process-wide behind an `Arc` and must tolerate
/// concurrent calls. Neither operation retries internally.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Write one submission and return the id the store assigned to it.
    ///
    /// No field is checked for uniqueness.
    async fn insert(&self, submission: NewSubmission) -> Result<Uuid, AppError>;

    /// Every stored submission, in insertion order.
    async fn list_all(&self) -> Result<Vec<StoredSubmission>, AppError>;
}

/// Row type for the submissions table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRow {
    pub fn to_stored_submission(self) -> StoredSubmission {
        StoredSubmission {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            password: self.password,
            image_path: self.image_path,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL-backed submission store. Owns its connection pool.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    /// Connect to the database. Called once at startup.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Database connected successfully");

        Ok(Self { pool })
    }

    /// Apply pending migrations from `migrations_dir`.
    pub async fn run_migrations(&self, migrations_dir: &Path) -> Result<(), AppError> {
        let migrator = sqlx::migrate::Migrator::new(migrations_dir)
            .await
            .context("Failed to load migrations")?;
        migrator
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    #[tracing::instrument(skip(self, submission), fields(db.table = "submissions", db.operation = "insert", has_image = submission.image_path.is_some()))]
    async fn insert(&self, submission: NewSubmission) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar::<Postgres, Uuid>(
            r#"
            INSERT INTO submissions (full_name, email, phone, password, image_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&submission.full_name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.password)
        .bind(&submission.image_path)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(submission_id = %id, "Submission inserted");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select"))]
    async fn list_all(&self) -> Result<Vec<StoredSubmission>, AppError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as::<Postgres, SubmissionRow>(
            r#"
            SELECT id, full_name, email, phone, password, image_path, created_at
            FROM submissions
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "Submissions retrieved");
        Ok(rows
            .into_iter()
            .map(SubmissionRow::to_stored_submission)
            .collect())
    }
}

//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.
//!
//! Each study plan is persisted as a single row with its task, reminder and tag
//! sequences in JSONB columns, so every create/update is one atomic statement
//! and a concurrent reader never observes a half-written document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use study_assistant_core::domain::{
    NewStudyPlan, Priority, Reminder, StudyPlan, StudyPlanPatch, Task, User, UserCredentials,
};
use study_assistant_core::ports::{DatabaseService, PortError, PortResult};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    hashed_password: String,
    user_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            user_type: self.user_type,
            created_at: self.created_at,
        }
    }

    fn to_credentials(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            name: self.name,
            email: self.email,
            hashed_password: self.hashed_password,
            user_type: self.user_type,
        }
    }
}

#[derive(FromRow)]
struct StudyPlanRecord {
    id: Uuid,
    user_id: Uuid,
    title: String,
    subject: String,
    description: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    priority: String,
    estimated_hours: f64,
    tasks: Json<Vec<Task>>,
    reminders: Json<Vec<Reminder>>,
    progress: i32,
    tags: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StudyPlanRecord {
    fn to_domain(self) -> PortResult<StudyPlan> {
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(PortError::Unexpected)?;
        Ok(StudyPlan {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            subject: self.subject,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            priority,
            estimated_hours: self.estimated_hours,
            tasks: self.tasks.0,
            reminders: self.reminders.0,
            progress: self.progress.clamp(0, 100) as u8,
            tags: self.tags.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PLAN_COLUMNS: &str = "id, user_id, title, subject, description, start_date, end_date, \
     priority, estimated_hours, tasks, reminders, progress, tags, created_at, updated_at";

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
        user_type: Option<&str>,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, name, email, hashed_password, user_type, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, hashed_password, user_type, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .bind(user_type)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                PortError::Validation("User already exists".to_string())
            } else {
                PortError::Unexpected(e.to_string())
            }
        })?;

        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, hashed_password, user_type, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("User with email {} not found", email))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_credentials())
    }

    async fn list_study_plans_by_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>> {
        let sql = format!(
            "SELECT {} FROM study_plans WHERE user_id = $1 ORDER BY created_at ASC",
            PLAN_COLUMNS
        );
        let records = sqlx::query_as::<_, StudyPlanRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn create_study_plan(&self, fields: NewStudyPlan) -> PortResult<StudyPlan> {
        let plan = StudyPlan::new(fields, Utc::now())?;

        sqlx::query(
            "INSERT INTO study_plans \
             (id, user_id, title, subject, description, start_date, end_date, priority, \
              estimated_hours, tasks, reminders, progress, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(&plan.title)
        .bind(&plan.subject)
        .bind(&plan.description)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.priority.as_str())
        .bind(plan.estimated_hours)
        .bind(Json(&plan.tasks))
        .bind(Json(&plan.reminders))
        .bind(plan.progress as i32)
        .bind(Json(&plan.tags))
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(plan)
    }

    async fn update_study_plan(&self, id: Uuid, patch: StudyPlanPatch) -> PortResult<StudyPlan> {
        // Read-modify-write of the whole document, no locking: two concurrent
        // updates to the same plan race and the last writer wins.
        let sql = format!("SELECT {} FROM study_plans WHERE id = $1", PLAN_COLUMNS);
        let record = sqlx::query_as::<_, StudyPlanRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    PortError::NotFound(format!("Study plan {} not found", id))
                }
                _ => PortError::Unexpected(e.to_string()),
            })?;

        let mut plan = record.to_domain()?;
        plan.apply_patch(patch, Utc::now());

        sqlx::query(
            "UPDATE study_plans SET \
             title = $1, subject = $2, description = $3, start_date = $4, end_date = $5, \
             priority = $6, estimated_hours = $7, tasks = $8, reminders = $9, progress = $10, \
             tags = $11, updated_at = $12 \
             WHERE id = $13",
        )
        .bind(&plan.title)
        .bind(&plan.subject)
        .bind(&plan.description)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.priority.as_str())
        .bind(plan.estimated_hours)
        .bind(Json(&plan.tasks))
        .bind(Json(&plan.reminders))
        .bind(plan.progress as i32)
        .bind(Json(&plan.tags))
        .bind(plan.updated_at)
        .bind(plan.id)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(plan)
    }

    async fn delete_study_plan(&self, id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM study_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Study plan {} not found", id)));
        }
        Ok(())
    }
}

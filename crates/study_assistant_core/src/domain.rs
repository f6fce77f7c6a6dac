//! crates/study_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! The study-plan aggregate is serialized with the same camelCase shape it is
//! persisted and sent over the wire with, so serde derives live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::planner;
use crate::ports::{PortError, PortResult};

/// Priority of a plan or a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("'{}' is not a valid priority", other)),
        }
    }
}

/// Lifecycle status of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A single task embedded in a study plan.
///
/// Tasks have no lifecycle of their own: they are created, edited and removed
/// only by rewriting the parent plan's whole `tasks` list. Each task still
/// carries a stable `id`, generated when the client omits one, so the UI can
/// address a task without relying on its list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_task_hours")]
    pub estimated_hours: f64,
    /// Not set automatically on a status change; the client owns this field.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_task_hours() -> f64 {
    1.0
}

/// A reminder attached to a plan. Stored and echoed back, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
}

/// The study-plan aggregate root. Owned by exactly one user for its entire
/// lifecycle; there is no transfer operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    /// Completion percentage, derived from `tasks`. Persisted as a cache and
    /// recomputed on every read; never trusted when stale.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied fields of a plan about to be created.
#[derive(Debug, Clone)]
pub struct NewStudyPlan {
    pub user_id: Uuid,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub priority: Priority,
    pub estimated_hours: f64,
    pub tasks: Vec<Task>,
    pub reminders: Vec<Reminder>,
    pub tags: Vec<String>,
}

/// The client-writable fields of a plan, for shallow-merge updates.
///
/// `id`, `userId`, `createdAt` and `progress` are deliberately absent: clients
/// cannot overwrite them. A field left out of the request body is preserved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub estimated_hours: Option<f64>,
    pub tasks: Option<Vec<Task>>,
    pub reminders: Option<Vec<Reminder>>,
    pub tags: Option<Vec<String>>,
}

impl StudyPlan {
    /// Builds a fresh plan from caller-supplied fields, assigning the id and
    /// both timestamps. Validates the creation-time invariants: non-empty
    /// title and subject, `start_date <= end_date`, non-negative hours, and
    /// well-formed tasks.
    pub fn new(fields: NewStudyPlan, now: DateTime<Utc>) -> PortResult<Self> {
        if fields.title.trim().is_empty() {
            return Err(PortError::Validation("Title is required".to_string()));
        }
        if fields.subject.trim().is_empty() {
            return Err(PortError::Validation("Subject is required".to_string()));
        }
        if fields.start_date > fields.end_date {
            return Err(PortError::Validation(
                "Start date must be on or before end date".to_string(),
            ));
        }
        if fields.estimated_hours < 0.0 {
            return Err(PortError::Validation(
                "Estimated hours must not be negative".to_string(),
            ));
        }
        for task in &fields.tasks {
            if task.title.trim().is_empty() {
                return Err(PortError::Validation(
                    "Every task needs a title".to_string(),
                ));
            }
            if task.estimated_hours <= 0.0 {
                return Err(PortError::Validation(
                    "Task estimated hours must be positive".to_string(),
                ));
            }
        }

        let progress = planner::compute_progress(&fields.tasks);
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: fields.user_id,
            title: fields.title,
            subject: fields.subject,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            priority: fields.priority,
            estimated_hours: fields.estimated_hours,
            tasks: fields.tasks,
            reminders: fields.reminders,
            progress,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Shallow-merges a patch into the plan, field by field.
    ///
    /// Creation-time invariants are NOT re-checked here: an update that sets
    /// `start_date` past `end_date` goes through, matching the permissive
    /// behavior the planner UI was built against. `updated_at` is bumped and
    /// the cached `progress` refreshed on every merge.
    pub fn apply_patch(&mut self, patch: StudyPlanPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            self.estimated_hours = estimated_hours;
        }
        if let Some(tasks) = patch.tasks {
            self.tasks = tasks;
        }
        if let Some(reminders) = patch.reminders {
            self.reminders = reminders;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.progress = planner::compute_progress(&self.tasks);
        self.updated_at = now;
    }

    /// Refreshes the derived `progress` field from the current task list.
    pub fn refresh_progress(&mut self) {
        self.progress = planner::compute_progress(&self.tasks);
    }
}

// Represents a user - used throughout app
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub user_type: Option<String>,
}

/// A quiz produced by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub subject: String,
    pub difficulty: String,
    #[serde(default)]
    pub source_content: Option<String>,
    pub questions: Vec<QuizQuestion>,
}

/// One multiple-choice question. `correct_answer` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    #[serde(default)]
    pub explanation: Option<String>,
}

//! services/api/src/web/study_plans.rs
//!
//! Axum handlers for the study-plan endpoints: owner-scoped listing, create,
//! shallow-merge update, delete, and the dashboard triage view.
//!
//! Every operation trusts the owner identifier the caller presents - session
//! enforcement is the auth collaborator's job, not this service's. Update is
//! the single mutation primitive: plan-level edits and whole task-list
//! rewrites both arrive as a partial body merged into the stored document.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use study_assistant_core::domain::{
    NewStudyPlan, Priority, Reminder, StudyPlan, StudyPlanPatch, Task,
};
use study_assistant_core::planner;
use uuid::Uuid;

use crate::web::state::AppState;
use crate::web::{error_response, port_error_response, ErrorResponse, MessageResponse};

//=========================================================================================
// Query Parameters and Payload Structs
//=========================================================================================

#[derive(Deserialize)]
pub struct OwnerParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PlanIdParams {
    id: Option<String>,
}

/// The creation payload. Requireds are `Option` so a missing field produces
/// the contract's `{"message"}` 400 instead of a bare extractor rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyPlanRequest {
    pub user_id: Option<Uuid>,
    pub title: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: Option<chrono::DateTime<Utc>>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One triaged task with the title of the plan it belongs to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriagedTask {
    pub task: Task,
    pub plan_title: String,
}

/// The dashboard view: pending tasks already past due, and pending tasks due
/// within the next seven days.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub overdue_tasks: Vec<TriagedTask>,
    pub upcoming_tasks: Vec<TriagedTask>,
}

fn parse_user_id(params: OwnerParams) -> Result<Uuid, ErrorResponse> {
    let raw = params
        .user_id
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "User ID is required"))?;
    Uuid::parse_str(&raw)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid user ID format"))
}

fn parse_plan_id(params: PlanIdParams) -> Result<Uuid, ErrorResponse> {
    let raw = params
        .id
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Study plan ID is required"))?;
    Uuid::parse_str(&raw)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid study plan ID format"))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List all study plans owned by a user.
///
/// Unknown owners get an empty array. The derived `progress` field is
/// recomputed on every read, so a stale persisted value is never surfaced.
#[utoipa::path(
    get,
    path = "/study-plans",
    params(
        ("userId" = String, Query, description = "The owning user's ID.")
    ),
    responses(
        (status = 200, description = "The user's study plans"),
        (status = 400, description = "Missing or malformed userId", body = MessageResponse)
    )
)]
pub async fn list_study_plans_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<StudyPlan>>, ErrorResponse> {
    let user_id = parse_user_id(params)?;

    let mut plans = state
        .db
        .list_study_plans_by_user(user_id)
        .await
        .map_err(port_error_response)?;
    for plan in &mut plans {
        plan.refresh_progress();
    }

    Ok(Json(plans))
}

/// Create a new study plan.
#[utoipa::path(
    post,
    path = "/study-plans",
    responses(
        (status = 201, description = "Plan created, including its generated id"),
        (status = 400, description = "Missing userId or invalid fields", body = MessageResponse)
    )
)]
pub async fn create_study_plan_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStudyPlanRequest>,
) -> Result<(StatusCode, Json<StudyPlan>), ErrorResponse> {
    let user_id = req
        .user_id
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "User ID is required"))?;
    let (start_date, end_date) = match (req.start_date, req.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Start and end dates are required",
            ))
        }
    };

    let fields = NewStudyPlan {
        user_id,
        title: req.title.unwrap_or_default(),
        subject: req.subject.unwrap_or_default(),
        description: req.description,
        start_date,
        end_date,
        priority: req.priority,
        estimated_hours: req.estimated_hours,
        tasks: req.tasks,
        reminders: req.reminders,
        tags: req.tags,
    };

    let plan = state
        .db
        .create_study_plan(fields)
        .await
        .map_err(port_error_response)?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Update a study plan by shallow-merging the supplied fields.
///
/// This is also how tasks change: the client reads the plan, applies one
/// logical edit to the task list, and submits the full rewritten list here.
#[utoipa::path(
    put,
    path = "/study-plans",
    params(
        ("id" = String, Query, description = "The plan to update.")
    ),
    responses(
        (status = 200, description = "The updated plan"),
        (status = 400, description = "Missing or malformed id", body = MessageResponse),
        (status = 404, description = "No plan with that id", body = MessageResponse)
    )
)]
pub async fn update_study_plan_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlanIdParams>,
    Json(patch): Json<StudyPlanPatch>,
) -> Result<Json<StudyPlan>, ErrorResponse> {
    let id = parse_plan_id(params)?;

    let plan = state
        .db
        .update_study_plan(id, patch)
        .await
        .map_err(port_error_response)?;

    Ok(Json(plan))
}

/// Delete a study plan.
#[utoipa::path(
    delete,
    path = "/study-plans",
    params(
        ("id" = String, Query, description = "The plan to delete.")
    ),
    responses(
        (status = 200, description = "Confirmation message", body = MessageResponse),
        (status = 400, description = "Missing or malformed id", body = MessageResponse),
        (status = 404, description = "No plan with that id", body = MessageResponse)
    )
)]
pub async fn delete_study_plan_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlanIdParams>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let id = parse_plan_id(params)?;

    state
        .db
        .delete_study_plan(id)
        .await
        .map_err(port_error_response)?;

    Ok(Json(MessageResponse {
        message: "Study plan deleted successfully".to_string(),
    }))
}

/// The dashboard triage view across all of a user's plans.
///
/// Classification happens on demand against wall-clock time; there is no
/// background sweep marking tasks overdue.
#[utoipa::path(
    get,
    path = "/study-plans/dashboard",
    params(
        ("userId" = String, Query, description = "The owning user's ID.")
    ),
    responses(
        (status = 200, description = "Overdue and upcoming pending tasks"),
        (status = 400, description = "Missing or malformed userId", body = MessageResponse)
    )
)]
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<DashboardResponse>, ErrorResponse> {
    let user_id = parse_user_id(params)?;

    let plans = state
        .db
        .list_study_plans_by_user(user_id)
        .await
        .map_err(port_error_response)?;

    let now = Utc::now();
    let to_owned = |pairs: Vec<(&Task, &str)>| {
        pairs
            .into_iter()
            .map(|(task, plan_title)| TriagedTask {
                task: task.clone(),
                plan_title: plan_title.to_string(),
            })
            .collect()
    };

    Ok(Json(DashboardResponse {
        overdue_tasks: to_owned(planner::overdue_tasks(&plans, now)),
        upcoming_tasks: to_owned(planner::upcoming_tasks(&plans, now)),
    }))
}

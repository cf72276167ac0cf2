//! Task listing and CRUD endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklane_domain::constants::DEFAULT_PER_PAGE;
use tasklane_domain::{
    DueBucket, NewTask, StatusCounts, Task, TaskFilter, TaskPatch, TaskPriority, TaskStatus,
    TasklaneError,
};
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::CurrentUser;

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    pub search: Option<String>,
    /// Comma-separated subset of `todo,in_progress,done`.
    pub statuses: Option<String>,
    /// Comma-separated subset of `low,medium,high`.
    pub priorities: Option<String>,
    /// Comma-separated subset of `overdue,due_soon`.
    pub due_filters: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Listing response. Pagination is present only when `page` was requested;
/// the slice never alters the aggregate counts.
#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub tasks: Vec<Task>,
    #[serde(rename = "statusCounts")]
    pub status_counts: StatusCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Page-slicing metadata over the complete filtered set.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: usize,
    #[serde(rename = "perPage")]
    pub per_page: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

fn parse_csv<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    label: &str,
) -> Result<Vec<T>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            parse(part).ok_or_else(|| {
                ApiError(TasklaneError::InvalidInput(format!("unknown {label} value: {part}")))
            })
        })
        .collect()
}

/// GET /api/tasks
pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListTasksParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = TaskFilter {
        search: params.search.clone(),
        statuses: parse_csv(params.statuses.as_deref(), TaskStatus::parse, "status")?,
        priorities: parse_csv(params.priorities.as_deref(), TaskPriority::parse, "priority")?,
        due: parse_csv(params.due_filters.as_deref(), DueBucket::parse, "due filter")?,
    };

    let listing = ctx.tasks.list_tasks(user.id, &filter).await?;

    let (tasks, pagination) = match params.page {
        Some(page) => {
            let page = page.max(1);
            let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
            let total = listing.tasks.len();
            let total_pages = total.div_ceil(per_page);
            let tasks: Vec<Task> = listing
                .tasks
                .into_iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .collect();
            (tasks, Some(Pagination { page, per_page, total, total_pages }))
        }
        None => (listing.tasks, None),
    };

    Ok(Json(ListTasksResponse { tasks, status_counts: listing.status_counts, pagination }))
}

/// POST /api/tasks
pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
    let task = ctx.tasks.create_task(&user, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<TaskPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let task = ctx.tasks.update_task(&user, id, patch).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ctx.tasks.delete_task(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

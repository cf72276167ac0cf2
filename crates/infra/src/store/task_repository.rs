//! Task repository backed by the remote store

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;
use tasklane_core::tasks::ports::{TaskDraft, TaskQuery, TaskRepository};
use tasklane_domain::{Result, Task, TaskPatch, TaskPriority, TaskStatus, TasklaneError};
use tracing::debug;
use uuid::Uuid;

use super::client::StoreClient;

const TASKS_TABLE: &str = "tasks";

/// `TaskRepository` implementation over the store's REST interface.
pub struct StoreTaskRepository {
    client: Arc<StoreClient>,
}

impl StoreTaskRepository {
    /// Create a repository over a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

/// Insert payload; the store assigns id and timestamps.
#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    user_id: Uuid,
    title: &'a str,
    description: Option<&'a str>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
}

/// Partial update payload. Absent fields are left untouched by the store.
#[derive(Debug, Serialize)]
struct PatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

fn in_list<T>(values: &[T], label: fn(&T) -> &'static str) -> String {
    let labels: Vec<&str> = values.iter().map(label).collect();
    format!("in.({})", labels.join(","))
}

/// Build the `or=(...)` substring predicate for a search term.
///
/// Parentheses and commas delimit the predicate list in the store's query
/// grammar, so they are stripped from the term rather than escaped.
fn search_predicate(term: &str) -> String {
    let cleaned: String =
        term.chars().map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c }).collect();
    let pattern = cleaned.trim().to_string();
    format!("(title.ilike.*{pattern}*,description.ilike.*{pattern}*)")
}

#[async_trait]
impl TaskRepository for StoreTaskRepository {
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let mut params: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", query.owner)),
            ("order", "created_at.desc".to_string()),
        ];

        if let Some(search) = &query.search {
            params.push(("or", search_predicate(search)));
        }
        if !query.statuses.is_empty() {
            params.push(("status", in_list(&query.statuses, TaskStatus::as_str)));
        }
        if !query.priorities.is_empty() {
            params.push(("priority", in_list(&query.priorities, TaskPriority::as_str)));
        }

        debug!(owner = %query.owner, params = ?params, "querying task store");

        let request = self.client.table(Method::GET, TASKS_TABLE).query(&params);
        let response = self.client.execute(request).await?;

        response.json::<Vec<Task>>().await.map_err(|err| {
            TasklaneError::Internal(format!("failed to decode task rows: {err}"))
        })
    }

    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> Result<Task> {
        let row = InsertRow {
            user_id: owner,
            title: &draft.title,
            description: draft.description.as_deref(),
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
        };

        let request = self
            .client
            .table(Method::POST, TASKS_TABLE)
            .header("Prefer", "return=representation")
            .json(&row);
        let response = self.client.execute(request).await?;

        let mut rows: Vec<Task> = response.json().await.map_err(|err| {
            TasklaneError::Internal(format!("failed to decode inserted task: {err}"))
        })?;

        rows.pop()
            .ok_or_else(|| TasklaneError::Store("insert returned no representation".into()))
    }

    async fn update_task(&self, owner: Uuid, id: Uuid, patch: &TaskPatch) -> Result<Task> {
        let row = PatchRow {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            status: patch.status,
            priority: patch.priority,
            due_date: patch.due_date,
            updated_at: Utc::now(),
        };

        let request = self
            .client
            .table(Method::PATCH, TASKS_TABLE)
            .query(&[("id", format!("eq.{id}")), ("user_id", format!("eq.{owner}"))])
            .header("Prefer", "return=representation")
            .json(&row);
        let response = self.client.execute(request).await?;

        let mut rows: Vec<Task> = response.json().await.map_err(|err| {
            TasklaneError::Internal(format!("failed to decode updated task: {err}"))
        })?;

        // An empty representation means the predicate matched nothing: either
        // the task does not exist or it belongs to someone else.
        rows.pop().ok_or_else(|| TasklaneError::NotFound(format!("task {id}")))
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<()> {
        let request = self
            .client
            .table(Method::DELETE, TASKS_TABLE)
            .query(&[("id", format!("eq.{id}")), ("user_id", format!("eq.{owner}"))]);
        self.client.execute(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_predicate_strips_query_grammar_delimiters() {
        assert_eq!(
            search_predicate("buy (milk), eggs"),
            "(title.ilike.*buy  milk   eggs*,description.ilike.*buy  milk   eggs*)"
        );
    }

    #[test]
    fn in_list_renders_wire_labels() {
        assert_eq!(
            in_list(&[TaskStatus::Todo, TaskStatus::InProgress], TaskStatus::as_str),
            "in.(todo,in_progress)"
        );
    }
}

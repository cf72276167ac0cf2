//! Port interfaces for task storage and notification
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tasklane_domain::{
    NewTask, Result, Task, TaskNotification, TaskPatch, TaskPriority, TaskStatus,
};
use uuid::Uuid;

/// Predicate pushed down to the remote store.
///
/// Due-date buckets are deliberately absent: the engine applies them in
/// memory over the already-fetched set.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub owner: Uuid,
    /// Case-insensitive substring match over title OR description.
    pub search: Option<String>,
    /// Empty means no status restriction.
    pub statuses: Vec<TaskStatus>,
    /// Empty means no priority restriction.
    pub priorities: Vec<TaskPriority>,
}

impl TaskQuery {
    /// Predicate restricted to the owner only.
    pub fn for_owner(owner: Uuid) -> Self {
        Self { owner, ..Self::default() }
    }
}

/// Fully-resolved insert payload. Defaults have already been applied.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Resolve a validated input into a draft, applying the defaults
    /// (status `todo`, priority `medium`).
    pub fn from_new_task(input: NewTask) -> Self {
        Self {
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or(TaskStatus::Todo),
            priority: input.priority.unwrap_or(TaskPriority::Medium),
            due_date: input.due_date,
        }
    }
}

/// Trait for the remote task store
///
/// The store is the system of record; it assigns ids and timestamps and is
/// responsible for its own concurrency control. Every operation is scoped to
/// an owner so a task never leaks across users.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Execute a predicate, ordered by `created_at` descending.
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>>;

    /// Insert a task for the owner and return the stored representation.
    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> Result<Task>;

    /// Apply a partial update to the owner's task.
    ///
    /// Fails with `NotFound` when no task with that id belongs to the owner.
    async fn update_task(&self, owner: Uuid, id: Uuid, patch: &TaskPatch) -> Result<Task>;

    /// Remove the owner's task. Hard delete, no tombstone.
    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<()>;
}

/// Trait for the best-effort notification side channel
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification. Callers absorb any error.
    async fn notify(&self, notification: &TaskNotification) -> Result<()>;
}

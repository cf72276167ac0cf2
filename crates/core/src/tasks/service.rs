//! Task listing and mutation service - core business logic

use std::sync::Arc;

use chrono::Utc;
use tasklane_domain::{
    AuthenticatedUser, NewTask, NotificationAction, Result, StatusCounts, Task, TaskFilter,
    TaskListing, TaskNotification, TaskPatch, TasklaneError,
};
use tracing::warn;
use uuid::Uuid;

use super::ports::{NotificationSink, TaskDraft, TaskQuery, TaskRepository};

/// Task query engine and CRUD service
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    notifier: Option<Arc<dyn NotificationSink>>,
}

impl TaskService {
    /// Create a new task service without a notification sink.
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository, notifier: None }
    }

    /// Attach the notification side channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the filtered, status-counted listing for one owner.
    ///
    /// Search, status, and priority predicates are pushed to the store; the
    /// due-date buckets are applied in memory over the fetched set. Counts
    /// are computed after all filters, so `status_counts.total` always equals
    /// the number of tasks returned.
    pub async fn list_tasks(&self, owner: Uuid, filter: &TaskFilter) -> Result<TaskListing> {
        let query = TaskQuery {
            owner,
            search: filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from),
            statuses: filter.statuses.clone(),
            priorities: filter.priorities.clone(),
        };

        let mut tasks = self.repository.find_tasks(&query).await?;

        if !filter.due.is_empty() {
            let now = Utc::now();
            // A task with no due date never matches a due bucket.
            tasks.retain(|task| match task.due_date {
                Some(due) => filter.due.iter().any(|bucket| bucket.matches(due, now)),
                None => false,
            });
        }

        let status_counts = StatusCounts::tally(&tasks);
        Ok(TaskListing { tasks, status_counts })
    }

    /// Create a task and dispatch a `created` notification after commit.
    pub async fn create_task(&self, user: &AuthenticatedUser, input: NewTask) -> Result<Task> {
        if input.title.trim().is_empty() {
            return Err(TasklaneError::InvalidInput("task title must not be empty".into()));
        }

        let draft = TaskDraft::from_new_task(input);
        let task = self.repository.insert_task(user.id, &draft).await?;

        self.dispatch_notification(TaskNotification::from_task(
            NotificationAction::Created,
            &task,
            &user.email,
        ));

        Ok(task)
    }

    /// Apply a partial update and dispatch an `updated` notification.
    pub async fn update_task(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task> {
        if patch.is_empty() {
            return Err(TasklaneError::InvalidInput("update carries no fields".into()));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TasklaneError::InvalidInput("task title must not be empty".into()));
            }
        }

        let task = self.repository.update_task(user.id, id, &patch).await?;

        self.dispatch_notification(TaskNotification::from_task(
            NotificationAction::Updated,
            &task,
            &user.email,
        ));

        Ok(task)
    }

    /// Remove the owner's task. No notification is emitted for deletes.
    pub async fn delete_task(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        self.repository.delete_task(user.id, id).await
    }

    /// Fire-and-forget dispatch with its own error boundary.
    ///
    /// The spawned task is never joined by the caller's success path; any
    /// failure is logged and swallowed so the originating mutation stands.
    fn dispatch_notification(&self, notification: TaskNotification) {
        let Some(sink) = &self.notifier else {
            return;
        };

        let sink = Arc::clone(sink);
        tokio::spawn(async move {
            if let Err(err) = sink.notify(&notification).await {
                warn!(
                    error = %err,
                    action = ?notification.action,
                    title = %notification.title,
                    "task notification failed"
                );
            }
        });
    }
}

//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the task store and notification sink ports,
//! enabling deterministic unit tests without a remote store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tasklane_core::tasks::ports::{NotificationSink, TaskDraft, TaskQuery, TaskRepository};
use tasklane_domain::{
    Result as DomainResult, Task, TaskNotification, TaskPatch, TasklaneError,
};
use uuid::Uuid;

/// In-memory mock for `TaskRepository`.
///
/// Mirrors the store's contract: owner scoping, case-insensitive substring
/// search over title/description, status and priority restriction, and
/// `created_at` descending order.
#[derive(Default, Clone)]
pub struct MockTaskRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl MockTaskRepository {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a single task.
    pub fn with_task(self, task: Task) -> Self {
        self.tasks.lock().unwrap().push(task);
        self
    }

    /// Snapshot of everything currently stored, unfiltered.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn find_tasks(&self, query: &TaskQuery) -> DomainResult<Vec<Task>> {
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|task| task.user_id == query.owner)
            .filter(|task| match &needle {
                Some(needle) => {
                    task.title.to_lowercase().contains(needle)
                        || task
                            .description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(needle))
                }
                None => true,
            })
            .filter(|task| query.statuses.is_empty() || query.statuses.contains(&task.status))
            .filter(|task| {
                query.priorities.is_empty() || query.priorities.contains(&task.priority)
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> DomainResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user_id: owner,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, owner: Uuid, id: Uuid, patch: &TaskPatch) -> DomainResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id && task.user_id == owner)
            .ok_or_else(|| TasklaneError::NotFound(format!("task {id}")))?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> DomainResult<()> {
        // The store's delete succeeds even when the predicate matches nothing.
        self.tasks.lock().unwrap().retain(|task| !(task.id == id && task.user_id == owner));
        Ok(())
    }
}

/// Recording mock for `NotificationSink`.
///
/// Records every delivery attempt and optionally fails each one, for
/// asserting that the caller absorbs sink errors.
#[derive(Default, Clone)]
pub struct RecordingSink {
    notifications: Arc<Mutex<Vec<TaskNotification>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingSink {
    /// Create a sink that accepts every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail with a network error.
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Notifications attempted so far, in dispatch order.
    pub fn recorded(&self) -> Vec<TaskNotification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, notification: &TaskNotification) -> DomainResult<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(TasklaneError::Network("webhook unreachable".into()));
        }
        Ok(())
    }
}

//! Common data types used throughout the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DUE_SOON_WINDOW_DAYS;

/// Workflow state of a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Stable wire label, matching the store's enum column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Parse a wire label back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Stable wire label, matching the store's enum column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a wire label back into a priority.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A user-owned task as stored in the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Owning user. Only the owner's requests may observe or mutate the task.
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update of a task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// True when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Due-date classification applied after the store query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    /// `due_date < now`
    Overdue,
    /// `now <= due_date <= now + DUE_SOON_WINDOW_DAYS`
    DueSoon,
}

impl DueBucket {
    /// Parse a wire label (`overdue` / `due_soon`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "overdue" => Some(Self::Overdue),
            "due_soon" => Some(Self::DueSoon),
            _ => None,
        }
    }

    /// Whether a due date falls into this bucket at instant `now`.
    pub fn matches(&self, due_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Overdue => due_date < now,
            Self::DueSoon => {
                due_date >= now && due_date <= now + chrono::Duration::days(DUE_SOON_WINDOW_DAYS)
            }
        }
    }
}

/// Request-scoped listing filter. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub statuses: Vec<TaskStatus>,
    pub priorities: Vec<TaskPriority>,
    pub due: Vec<DueBucket>,
}

/// Per-status aggregate counts over a filtered result set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    /// Tally counts over a slice of tasks.
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = Self { total: tasks.len(), ..Self::default() };
        for task in tasks {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }
}

/// Complete filtered listing plus aggregate counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListing {
    pub tasks: Vec<Task>,
    #[serde(rename = "statusCounts")]
    pub status_counts: StatusCounts,
}

/// Persisted OAuth credential state for one user's calendar access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry_date: DateTime<Utc>,
}

/// Token material returned by the provider on exchange or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    /// Absent on most refresh responses; the previously stored token is
    /// carried forward in that case.
    pub refresh_token: Option<String>,
    pub expiry_date: DateTime<Utc>,
}

/// Authenticated user resolved from the request's session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

/// Mutation kind carried in a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    Created,
    Updated,
}

/// Best-effort side-channel notification emitted after a task mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNotification {
    pub action: NotificationAction,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub user_email: String,
}

impl TaskNotification {
    /// Build a notification from a committed task.
    pub fn from_task(action: NotificationAction, task: &Task, user_email: &str) -> Self {
        Self {
            action,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            user_email: user_email.to_string(),
        }
    }
}

/// Input for creating a remote calendar event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventInput {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Remote calendar event representation returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub status: Option<String>,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn task(status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            status,
            priority: TaskPriority::Medium,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn due_bucket_overdue_is_strictly_before_now() {
        let now = Utc::now();
        assert!(DueBucket::Overdue.matches(now - Duration::seconds(1), now));
        assert!(!DueBucket::Overdue.matches(now, now));
        assert!(!DueBucket::Overdue.matches(now + Duration::days(1), now));
    }

    #[test]
    fn due_bucket_due_soon_is_inclusive_window() {
        let now = Utc::now();
        assert!(DueBucket::DueSoon.matches(now, now));
        assert!(DueBucket::DueSoon.matches(now + Duration::days(DUE_SOON_WINDOW_DAYS), now));
        assert!(!DueBucket::DueSoon.matches(
            now + Duration::days(DUE_SOON_WINDOW_DAYS) + Duration::seconds(1),
            now
        ));
        assert!(!DueBucket::DueSoon.matches(now - Duration::seconds(1), now));
    }

    #[test]
    fn status_counts_tally_matches_input() {
        let tasks = vec![
            task(TaskStatus::Todo),
            task(TaskStatus::Todo),
            task(TaskStatus::InProgress),
            task(TaskStatus::Done),
        ];
        let counts = StatusCounts::tally(&tasks);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.todo, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 1);
    }

    #[test]
    fn status_labels_round_trip() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("archived"), None);
    }
}

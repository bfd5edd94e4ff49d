//! Task store gateway trait
//!
//! Defines the narrow query interface over the task document collection.

use async_trait::async_trait;

use super::model::{Task, TaskStatus};
use super::query::PageRequest;
use crate::Result;

/// Gateway for task persistence.
///
/// All operations are non-blocking and may fail with a [`crate::StoreError`]
/// that the lifecycle service reclassifies at its boundary.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Look up a task by identifier, deleted or not.
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>>;

    /// Look up a non-deleted task with the given title owned by the user.
    /// Source of truth for the duplicate-title check.
    async fn find_by_title_and_user(&self, title: &str, user_id: &str) -> Result<Option<Task>>;

    /// Count the user's tasks with the given deleted flag.
    async fn count_by_user_and_deleted(&self, user_id: &str, deleted: bool) -> Result<u64>;

    /// Count the user's tasks with the given status and deleted flag.
    async fn count_by_user_and_status_and_deleted(
        &self,
        user_id: &str,
        status: TaskStatus,
        deleted: bool,
    ) -> Result<u64>;

    /// Fetch one sorted page of the user's tasks. The page is not filtered
    /// by deleted flag or status; callers filter in-memory.
    async fn find_page_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Vec<Task>>;

    /// Insert or replace a task keyed by identifier, assigning a fresh
    /// identifier when absent.
    async fn save(&self, task: Task) -> Result<Task>;
}

//! Task lifecycle service
//!
//! Orchestrates the store gateway and the mapper to implement the task
//! operations, enforcing business invariants and classifying errors at the
//! boundary of each operation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use super::api::{TaskDetails, TaskRequest, TaskSummary};
use super::mapper;
use super::model::TaskStatus;
use super::query::{PageInfo, PageRequest, QueryParams};
use super::store::TaskStore;
use crate::TaskError;

/// One page of list results: an unordered set of abbreviated tasks plus
/// pagination state. Ordering established by the sort parameters is not
/// carried past the mapping step.
#[derive(Debug)]
pub struct TaskPage {
    pub tasks: HashSet<TaskSummary>,
    pub paging: PageInfo,
}

/// Service implementing the task lifecycle operations.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Create a new task owned by `user_id` and return its assigned
    /// identifier.
    ///
    /// Fails with [`TaskError::Conflict`] when the user already has a
    /// non-deleted task with the same title; no write occurs in that case.
    pub async fn create_task(
        &self,
        user_id: &str,
        mut request: TaskRequest,
    ) -> Result<String, TaskError> {
        let existing = self
            .store
            .find_by_title_and_user(&request.title, user_id)
            .await
            .map_err(|e| TaskError::internal("Error creating task", e))?;
        if existing.is_some() {
            return Err(TaskError::Conflict("Task already exists".to_string()));
        }

        request.user_id = Some(user_id.to_string());
        let task = mapper::create_of(&request)
            .map_err(|e| TaskError::internal("Error creating task", e))?;
        let saved = self
            .store
            .save(task)
            .await
            .map_err(|e| TaskError::internal("Error creating task", e))?;
        saved.id.ok_or_else(|| {
            TaskError::internal_opaque("Error creating task", "store returned no identifier")
        })
    }

    /// List the user's tasks for the requested page.
    ///
    /// The page fetch and the total count run concurrently and join once
    /// both complete. Deleted tasks and, when a status filter is present,
    /// non-matching tasks are dropped after the page is fetched.
    pub async fn get_tasks(
        &self,
        user_id: &str,
        query: &QueryParams,
    ) -> Result<TaskPage, TaskError> {
        let page_request = PageRequest::from(query);

        let (page, total) = tokio::join!(
            self.store.find_page_by_user(user_id, &page_request),
            self.task_count(user_id, query.status),
        );

        let page = page.map_err(|e| TaskError::internal_opaque("Error retrieving tasks", e))?;
        let total = total?;

        let tasks = page
            .into_iter()
            .filter(|task| {
                !task.deleted
                    && query
                        .status
                        .map_or(true, |status| task.status == Some(status))
            })
            .map(mapper::response_of)
            .collect();

        Ok(TaskPage {
            tasks,
            paging: PageInfo::of(total, query),
        })
    }

    /// Fetch a single task; soft-deleted tasks are treated as absent.
    pub async fn get_task_by_id(&self, task_id: &str) -> Result<TaskDetails, TaskError> {
        let task = self
            .store
            .find_by_id(task_id)
            .await
            .map_err(|e| TaskError::internal_opaque("Error searching task", e))?
            .filter(|task| !task.deleted)
            .ok_or_else(|| TaskError::NotFound("Task not found".to_string()))?;
        Ok(mapper::with_details_of(task))
    }

    /// Replace a task's fields from the request, keyed by the existing
    /// identifier.
    ///
    /// The lookup intentionally ignores the deleted flag: updating a
    /// soft-deleted task succeeds and brings it back, since the replacement
    /// document carries `deleted = false`.
    pub async fn update_task(
        &self,
        task_id: &str,
        mut request: TaskRequest,
    ) -> Result<TaskDetails, TaskError> {
        let existing = self
            .store
            .find_by_id(task_id)
            .await
            .map_err(|e| TaskError::internal("Error updating task", e))?
            .ok_or_else(|| TaskError::NotFound("Task not found".to_string()))?;

        request.id = existing.id.clone();
        let task = mapper::update_of(&request)
            .map_err(|e| TaskError::internal("Error updating task", e))?;
        let saved = self
            .store
            .save(task)
            .await
            .map_err(|e| TaskError::internal("Error updating task", e))?;
        Ok(mapper::with_details_of(saved))
    }

    /// Soft-delete a task.
    ///
    /// Idempotent: an already-deleted task is still found by the unfiltered
    /// lookup and re-stamped.
    pub async fn delete_task(&self, task_id: &str) -> Result<(), TaskError> {
        let mut existing = self
            .store
            .find_by_id(task_id)
            .await
            .map_err(|e| TaskError::internal_opaque("Error deleting task", e))?
            .ok_or_else(|| TaskError::NotFound("Task not found".to_string()))?;

        existing.deleted = true;
        existing.last_modified_date = Some(Utc::now());
        self.store
            .save(existing)
            .await
            .map_err(|e| TaskError::internal_opaque("Error deleting task", e))?;
        Ok(())
    }

    async fn task_count(
        &self,
        user_id: &str,
        status: Option<TaskStatus>,
    ) -> Result<u64, TaskError> {
        let count = match status {
            Some(status) => {
                self.store
                    .count_by_user_and_status_and_deleted(user_id, status, false)
                    .await
            }
            None => self.store.count_by_user_and_deleted(user_id, false).await,
        };
        count.map_err(|e| TaskError::internal_opaque("Error retrieving tasks", e))
    }
}

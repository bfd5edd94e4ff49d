//! File-backed task store
//!
//! Stores the task collection as JSON in a file on disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Task, TaskStatus};
use super::query::{PageRequest, SortDirection};
use super::store::TaskStore;
use crate::Result;

/// File-backed task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks keyed by identifier
    cache: RwLock<HashMap<String, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks
                .into_iter()
                .filter_map(|task| task.id.clone().map(|id| (id, task)))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let cache = self.cache.read().await;
        let tasks: Vec<&Task> = cache.values().collect();
        let content = serde_json::to_string_pretty(&tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn sort_page(tasks: &mut [Task], page: &PageRequest) {
    match page.sort_by.as_str() {
        "title" => tasks.sort_by(|a, b| a.title.cmp(&b.title)),
        "status" => tasks.sort_by(|a, b| a.status.cmp(&b.status)),
        "createdDate" => tasks.sort_by(|a, b| a.created_date.cmp(&b.created_date)),
        "lastModifiedDate" => tasks.sort_by(|a, b| a.last_modified_date.cmp(&b.last_modified_date)),
        // dueDate is the default sort key; unknown keys fall back to it
        _ => tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
    }
    if page.direction == SortDirection::Desc {
        tasks.reverse();
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.get(id).cloned())
    }

    async fn find_by_title_and_user(&self, title: &str, user_id: &str) -> Result<Option<Task>> {
        let cache = self.cache.read().await;
        Ok(cache
            .values()
            .find(|task| {
                !task.deleted && task.title == title && task.user_id.as_deref() == Some(user_id)
            })
            .cloned())
    }

    async fn count_by_user_and_deleted(&self, user_id: &str, deleted: bool) -> Result<u64> {
        let cache = self.cache.read().await;
        Ok(cache
            .values()
            .filter(|task| task.user_id.as_deref() == Some(user_id) && task.deleted == deleted)
            .count() as u64)
    }

    async fn count_by_user_and_status_and_deleted(
        &self,
        user_id: &str,
        status: TaskStatus,
        deleted: bool,
    ) -> Result<u64> {
        let cache = self.cache.read().await;
        Ok(cache
            .values()
            .filter(|task| {
                task.user_id.as_deref() == Some(user_id)
                    && task.status == Some(status)
                    && task.deleted == deleted
            })
            .count() as u64)
    }

    async fn find_page_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = {
            let cache = self.cache.read().await;
            cache
                .values()
                .filter(|task| task.user_id.as_deref() == Some(user_id))
                .cloned()
                .collect()
        };
        sort_page(&mut tasks, page);
        Ok(tasks
            .into_iter()
            .skip((page.page * page.size) as usize)
            .take(page.size as usize)
            .collect())
    }

    async fn save(&self, mut task: Task) -> Result<Task> {
        if task.id.as_deref().unwrap_or("").is_empty() {
            task.id = Some(Uuid::new_v4().to_string());
        }
        {
            let mut cache = self.cache.write().await;
            if let Some(id) = task.id.clone() {
                cache.insert(id, task.clone());
            }
        }
        self.persist().await?;
        Ok(task)
    }
}

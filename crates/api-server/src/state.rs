//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tm_core::task::{FileTaskStore, TaskService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: TaskService,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub async fn new(data_dir: PathBuf) -> tm_core::Result<Self> {
        let tasks_path = data_dir.join("tasks.json");
        let store = Arc::new(FileTaskStore::new(tasks_path).await?);

        Ok(Self::with_service(TaskService::new(store)))
    }

    /// Wrap an existing service, bypassing store construction
    pub fn with_service(task_service: TaskService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { task_service }),
        }
    }

    /// Get reference to the task service
    pub fn task_service(&self) -> &TaskService {
        &self.inner.task_service
    }
}

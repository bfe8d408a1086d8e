//! Task service: CRUD over the tasks collection.

use std::sync::Arc;
use studydesk_core::{IdSource, Result, StudyDeskError, Task};

use crate::store::Collection;

pub const MISSING_SUBJECT: &str = "Missing task subject";
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Owns task semantics. Every call is one full load-mutate-save cycle.
pub struct TaskService {
    store: Collection<Task>,
    ids: Arc<dyn IdSource>,
}

impl TaskService {
    pub fn new(store: Collection<Task>, ids: Arc<dyn IdSource>) -> Self {
        Self { store, ids }
    }

    /// All tasks, in insertion order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.load()
    }

    /// Create a task. `subject` must be present and not blank.
    pub fn create_task(
        &self,
        subject: Option<&str>,
        color: Option<String>,
        completed: Option<bool>,
    ) -> Result<Task> {
        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| StudyDeskError::MissingField(MISSING_SUBJECT.into()))?;

        let task = self.store.modify(|tasks| {
            let above = tasks.iter().map(|t| t.id).max();
            let task = Task::new(self.ids.next_id(above), subject, color, completed);
            tasks.push(task.clone());
            Ok(task)
        })?;
        tracing::info!("📝 Task {} created ({})", task.id, task.subject);
        Ok(task)
    }

    /// Set the completion flag of the first task matching `id`.
    /// With `completed: None` the task is returned as stored and nothing is written.
    pub fn update_task(&self, id: &str, completed: Option<bool>) -> Result<Task> {
        let Some(completed) = completed else {
            return self
                .store
                .load()?
                .into_iter()
                .find(|t| t.matches_id(id))
                .ok_or_else(|| not_found(id));
        };

        let task = self.store.modify(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.matches_id(id))
                .ok_or_else(|| not_found(id))?;
            task.completed = completed;
            Ok(task.clone())
        })?;
        tracing::info!("✏️ Task {} completed={}", task.id, task.completed);
        Ok(task)
    }

    /// Remove every task matching `id`.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        let removed = self.store.modify(|tasks| {
            let before = tasks.len();
            tasks.retain(|t| !t.matches_id(id));
            match before - tasks.len() {
                0 => Err(not_found(id)),
                n => Ok(n),
            }
        })?;
        tracing::info!("🗑 Deleted {} task(s) with id {}", removed, id.trim());
        Ok(())
    }
}

fn not_found(id: &str) -> StudyDeskError {
    tracing::warn!("⚠️ Task {:?} not found", id);
    StudyDeskError::NotFound(TASK_NOT_FOUND.into())
}

//! In-memory repository for task synchronization tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::project::domain::ProjectId;
use crate::task::{
    domain::{IssueNumber, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    issue_index: HashMap<(ProjectId, IssueNumber), TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Overwrites an existing task without yielding.
    ///
    /// Used by adapters that must commit a task change together with their
    /// own state while holding a lock.
    pub(crate) fn replace_existing(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let previous = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();

        if previous.issue_number() != task.issue_number() {
            if let Some(issue_number) = task.issue_number() {
                let key = (task.project_id(), issue_number);
                if state
                    .issue_index
                    .get(&key)
                    .is_some_and(|owner| *owner != task.id())
                {
                    return Err(TaskRepositoryError::DuplicateIssue {
                        project_id: task.project_id(),
                        issue_number,
                    });
                }
                state.issue_index.insert(key, task.id());
            }
            if let Some(old_number) = previous.issue_number() {
                state
                    .issue_index
                    .remove(&(previous.project_id(), old_number));
            }
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        if let Some(issue_number) = task.issue_number() {
            let key = (task.project_id(), issue_number);
            if state.issue_index.contains_key(&key) {
                return Err(TaskRepositoryError::DuplicateIssue {
                    project_id: task.project_id(),
                    issue_number,
                });
            }
            state.issue_index.insert(key, task.id());
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.replace_existing(task)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn find_by_issue(
        &self,
        project_id: ProjectId,
        issue_number: IssueNumber,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        let task = state
            .issue_index
            .get(&(project_id, issue_number))
            .and_then(|task_id| state.tasks.get(task_id))
            .cloned();
        Ok(task)
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        Ok(tasks)
    }
}

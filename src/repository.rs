//! CRUD operations over the task store

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::overdue::{self, OverdueTask, RemarkPicker};
use crate::stats::{self, Stats};
use crate::store::Store;
use crate::task::{Task, TaskPatch};

/// Serializes every access to the underlying [`Store`].
///
/// One lock around the whole document: concurrent handlers queue up and the
/// last writer wins, exactly as if requests were served one at a time.
#[derive(Debug)]
pub struct TaskRepository {
    store: Mutex<Store>,
}

impl TaskRepository {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// The tasks of that day, in creation order. Empty if the day has none.
    pub async fn list_tasks(&self, date: NaiveDate) -> Vec<Task> {
        self.store.lock().await.bucket(date).to_vec()
    }

    /// Append a new uncompleted task to that day and persist it.
    /// Returns the created task, next free id included.
    pub async fn add_task(
        &self,
        date: NaiveDate,
        name: &str,
        category: &str,
    ) -> Result<Task, Error> {
        if name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        if category.trim().is_empty() {
            return Err(Error::Validation("category must not be empty".to_string()));
        }

        let mut store = self.store.lock().await;
        let id = store.bucket(date).iter().map(Task::id).max().unwrap_or(0) + 1;
        let task = Task::new(id, name.to_string(), category.to_string());
        store.push_task(date, task.clone());
        store.flush()?;

        log::debug!("Added task {} '{}' on {}", id, name, date);
        Ok(task)
    }

    /// Merge `patch` over the task with this id in that day's bucket.
    /// An unknown date or id is a silent no-op.
    pub async fn update_task(
        &self,
        date: NaiveDate,
        id: u64,
        patch: &TaskPatch,
    ) -> Result<(), Error> {
        let mut store = self.store.lock().await;
        match store
            .bucket_mut(date)
            .and_then(|bucket| bucket.iter_mut().find(|task| task.id() == id))
        {
            Some(task) => task.apply(patch),
            None => log::debug!("Nothing to update for task {} on {}", id, date),
        }
        store.flush()
    }

    /// Remove the task with this id from that day's bucket.
    /// An unknown date or id is a silent no-op.
    pub async fn delete_task(&self, date: NaiveDate, id: u64) -> Result<(), Error> {
        let mut store = self.store.lock().await;
        if let Some(bucket) = store.bucket_mut(date) {
            bucket.retain(|task| task.id() != id);
        }
        store.flush()
    }

    /// Completion stats as seen on `today`: today's counts plus the last week
    pub async fn stats(&self, today: NaiveDate) -> Stats {
        stats::stats_on(self.store.lock().await.buckets(), today)
    }

    /// Every incomplete task from before `today`, each with a remark from `picker`
    pub async fn overdue_tasks(
        &self,
        today: NaiveDate,
        picker: &(dyn RemarkPicker + Send + Sync),
    ) -> Vec<OverdueTask> {
        overdue::overdue_tasks(self.store.lock().await.buckets(), today, picker)
    }

    /// Drop the in-memory document and re-read the backing file
    pub async fn reload(&self) -> Result<(), Error> {
        self.store.lock().await.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn repository(dir: &TempDir) -> TaskRepository {
        TaskRepository::new(Store::open(&dir.path().join("tasks.json")).unwrap())
    }

    #[tokio::test]
    async fn ids_count_up_per_bucket() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let day = date("2024-03-01");

        let first = repo.add_task(day, "a", "cat").await.unwrap();
        let second = repo.add_task(day, "b", "cat").await.unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);

        // Ids are per-bucket, another day starts over
        let elsewhere = repo.add_task(date("2024-03-02"), "c", "cat").await.unwrap();
        assert_eq!(elsewhere.id(), 1);
    }

    #[tokio::test]
    async fn freed_ids_never_collide_with_live_ones() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let day = date("2024-03-01");

        for name in ["a", "b", "c"] {
            repo.add_task(day, name, "cat").await.unwrap();
        }
        repo.delete_task(day, 2).await.unwrap();

        let replacement = repo.add_task(day, "d", "cat").await.unwrap();
        let ids: Vec<u64> = repo.list_tasks(day).await.iter().map(Task::id).collect();
        assert_eq!(ids.iter().filter(|&&id| id == replacement.id()).count(), 1);
    }

    #[tokio::test]
    async fn empty_name_or_category_is_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let day = date("2024-03-01");

        let err = repo.add_task(day, "", "cat").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = repo.add_task(day, "   ", "cat").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = repo.add_task(day, "a", "").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(repo.list_tasks(day).await.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_on_unknown_targets_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let day = date("2024-03-01");
        repo.add_task(day, "a", "cat").await.unwrap();

        // Unknown id, unknown date: acknowledged, nothing changes
        repo.update_task(day, 99, &TaskPatch::completion(true)).await.unwrap();
        repo.update_task(date("2030-01-01"), 1, &TaskPatch::completion(true)).await.unwrap();
        repo.delete_task(day, 99).await.unwrap();
        repo.delete_task(date("2030-01-01"), 1).await.unwrap();

        let tasks = repo.list_tasks(day).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].completed(), false);

        // ...and no bucket appeared for the unknown date
        assert!(repo.list_tasks(date("2030-01-01")).await.is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields_in_place() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let day = date("2024-03-01");
        repo.add_task(day, "a", "cat").await.unwrap();
        repo.add_task(day, "b", "cat").await.unwrap();

        repo.update_task(day, 1, &TaskPatch::completion(true)).await.unwrap();

        let tasks = repo.list_tasks(day).await;
        assert_eq!(tasks[0].completed(), true);
        assert_eq!(tasks[0].name(), "a");
        assert_eq!(tasks[1].completed(), false);
    }
}

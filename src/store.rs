//! This module provides the file-backed store for task data

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::task::Task;

/// A task collection that stores its contents in a local JSON file
#[derive(Debug, PartialEq)]
pub struct Store {
    backing_file: PathBuf,
    data: StoreData,
}

/// The persisted document: every task, bucketed by the day it belongs to.
///
/// Earlier documents carried an `incomplete_tasks` field that nothing ever
/// read; it is gone from the schema, and unknown fields in old files are
/// ignored on load.
#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoreData {
    tasks: BTreeMap<NaiveDate, Vec<Task>>,
}

impl Store {
    /// Initialize a store from the content of a valid backing file, or with
    /// empty contents if the file does not exist yet.
    ///
    /// A file that exists but does not parse is an error that propagates:
    /// silently starting over would throw the user's tasks away on the next
    /// flush.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let data = match std::fs::read(path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No store file at {:?} yet, starting empty", path);
                StoreData::default()
            }
            Err(err) => return Err(Error::StoreIo(err)),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Re-read the backing file, dropping whatever was in memory.
    /// Useful after editing the JSON file by hand while the server runs.
    pub fn reload(&mut self) -> Result<(), Error> {
        let fresh = Self::open(&self.backing_file)?;
        self.data = fresh.data;
        Ok(())
    }

    /// Store the current contents to the backing file.
    ///
    /// The whole document is rewritten in place on every call. There is no
    /// temp-file swap, so a crash mid-write can leave a corrupt file.
    pub fn flush(&self) -> Result<(), Error> {
        let contents = serde_json::to_vec_pretty(&self.data)?;
        std::fs::write(&self.backing_file, contents)?;
        log::debug!(
            "Flushed {} day(s) of tasks to {:?}",
            self.data.tasks.len(),
            self.backing_file
        );
        Ok(())
    }

    /// Every bucket, keyed by date
    pub fn buckets(&self) -> &BTreeMap<NaiveDate, Vec<Task>> {
        &self.data.tasks
    }

    /// The tasks of one day, in creation order. Empty if the day has none.
    pub fn bucket(&self, date: NaiveDate) -> &[Task] {
        self.data
            .tasks
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mutable access to one day's bucket, if it exists.
    /// This never materializes an empty bucket, unlike [`Store::push_task`].
    pub fn bucket_mut(&mut self, date: NaiveDate) -> Option<&mut Vec<Task>> {
        self.data.tasks.get_mut(&date)
    }

    /// Append a task to its day's bucket, creating the bucket on first use
    pub fn push_task(&mut self, date: NaiveDate, task: Task) {
        self.data.tasks.entry(date).or_default().push(task);
    }
}

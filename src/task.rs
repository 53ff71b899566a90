//! Daily to-do tasks

use serde::{Deserialize, Serialize};

/// A single to-do task, owned by the date bucket it was created in.
///
/// Ids are only unique within one bucket: the repository hands out
/// `max(live ids) + 1` per date, so tasks on different dates may well share an
/// id. There is no cross-date identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: u64,
    name: String,
    category: String,
    completed: bool,
}

impl Task {
    /// Create a brand new task. New tasks always start uncompleted.
    pub fn new(id: u64, name: String, category: String) -> Self {
        Self {
            id,
            name,
            category,
            completed: false,
        }
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn category(&self) -> &str { &self.category }
    pub fn completed(&self) -> bool { self.completed }

    /// Merge the fields of `patch` over this task.
    /// Fields the patch does not carry are left untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// A partial update to a task, as clients send it.
///
/// Clients tend to echo whole task objects back, `id` included, so unknown
/// fields are tolerated and dropped rather than rejected.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only flips the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

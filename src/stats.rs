//! Completion statistics over the task buckets

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::task::Task;

/// How many days `/api/stats` reports, today included
pub const HISTORY_DAYS: u64 = 7;

/// Completed-versus-total counts for one set of tasks
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
    /// `round(completed / total * 100)`, or 0 when there are no tasks at all
    pub percentage: u32,
}

impl Completion {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed()).count();
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }
}

fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// One day of completion history
#[derive(Clone, Debug, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub completion: Completion,
}

/// Today's counts plus one entry per day of the last week, most recent first
#[derive(Clone, Debug, Serialize)]
pub struct Stats {
    pub today: Completion,
    pub history: Vec<DayStats>,
}

/// Compute the stats as seen on `today`.
/// `history[0]` is today itself, `history[6]` is six days ago.
pub fn stats_on(buckets: &BTreeMap<NaiveDate, Vec<Task>>, today: NaiveDate) -> Stats {
    let history = (0..HISTORY_DAYS)
        .map(|offset| {
            let date = today - Days::new(offset);
            DayStats {
                date,
                completion: Completion::of(tasks_for(buckets, date)),
            }
        })
        .collect();

    Stats {
        today: Completion::of(tasks_for(buckets, today)),
        history,
    }
}

fn tasks_for(buckets: &BTreeMap<NaiveDate, Vec<Task>>, date: NaiveDate) -> &[Task] {
    buckets.get(&date).map(Vec::as_slice).unwrap_or_default()
}

//! Digging up incomplete tasks from past days, and nagging about them

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use crate::task::Task;

/// Picks the remark attached to an overdue task.
///
/// The stock picker is random; tests (or anyone who dislikes the house humor)
/// can plug in their own.
pub trait RemarkPicker {
    fn pick(&self, name: &str, days_late: i64) -> String;
}

/// A task becomes a "classic" once it is more than this many days late
const CLASSIC_AFTER_DAYS: i64 = 7;

/// The stock picker: a fixed template for long-overdue tasks, otherwise a
/// uniform choice among a handful of canned remarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct CannedRemarks;

impl RemarkPicker for CannedRemarks {
    fn pick(&self, name: &str, days_late: i64) -> String {
        if days_late > CLASSIC_AFTER_DAYS {
            return format!(
                "Wow! '{name}' is a classic by now - {days_late} days late! Time for the big comeback?"
            );
        }

        let mut remarks = vec![
            format!("Hmm, '{name}' has been waiting for {days_late} days. Maybe it is finally time?"),
            format!("'{name}' is like wine, except it does not get better with age!"),
            format!("Could '{name}' be your new procrastination record? {days_late} days is quite impressive!"),
            format!("'{name}' probably thinks it has been forgotten. How about cheering it up by doing it?"),
            format!("{days_late} days ago, '{name}' was important. Is it still? Time to find out!"),
        ];
        let index = rand::thread_rng().gen_range(0..remarks.len());
        remarks.swap_remove(index)
    }
}

/// An incomplete task from a past date, augmented with how late it is
#[derive(Clone, Debug, Serialize)]
pub struct OverdueTask {
    #[serde(flatten)]
    pub task: Task,
    pub original_date: NaiveDate,
    pub days_late: i64,
    pub ai_comment: String,
}

/// Every incomplete task dated strictly before `today`, oldest date first.
/// Tasks dated today (or later) are not overdue yet, however incomplete.
pub fn overdue_tasks(
    buckets: &BTreeMap<NaiveDate, Vec<Task>>,
    today: NaiveDate,
    picker: &dyn RemarkPicker,
) -> Vec<OverdueTask> {
    let mut overdue = Vec::new();

    for (&date, tasks) in buckets.range(..today) {
        let days_late = (today - date).num_days();
        for task in tasks.iter().filter(|task| !task.completed()) {
            overdue.push(OverdueTask {
                task: task.clone(),
                original_date: date,
                days_late,
                ai_comment: picker.pick(task.name(), days_late),
            });
        }
    }

    overdue
}

//! This crate provides a small single-user daily task tracker.
//!
//! Tasks live in per-day buckets inside one JSON document, held by a
//! [`Store`](store::Store) that persists to a single local file. The
//! [`TaskRepository`](repository::TaskRepository) wraps it with the usual CRUD
//! operations behind one lock, the [`stats`] module derives completion
//! percentages, and the [`overdue`] module digs up incomplete tasks from past
//! days and attaches a gently reproachful remark to each.
//!
//! The [`api`] module exposes all of this over HTTP as JSON.

pub mod api;
pub mod config;
mod error;
pub use error::Error;
pub mod overdue;
pub mod repository;
pub mod stats;
pub mod store;
mod task;
pub use task::Task;
pub use task::TaskPatch;

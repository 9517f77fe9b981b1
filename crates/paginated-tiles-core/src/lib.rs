//! Observable primitives for Paginated Tiles.
//!
//! This crate provides the small reactive toolkit the tile grid widget is
//! built on:
//!
//! - **Signal/Slot System**: subscriber lists with connection IDs and guards
//! - **Property System**: values with change detection and a change signal
//! - **Observable Lists**: a shared item store that reports every mutation
//! - **Task Queue**: deferred "run after this event" processing
//! - **Logging**: `tracing` targets and performance spans
//!
//! Everything runs on the UI thread. Types are `Send + Sync` so they can be
//! shared through `Arc`, but nothing here spawns threads.
//!
//! # Example
//!
//! ```
//! use paginated_tiles_core::{ObservableList, TaskQueue};
//! use std::sync::Arc;
//!
//! let items = Arc::new(ObservableList::from_vec(vec!["a", "b"]));
//! let tasks = Arc::new(TaskQueue::new());
//!
//! let deferred = tasks.clone();
//! items.changed().connect(move |change| {
//!     let change = change.clone();
//!     deferred.post(move || println!("applied after the event: {change:?}"));
//! });
//!
//! items.push("c");
//! assert_eq!(tasks.process_pending(), 1);
//! ```

pub mod list;
pub mod logging;
pub mod property;
pub mod signal;
pub mod task;

pub use list::{ListChange, ObservableList};
pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use task::{TaskId, TaskQueue};

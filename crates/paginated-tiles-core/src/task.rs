//! Deferred task queue.
//!
//! UI code uses [`TaskQueue::post`] to run something "after the current event
//! has been processed", typically a state change that would otherwise re-enter
//! an in-progress layout pass. The host event loop calls
//! [`TaskQueue::process_pending`] once per tick.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a deferred task.
///
/// IDs increase monotonically in posting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// A FIFO queue of deferred closures.
///
/// The queue is internally locked so it can be shared as `Arc<TaskQueue>`
/// between the event loop and the widgets that post into it. The lock is
/// never held while a task runs, so tasks may post or cancel other tasks.
pub struct TaskQueue {
    tasks: Mutex<VecDeque<TaskData>>,
}

impl TaskQueue {
    /// Create an empty task queue.
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    /// Post a task to run on the next call to [`process_pending`](Self::process_pending).
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::TASK, task = id.as_u64(), "task posted");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was still queued and has been removed.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.lock();
        match tasks.iter().position(|t| t.id == id) {
            Some(pos) => {
                tasks.remove(pos);
                tracing::trace!(target: targets::TASK, task = id.as_u64(), "task cancelled");
                true
            }
            None => false,
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run every task that was queued when this call started, in order.
    ///
    /// Tasks posted while processing wait for the next call. Tasks cancelled
    /// while processing do not run. Returns the number of tasks executed.
    pub fn process_pending(&self) -> usize {
        let Some(last) = self.tasks.lock().back().map(|t| t.id) else {
            return 0;
        };

        let mut executed = 0;
        loop {
            let next = {
                let mut tasks = self.tasks.lock();
                match tasks.front() {
                    Some(front) if front.id <= last => tasks.pop_front(),
                    _ => None,
                }
            };
            let Some(task_data) = next else { break };
            (task_data.task)();
            executed += 1;
        }

        tracing::trace!(target: targets::TASK, executed, "processed pending tasks");
        executed
    }

    /// Run tasks until the queue is empty, including tasks posted meanwhile.
    ///
    /// Returns the number of ticks it took. Stops after `max_ticks` to guard
    /// against tasks that keep re-posting themselves.
    pub fn run_until_idle(&self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks && self.process_pending() > 0 {
            ticks += 1;
        }
        ticks
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}

// Shared between the event loop and widgets
static_assertions::assert_impl_all!(TaskQueue: Send, Sync);

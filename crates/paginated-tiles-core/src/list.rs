//! Observable lists.
//!
//! [`ObservableList<T>`] is the shared item store behind a tile grid. Every
//! mutation emits a [`ListChange`] describing what happened, after the write
//! lock has been released. Share a list between owners with
//! `Arc<ObservableList<T>>`; mutations through any handle are seen by all.

use std::ops::Range;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::Signal;

/// Description of a single list mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Items were inserted at `index`.
    Added { index: usize, count: usize },
    /// Items were removed starting at `index`.
    Removed { index: usize, count: usize },
    /// The item at `index` was replaced.
    Updated { index: usize },
    /// The whole content was replaced (including `clear`).
    Reset { len: usize },
}

/// A vector with change notification.
pub struct ObservableList<T> {
    items: RwLock<Vec<T>>,
    changed: Signal<ListChange>,
}

impl<T: Clone + Send + Sync + 'static> ObservableList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list that owns `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            changed: Signal::new(),
        }
    }

    /// The signal emitted after each mutation.
    pub fn changed(&self) -> &Signal<ListChange> {
        &self.changed
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Clone the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Clone the items in `range`, clamped to the current length.
    pub fn slice(&self, range: Range<usize>) -> Vec<T> {
        let items = self.items.read();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        items[start..end].to_vec()
    }

    /// Clone the full content.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Access the content through a closure without cloning.
    ///
    /// Do not mutate this list from inside `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        f(&self.items.read())
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.notify(ListChange::Added { index, count: 1 });
    }

    /// Append several items as one change.
    pub fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let (index, count) = {
            let mut items = self.items.write();
            let index = items.len();
            items.extend(iter);
            (index, items.len() - index)
        };
        if count > 0 {
            self.notify(ListChange::Added { index, count });
        }
    }

    /// Insert an item at `index`, clamped to the current length.
    pub fn insert(&self, index: usize, item: T) {
        let index = {
            let mut items = self.items.write();
            let index = index.min(items.len());
            items.insert(index, item);
            index
        };
        self.notify(ListChange::Added { index, count: 1 });
    }

    /// Remove and return the item at `index`, if it exists.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.write();
            if index < items.len() {
                Some(items.remove(index))
            } else {
                None
            }
        };
        if removed.is_some() {
            self.notify(ListChange::Removed { index, count: 1 });
        }
        removed
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn set(&self, index: usize, item: T) -> Option<T> {
        let old = {
            let mut items = self.items.write();
            items
                .get_mut(index)
                .map(|slot| std::mem::replace(slot, item))
        };
        if old.is_some() {
            self.notify(ListChange::Updated { index });
        }
        old
    }

    /// Replace the whole content.
    pub fn set_all(&self, new_items: Vec<T>) {
        let len = new_items.len();
        *self.items.write() = new_items;
        self.notify(ListChange::Reset { len });
    }

    /// Remove all items.
    pub fn clear(&self) {
        let was_empty = {
            let mut items = self.items.write();
            let was_empty = items.is_empty();
            items.clear();
            was_empty
        };
        if !was_empty {
            self.notify(ListChange::Reset { len: 0 });
        }
    }

    fn notify(&self, change: ListChange) {
        tracing::trace!(target: targets::LIST, ?change, "list changed");
        self.changed.emit(change);
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &*self.items.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(ObservableList<String>: Send, Sync);

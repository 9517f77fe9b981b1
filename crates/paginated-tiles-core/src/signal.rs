//! Signals: typed change notifications.
//!
//! A [`Signal<Args>`] keeps a list of connected slots (closures) and invokes
//! each of them when the signal is emitted. Widgets expose one signal per
//! observable change ("items changed", "container resized", ...) and the
//! skin subscribes to the ones it cares about. [`Signal::connect`] returns a
//! [`ConnectionId`]; [`Signal::connect_scoped`] returns a [`ConnectionGuard`]
//! that disconnects on drop.
//!
//! # Re-entrancy
//!
//! All slots run synchronously on the emitting thread. The connection list is
//! snapshotted before the first slot runs, so a slot may connect, disconnect
//! or emit on the same signal without deadlocking. A slot disconnected by an
//! earlier slot during the same emission still receives that emission.
//!
//! # Example
//!
//! ```
//! use paginated_tiles_core::Signal;
//!
//! let page_changed = Signal::<usize>::new();
//!
//! let id = page_changed.connect(|page| {
//!     println!("Now showing page {}", page);
//! });
//!
//! page_changed.emit(3);
//! page_changed.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, for [`Signal::disconnect`].
    ///
    /// Valid until the slot is disconnected or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A list of slots notified with a value of type `Args`.
///
/// Notifications without payload use `Signal<()>`.
pub struct Signal<Args> {
    slots: Arc<SlotTable<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// An unconnected signal.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Add `slot` to the end of the slot list.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected automatically when the returned
    /// guard is dropped.
    ///
    /// The guard does not keep the signal alive; dropping it after the signal
    /// is gone is a no-op.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            slots: Arc::downgrade(&self.slots),
            id,
        }
    }

    /// Remove one slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Suppress emissions until unblocked. Emissions while blocked are
    /// dropped, not queued.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emissions are suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Call every slot with `args`, oldest connection first.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = snapshot.len(), "emitting signal");

        for slot in snapshot {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// A connection guard that disconnects its slot when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use paginated_tiles_core::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<usize>::new();
/// let total = Arc::new(AtomicUsize::new(0));
/// {
///     let total = total.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         total.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(4);
/// }
/// signal.emit(5);
/// assert_eq!(total.load(Ordering::SeqCst), 4);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<Args> {
    slots: Weak<SlotTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn page_log(signal: &Signal<usize>) -> (ConnectionId, Arc<Mutex<Vec<usize>>>) {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let sink = pages.clone();
        let id = signal.connect(move |&page| sink.lock().push(page));
        (id, pages)
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let resized = Signal::<(f32, f32)>::new();
        let order = Arc::new(Mutex::new(String::new()));

        for tag in ['a', 'b', 'c'] {
            let order = order.clone();
            resized.connect(move |&(w, _)| order.lock().push_str(&format!("{tag}{w}")));
        }
        resized.emit((4.0, 2.0));

        assert_eq!(*order.lock(), "a4b4c4");
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let current_page = Signal::<usize>::new();
        let (id, pages) = page_log(&current_page);

        current_page.emit(1);
        assert!(current_page.disconnect(id));
        assert!(!current_page.disconnect(id));
        current_page.emit(2);

        assert_eq!(*pages.lock(), vec![1]);
    }

    #[test]
    fn test_blocked_emissions_are_dropped() {
        let current_page = Signal::<usize>::new();
        let (_, pages) = page_log(&current_page);

        current_page.set_blocked(true);
        assert!(current_page.is_blocked());
        current_page.emit(5);
        current_page.set_blocked(false);
        current_page.emit(6);

        assert_eq!(*pages.lock(), vec![6]);
    }

    #[test]
    fn test_disconnect_all_and_debug() {
        let reset = Signal::<()>::new();
        reset.connect(|_| {});
        reset.connect(|_| {});
        assert!(format!("{reset:?}").contains("connections: 2"));

        reset.disconnect_all();
        assert_eq!(reset.connection_count(), 0);
    }

    #[test]
    fn test_guard_disconnects_on_drop() {
        let current_page = Signal::<usize>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let guard = {
            let hits = hits.clone();
            current_page.connect_scoped(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        current_page.emit(0);
        assert_eq!(current_page.connection_count(), 1);

        drop(guard);
        current_page.emit(1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(current_page.connection_count(), 0);
    }

    #[test]
    fn test_guard_outlives_signal() {
        let guard = {
            let reset = Signal::<()>::new();
            reset.connect_scoped(|_| {})
        };
        drop(guard);
    }

    #[test]
    fn test_slot_may_reenter_signal() {
        let depth_signal = Arc::new(Signal::<usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&depth_signal);
        let calls_clone = calls.clone();
        depth_signal.connect(move |&depth| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if depth < 2 {
                if let Some(signal) = weak.upgrade() {
                    signal.connect(|_| {});
                    signal.emit(depth + 1);
                }
            }
        });

        depth_signal.emit(0);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(depth_signal.connection_count(), 3);
    }
}

//! Integration tests combining lists, properties, signals and the task queue
//! the way a widget does: react to a change now, apply the result next tick.

use std::sync::Arc;

use paginated_tiles_core::{ListChange, ObservableList, Property, TaskId, TaskQueue};
use parking_lot::Mutex;

/// Mirrors a list's length into a property, one tick late, coalescing
/// bursts of changes into a single update.
struct LengthMirror {
    length: Arc<Property<usize>>,
    pending: Arc<Mutex<Option<(usize, TaskId)>>>,
}

impl LengthMirror {
    fn attach(list: &Arc<ObservableList<u32>>, tasks: &Arc<TaskQueue>) -> Self {
        let length = Arc::new(Property::new(list.len()));
        let pending: Arc<Mutex<Option<(usize, TaskId)>>> = Arc::new(Mutex::new(None));

        let weak_list = Arc::downgrade(list);
        let tasks_clone = tasks.clone();
        let length_clone = length.clone();
        let pending_clone = pending.clone();
        list.changed().connect(move |_change: &ListChange| {
            let Some(list) = weak_list.upgrade() else { return };
            let len = list.len();

            let mut pending = pending_clone.lock();
            if let Some((_, stale)) = pending.take() {
                tasks_clone.cancel(stale);
            }
            let length = length_clone.clone();
            let slot = pending_clone.clone();
            let id = tasks_clone.post(move || {
                slot.lock().take();
                length.set(len);
            });
            *pending = Some((len, id));
        });

        Self { length, pending }
    }
}

#[test]
fn test_burst_of_changes_applies_once() {
    let list = Arc::new(ObservableList::from_vec(vec![1u32, 2]));
    let tasks = Arc::new(TaskQueue::new());
    let mirror = LengthMirror::attach(&list, &tasks);

    let applied = Arc::new(Mutex::new(Vec::new()));
    let applied_clone = applied.clone();
    mirror.length.changed().connect(move |&len| applied_clone.lock().push(len));

    list.push(3);
    list.push(4);
    list.remove(0);

    assert_eq!(mirror.length.get(), 2);
    assert_eq!(tasks.pending_count(), 1);
    assert_eq!(mirror.pending.lock().map(|(len, _)| len), Some(3));

    assert_eq!(tasks.process_pending(), 1);
    assert_eq!(mirror.length.get(), 3);
    assert_eq!(*applied.lock(), vec![3]);
    assert!(mirror.pending.lock().is_none());
}

#[test]
fn test_change_during_tick_waits_for_next_tick() {
    let list = Arc::new(ObservableList::from_vec(Vec::<u32>::new()));
    let tasks = Arc::new(TaskQueue::new());
    let mirror = LengthMirror::attach(&list, &tasks);

    // A listener on the mirrored length mutates the list again.
    let weak_list = Arc::downgrade(&list);
    mirror.length.changed().connect(move |&len| {
        if len == 1 {
            if let Some(list) = weak_list.upgrade() {
                list.push(99);
            }
        }
    });

    list.push(1);
    assert_eq!(tasks.process_pending(), 1);
    assert_eq!(mirror.length.get(), 1);
    assert!(tasks.has_pending());

    assert_eq!(tasks.run_until_idle(4), 1);
    assert_eq!(mirror.length.get(), 2);
    assert_eq!(list.to_vec(), vec![1, 99]);
}

#[test]
fn test_reset_after_clear() {
    let list = Arc::new(ObservableList::from_vec(vec![5u32, 6, 7]));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    list.changed().connect(move |change| seen_clone.lock().push(change.clone()));

    list.clear();
    list.clear();
    list.set_all(vec![8]);

    assert_eq!(
        *seen.lock(),
        vec![ListChange::Reset { len: 0 }, ListChange::Reset { len: 1 }]
    );
}

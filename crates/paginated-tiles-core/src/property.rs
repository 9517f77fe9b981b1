//! Observable properties.
//!
//! A [`Property<T>`] wraps a value and owns the [`Signal`] that announces its
//! changes. Setting a value equal to the current one is not a change and
//! emits nothing.
//!
//! # Example
//!
//! ```
//! use paginated_tiles_core::Property;
//!
//! let tile_width = Property::new(120.0_f32);
//! tile_width.changed().connect(|w| println!("tile width is now {w}"));
//!
//! assert!(!tile_width.set(120.0));
//! assert!(tile_width.set(96.0));
//! assert_eq!(tile_width.get(), 96.0);
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::signal::Signal;

/// A value with change detection and change notification.
///
/// The lock is released before `changed` is emitted, so slots may read or
/// write the property again.
pub struct Property<T> {
    value: RwLock<T>,
    changed: Signal<T>,
}

impl<T: Clone + Send + 'static> Property<T> {
    /// A property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            changed: Signal::new(),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without emitting `changed`.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }

    /// The signal emitted with the new value after each effective change.
    pub fn changed(&self) -> &Signal<T> {
        &self.changed
    }
}

impl<T: Clone + PartialEq + Send + 'static> Property<T> {
    /// Set the value, returning `true` and emitting `changed` if it differs
    /// from the current one.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Like [`set`](Self::set), returning the previous value on change.
    pub fn replace(&self, value: T) -> Option<T> {
        let old = {
            let mut current = self.value.write();
            if *current == value {
                return None;
            }
            std::mem::replace(&mut *current, value.clone())
        };
        self.changed.emit(value);
        Some(old)
    }
}

impl<T: Clone + Default + Send + 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .field("listeners", &self.changed.connection_count())
            .finish()
    }
}

/// A read-only view of a property.
///
/// Used to hand out state the holder alone may mutate, such as the page
/// index owned by the pagination host.
pub struct ReadOnlyProperty<'a, T> {
    inner: &'a Property<T>,
}

impl<'a, T: Clone + Send + 'static> ReadOnlyProperty<'a, T> {
    /// View `property` without write access.
    pub fn new(property: &'a Property<T>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the value through a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with(f)
    }

    /// The change signal of the underlying property.
    pub fn changed(&self) -> &'a Signal<T> {
        self.inner.changed()
    }
}

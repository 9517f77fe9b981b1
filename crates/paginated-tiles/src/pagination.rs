//! The pagination host.
//!
//! [`Pagination`] owns the current page index and the page count, and is the
//! only authority on which page is current. Whenever either changes it asks
//! its page factory to build the page now current. It knows nothing about
//! tiles; the skin installs the factory.

use std::sync::Arc;

use parking_lot::RwLock;
use paginated_tiles_core::logging::targets;
use paginated_tiles_core::{Property, ReadOnlyProperty, Signal};

use crate::error::{Error, Result};
use crate::style::{substructure, StyleClasses};

/// Callback that builds the page for a page index.
pub type PageFactory = Arc<dyn Fn(usize) + Send + Sync>;

/// Page index and page count state with page-build requests.
///
/// # Invariants
///
/// - `page_count() >= 1`
/// - `current_page_index() < page_count()`
///
/// # Signals
///
/// - `current_page_index_changed(usize)`
/// - `page_count_changed(usize)`
pub struct Pagination {
    current_page_index: Property<usize>,
    page_count: Property<usize>,
    page_factory: RwLock<Option<PageFactory>>,
    style_classes: StyleClasses,
}

impl Pagination {
    /// Create a host with one page.
    pub fn new() -> Self {
        Self {
            current_page_index: Property::new(0),
            page_count: Property::new(1),
            page_factory: RwLock::new(None),
            style_classes: StyleClasses::with_class(substructure::PAGINATION_CONTROL),
        }
    }

    /// The current page index.
    pub fn current_page_index(&self) -> usize {
        self.current_page_index.get()
    }

    /// Read-only view of the current page index.
    pub fn current_page_index_property(&self) -> ReadOnlyProperty<'_, usize> {
        ReadOnlyProperty::new(&self.current_page_index)
    }

    /// Emitted with the new index whenever the current page changes.
    pub fn current_page_index_changed(&self) -> &Signal<usize> {
        self.current_page_index.changed()
    }

    /// The number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count.get()
    }

    /// Emitted with the new count whenever the page count changes.
    pub fn page_count_changed(&self) -> &Signal<usize> {
        self.page_count.changed()
    }

    /// Style classes of the navigation strip.
    pub fn style_classes(&self) -> &StyleClasses {
        &self.style_classes
    }

    /// Whether the current page is the first one.
    pub fn is_first_page(&self) -> bool {
        self.current_page_index() == 0
    }

    /// Whether the current page is the last one.
    pub fn is_last_page(&self) -> bool {
        self.current_page_index() + 1 >= self.page_count()
    }

    /// Install the page factory, replacing any previous one.
    pub fn set_page_factory(&self, factory: PageFactory) {
        *self.page_factory.write() = Some(factory);
    }

    /// Remove the page factory.
    pub fn clear_page_factory(&self) {
        self.page_factory.write().take();
    }

    /// Whether a page factory is installed.
    pub fn has_page_factory(&self) -> bool {
        self.page_factory.read().is_some()
    }

    /// Set the current page index.
    ///
    /// Out-of-range indices are ignored. Returns `true` if the index changed,
    /// in which case the new page is requested.
    pub fn set_current_page_index(&self, index: usize) -> bool {
        if index >= self.page_count() {
            tracing::trace!(
                target: targets::PAGINATION,
                index,
                page_count = self.page_count(),
                "ignoring out-of-range page index"
            );
            return false;
        }
        if self.current_page_index.set(index) {
            self.request_page();
            true
        } else {
            false
        }
    }

    /// Like [`set_current_page_index`](Self::set_current_page_index) but
    /// reports out-of-range indices.
    pub fn try_set_current_page_index(&self, index: usize) -> Result<bool> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(Error::page_index_out_of_range(index, page_count));
        }
        Ok(self.set_current_page_index(index))
    }

    /// Set the number of pages (at least 1).
    ///
    /// The current index is clamped into the new range first. Returns `true`
    /// if the count changed, in which case the current page is requested
    /// again.
    pub fn set_page_count(&self, page_count: usize) -> bool {
        let page_count = page_count.max(1);
        if page_count == self.page_count() {
            return false;
        }

        let clamped = self.current_page_index().min(page_count - 1);
        self.current_page_index.set(clamped);
        self.page_count.set(page_count);

        tracing::debug!(target: targets::PAGINATION, page_count, current = clamped, "page count changed");
        self.request_page();
        true
    }

    /// Ask the page factory to build the current page.
    ///
    /// Does nothing if no factory is installed.
    pub fn request_page(&self) {
        let factory = self.page_factory.read().clone();
        if let Some(factory) = factory {
            let index = self.current_page_index();
            tracing::trace!(target: targets::PAGINATION, index, "requesting page");
            factory(index);
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pagination")
            .field("current_page_index", &self.current_page_index())
            .field("page_count", &self.page_count())
            .field("has_page_factory", &self.has_page_factory())
            .finish()
    }
}

static_assertions::assert_impl_all!(Pagination: Send, Sync);

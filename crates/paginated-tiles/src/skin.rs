//! The default skin: pagination and tile layout for [`PaginatedTiles`].
//!
//! The skin owns a [`Pagination`] host and the page currently on screen. It
//! reacts to three kinds of change:
//!
//! - **Resize** of the page container (and tile size/gap changes, which are
//!   replayed as a resize at the current container size)
//! - **Item list** mutation or replacement
//! - **Cell factory** installation or removal
//!
//! # Change reaction
//!
//! On every change the skin recomputes tiles-per-page and the page count.
//! Then:
//!
//! 1. If the page count differs from the host's, the new tiles-per-page is
//!    stored and the page count update is deferred to the next UI tick. The
//!    host rebuilds the current page when it applies the update, so nothing
//!    is rebuilt here.
//! 2. Otherwise, if tiles-per-page changed, the current page is cleared and
//!    refilled in place.
//! 3. Otherwise nothing happens.
//!
//! A page count update that is still pending counts as the host's page count.
//! A newer, different count replaces the pending update instead of queuing a
//! second one.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use paginated_tiles_core::logging::{span_names, targets};
use paginated_tiles_core::{ConnectionGuard, ListChange, PerfSpan, TaskId, TaskQueue};

use crate::behavior::{KeyPressEvent, PaginatedTilesBehavior};
use crate::cell::TileCell;
use crate::control::PaginatedTiles;
use crate::geometry::{Size, TileGap};
use crate::layout::{self, TileLayout};
use crate::page::{PageContainer, TilePage};
use crate::pagination::Pagination;

/// The skin of a [`PaginatedTiles`] control.
///
/// Dropping the skin detaches it from the control.
pub struct PaginatedTilesSkin<T> {
    inner: Arc<SkinInner<T>>,
    behavior: PaginatedTilesBehavior,
}

impl<T: Clone + Send + Sync + 'static> PaginatedTilesSkin<T> {
    /// Create the skin for `control`. Deferred work is posted to `tasks`,
    /// which the host event loop drains once per tick.
    ///
    /// Pages are only built once the control has a cell factory.
    pub fn new(control: Arc<PaginatedTiles<T>>, tasks: Arc<TaskQueue>) -> Self {
        let inner = Arc::new_cyclic(|this| SkinInner {
            this: this.clone(),
            control,
            pagination: Arc::new(Pagination::new()),
            tasks,
            state: Mutex::new(LayoutState::default()),
            connections: Mutex::new(None),
        });
        inner.connect_control();
        if inner.control.cell_factory().is_some() {
            inner.create_layout();
        }

        Self {
            inner,
            behavior: PaginatedTilesBehavior::new(),
        }
    }

    /// The skinned control.
    pub fn control(&self) -> &Arc<PaginatedTiles<T>> {
        &self.inner.control
    }

    /// The pagination host.
    pub fn pagination(&self) -> &Arc<Pagination> {
        &self.inner.pagination
    }

    /// The keyboard behavior.
    pub fn behavior(&self) -> &PaginatedTilesBehavior {
        &self.behavior
    }

    /// Replace the keyboard behavior.
    pub fn set_behavior(&mut self, behavior: PaginatedTilesBehavior) {
        self.behavior = behavior;
    }

    /// Tiles per page, or 0 while the container has not been sized yet.
    pub fn tiles_per_page(&self) -> usize {
        self.inner.state.lock().tiles_per_page
    }

    /// The container of the page on screen, once one has been built.
    pub fn current_page(&self) -> Option<Arc<PageContainer<T>>> {
        self.inner.state.lock().current_page.clone()
    }

    /// The last size given to [`layout`](Self::layout).
    pub fn viewport(&self) -> Size {
        self.inner.state.lock().viewport
    }

    /// The page count waiting to be applied on the next tick, if any.
    pub fn pending_page_count(&self) -> Option<usize> {
        self.inner.state.lock().pending_page_count.map(|(count, _)| count)
    }

    /// Whether pages are being built (a cell factory has been seen).
    pub fn is_layout_created(&self) -> bool {
        self.inner.state.lock().layout_created
    }

    /// Lay the skin out at `size`.
    ///
    /// The current page container is resized to `size`; if that changes its
    /// size and both dimensions are positive, tiles are recomputed.
    pub fn layout(&self, size: Size) {
        self.inner.layout(size);
    }

    /// Go to the next page. Returns `false` on the last page.
    pub fn select_next(&self) -> bool {
        let pagination = &self.inner.pagination;
        let current = pagination.current_page_index();
        if current + 1 < pagination.page_count() {
            pagination.set_current_page_index(current + 1)
        } else {
            false
        }
    }

    /// Go to the previous page. Returns `false` on the first page.
    pub fn select_previous(&self) -> bool {
        let pagination = &self.inner.pagination;
        let current = pagination.current_page_index();
        if current > 0 {
            pagination.set_current_page_index(current - 1)
        } else {
            false
        }
    }

    /// Route a key press through the behavior. Returns `true` if consumed.
    pub fn handle_key_press(&self, event: &KeyPressEvent) -> bool {
        self.behavior.handle_key_press(event, self)
    }

    /// Detach from the control: disconnect all listeners, drop the page
    /// factory and the current page, and cancel any pending page count
    /// update.
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl<T> std::fmt::Debug for PaginatedTilesSkin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("PaginatedTilesSkin")
            .field("pagination", &self.inner.pagination)
            .field("tiles_per_page", &state.tiles_per_page)
            .field("viewport", &state.viewport)
            .field("pending_page_count", &state.pending_page_count.map(|(c, _)| c))
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(PaginatedTilesSkin<u32>: Send, Sync);

struct LayoutState<T> {
    tiles_per_page: usize,
    viewport: Size,
    current_page: Option<Arc<PageContainer<T>>>,
    pending_page_count: Option<(usize, TaskId)>,
    layout_created: bool,
}

impl<T> Default for LayoutState<T> {
    fn default() -> Self {
        Self {
            tiles_per_page: 0,
            viewport: Size::ZERO,
            current_page: None,
            pending_page_count: None,
            layout_created: false,
        }
    }
}

struct ControlConnections {
    _items: ConnectionGuard<ListChange>,
    _tile_size: ConnectionGuard<Size>,
    _tile_gap: ConnectionGuard<TileGap>,
    _cell_factory: ConnectionGuard<()>,
}

struct SkinInner<T> {
    this: Weak<Self>,
    control: Arc<PaginatedTiles<T>>,
    pagination: Arc<Pagination>,
    tasks: Arc<TaskQueue>,
    state: Mutex<LayoutState<T>>,
    connections: Mutex<Option<ControlConnections>>,
}

impl<T: Clone + Send + Sync + 'static> SkinInner<T> {
    fn connect_control(&self) {
        let control = &self.control;

        let this = self.this.clone();
        let items = control.items_changed().connect_scoped(move |_| {
            if let Some(inner) = this.upgrade() {
                inner.on_items_changed();
            }
        });

        let this = self.this.clone();
        let tile_size = control.tile_size_changed().connect_scoped(move |_| {
            if let Some(inner) = this.upgrade() {
                inner.relayout();
            }
        });

        let this = self.this.clone();
        let tile_gap = control.tile_gap_changed().connect_scoped(move |_| {
            if let Some(inner) = this.upgrade() {
                inner.relayout();
            }
        });

        let this = self.this.clone();
        let cell_factory = control.cell_factory_changed().connect_scoped(move |_| {
            if let Some(inner) = this.upgrade() {
                inner.on_cell_factory_changed();
            }
        });

        *self.connections.lock() = Some(ControlConnections {
            _items: items,
            _tile_size: tile_size,
            _tile_gap: tile_gap,
            _cell_factory: cell_factory,
        });
    }

    /// Install the page factory and build the first page.
    fn create_layout(&self) {
        {
            let mut state = self.state.lock();
            if state.layout_created {
                return;
            }
            state.layout_created = true;
        }

        let this = self.this.clone();
        self.pagination.set_page_factory(Arc::new(move |page_index| {
            if let Some(inner) = this.upgrade() {
                inner.build_page(page_index);
            }
        }));
        self.pagination.request_page();
    }

    fn layout(&self, size: Size) {
        let page = {
            let mut state = self.state.lock();
            state.viewport = size;
            state.current_page.clone()
        };
        if let Some(page) = page {
            page.resize(size);
        }
    }

    /// Page factory: build a fresh container for `page_index`.
    fn build_page(&self, page_index: usize) {
        let _span = PerfSpan::new(span_names::PAGE_BUILD);

        let (viewport, tiles_per_page) = {
            let state = self.state.lock();
            (state.viewport, state.tiles_per_page)
        };

        let gap = self.control.tile_gap();
        let mut page = TilePage::new(page_index, gap);
        if !viewport.is_empty() {
            let fit = TileLayout::compute(viewport, self.control.tile_size(), gap);
            page.set_bounds(fit.page_size);
        }
        let container = Arc::new(PageContainer::new(page, viewport));

        let this = self.this.clone();
        let weak_container = Arc::downgrade(&container);
        container.size_changed().connect(move |size| {
            if size.is_empty() {
                return;
            }
            if let (Some(inner), Some(container)) = (this.upgrade(), weak_container.upgrade()) {
                if inner.is_current_page(&container) {
                    inner.on_resize(&container);
                }
            }
        });

        self.state.lock().current_page = Some(container.clone());

        if tiles_per_page != 0 {
            self.fill_page(&container, page_index, tiles_per_page);
        } else if !viewport.is_empty() {
            // Laid out before the first page existed; the container was born
            // at its final size and will not report a resize.
            self.on_resize(&container);
        }

        tracing::debug!(
            target: targets::LAYOUT,
            page_index,
            tiles = container.tile_count(),
            "built page"
        );
    }

    /// Replaced containers keep their slot but no longer drive the layout.
    fn is_current_page(&self, container: &Arc<PageContainer<T>>) -> bool {
        self.state
            .lock()
            .current_page
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, container))
    }

    fn fill_page(&self, container: &PageContainer<T>, page_index: usize, tiles_per_page: usize) {
        let range = layout::page_item_range(page_index, tiles_per_page, self.control.item_count());
        let items = self.control.items().slice(range.clone());
        let range = range.start..range.start + items.len();

        let cells: Vec<Box<dyn TileCell<T>>> = match self.control.cell_factory() {
            Some(factory) => items
                .iter()
                .map(|item| {
                    let mut cell = factory(self.control.as_ref());
                    cell.update_cell(item);
                    cell
                })
                .collect(),
            None => {
                tracing::trace!(target: targets::LAYOUT, page_index, "no cell factory, leaving page empty");
                container.with_page_mut(|page| page.fill(page_index, range.start..range.start, Vec::new()));
                return;
            }
        };

        container.with_page_mut(|page| page.fill(page_index, range, cells));
    }

    fn refill(&self, container: &PageContainer<T>, page_index: usize, tiles_per_page: usize) {
        container.with_page_mut(|page| page.clear());
        self.fill_page(container, page_index, tiles_per_page);
    }

    fn refresh_current_page(&self) {
        let (page, tiles_per_page) = {
            let state = self.state.lock();
            (state.current_page.clone(), state.tiles_per_page)
        };
        if let Some(page) = page {
            if tiles_per_page != 0 {
                self.refill(&page, self.pagination.current_page_index(), tiles_per_page);
            }
        }
    }

    fn effective_page_count(&self, state: &LayoutState<T>) -> usize {
        state
            .pending_page_count
            .map(|(count, _)| count)
            .unwrap_or_else(|| self.pagination.page_count())
    }

    /// Defer `page_count` to the next tick, replacing any pending update.
    fn schedule_page_count(&self, state: &mut LayoutState<T>, page_count: usize) {
        if let Some((_, stale)) = state.pending_page_count.take() {
            self.tasks.cancel(stale);
        }
        let this = self.this.clone();
        let id = self.tasks.post(move || {
            if let Some(inner) = this.upgrade() {
                inner.apply_page_count(page_count);
            }
        });
        state.pending_page_count = Some((page_count, id));
        tracing::debug!(target: targets::LAYOUT, page_count, "deferred page count update");
    }

    fn apply_page_count(&self, page_count: usize) {
        self.state.lock().pending_page_count = None;
        if !self.pagination.set_page_count(page_count) {
            // The host already had this count; the new tiles-per-page still
            // has to reach the page on screen.
            self.refresh_current_page();
        }
    }

    fn on_resize(&self, container: &PageContainer<T>) {
        let size = container.size();
        if size.is_empty() {
            return;
        }
        let _span = PerfSpan::new(span_names::RESIZE);

        let tile = self.control.tile_size();
        let gap = self.control.tile_gap();
        let fit = TileLayout::compute(size, tile, gap);
        let page_count = fit.page_count(self.control.item_count());

        container.with_page_mut(|page| {
            page.set_bounds(fit.page_size);
            page.set_gap(gap);
        });

        tracing::debug!(
            target: targets::LAYOUT,
            width = size.width,
            height = size.height,
            columns = fit.columns,
            rows = fit.rows,
            tiles_per_page = fit.tiles_per_page,
            page_count,
            "resize"
        );

        let mut state = self.state.lock();
        if self.effective_page_count(&state) != page_count {
            state.tiles_per_page = fit.tiles_per_page;
            self.schedule_page_count(&mut state, page_count);
        } else if state.tiles_per_page != fit.tiles_per_page {
            state.tiles_per_page = fit.tiles_per_page;
            let page = state.current_page.clone();
            drop(state);
            if let Some(page) = page {
                self.refill(&page, self.pagination.current_page_index(), fit.tiles_per_page);
            }
        }
    }

    fn on_items_changed(&self) {
        let mut state = self.state.lock();
        if !state.layout_created || state.tiles_per_page == 0 {
            return;
        }

        let page_count = layout::page_count(self.control.item_count(), state.tiles_per_page);
        if self.effective_page_count(&state) != page_count {
            self.schedule_page_count(&mut state, page_count);
        } else {
            let page = state.current_page.clone();
            let tiles_per_page = state.tiles_per_page;
            drop(state);
            if let Some(page) = page {
                self.refill(&page, self.pagination.current_page_index(), tiles_per_page);
            }
        }
    }

    fn on_cell_factory_changed(&self) {
        let created = self.state.lock().layout_created;
        if !created {
            if self.control.cell_factory().is_some() {
                self.create_layout();
            }
        } else {
            self.refresh_current_page();
        }
    }

    /// Replay the resize policy at the current container size.
    fn relayout(&self) {
        let page = self.state.lock().current_page.clone();
        if let Some(page) = page {
            self.on_resize(&page);
        }
    }

    fn dispose(&self) {
        self.connections.lock().take();
        self.pagination.clear_page_factory();

        let (pending, page) = {
            let mut state = self.state.lock();
            state.layout_created = false;
            (state.pending_page_count.take(), state.current_page.take())
        };
        if let Some((_, id)) = pending {
            self.tasks.cancel(id);
        }
        if let Some(page) = page {
            page.size_changed().disconnect_all();
        }
        tracing::debug!(target: targets::LAYOUT, "skin disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::cell_factory;

    struct Blank;

    impl TileCell<u32> for Blank {
        fn update_cell(&mut self, _item: &u32) {}
    }

    fn skin_with_factory(items: u32) -> (Arc<PaginatedTiles<u32>>, Arc<TaskQueue>, PaginatedTilesSkin<u32>) {
        let tiles = PaginatedTiles::new((0..items).collect(), 100.0, 100.0);
        tiles.set_cell_factory(cell_factory(|_: &PaginatedTiles<u32>| Blank));
        let tasks = Arc::new(TaskQueue::new());
        let skin = PaginatedTilesSkin::new(tiles.clone(), tasks.clone());
        (tiles, tasks, skin)
    }

    #[test]
    fn test_initial_page_is_empty_until_sized() {
        let (_tiles, tasks, skin) = skin_with_factory(5);
        assert!(skin.is_layout_created());
        assert_eq!(skin.tiles_per_page(), 0);
        assert_eq!(skin.viewport(), Size::ZERO);

        let page = skin.current_page().unwrap();
        assert_eq!(page.tile_count(), 0);
        assert_eq!(page.page_index(), 0);
        assert!(!tasks.has_pending());
    }

    #[test]
    fn test_item_changes_before_sizing_are_ignored() {
        let (tiles, tasks, skin) = skin_with_factory(5);
        tiles.items().extend(5..50);
        assert_eq!(skin.pending_page_count(), None);
        assert!(!tasks.has_pending());
    }

    #[test]
    fn test_layout_records_viewport() {
        let (_tiles, tasks, skin) = skin_with_factory(5);
        skin.layout(Size::new(250.0, 350.0));
        assert_eq!(skin.viewport(), Size::new(250.0, 350.0));

        // Five items fit one page: tiles are placed without a deferred update.
        assert_eq!(skin.tiles_per_page(), 6);
        assert!(!tasks.has_pending());
        assert_eq!(skin.current_page().unwrap().tile_count(), 5);
    }

    #[test]
    fn test_skin_debug_output() {
        let (_tiles, _tasks, skin) = skin_with_factory(1);
        let debug = format!("{skin:?}");
        assert!(debug.contains("PaginatedTilesSkin"));
        assert!(debug.contains("tiles_per_page: 0"));
    }
}

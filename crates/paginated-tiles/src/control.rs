//! The paginated tile grid control.
//!
//! [`PaginatedTiles`] holds the configuration of the widget: the item list,
//! tile size and spacing, the cell factory and the layout direction. Each
//! piece of state announces its changes through a signal; the
//! [skin](crate::skin::PaginatedTilesSkin) listens and keeps the pages in
//! sync.
//!
//! # Creating a tile grid
//!
//! 1. Implement [`TileCell`](crate::TileCell) for your cell type.
//! 2. Create the control with your items and the tile width and height.
//! 3. Install a cell factory.
//! 4. Create the skin and hand it the UI task queue.
//!
//! ```
//! use paginated_tiles::{cell_factory, PaginatedTiles, Size, TileCell};
//! use paginated_tiles_core::TaskQueue;
//! use std::sync::Arc;
//!
//! struct Label(String);
//!
//! impl TileCell<u32> for Label {
//!     fn update_cell(&mut self, item: &u32) {
//!         self.0 = format!("#{item}");
//!     }
//! }
//!
//! let tiles = PaginatedTiles::new((0..13).collect(), 100.0, 100.0);
//! tiles.set_cell_factory(cell_factory(|_: &PaginatedTiles<u32>| Label(String::new())));
//!
//! let tasks = Arc::new(TaskQueue::new());
//! let skin = tiles.create_default_skin(tasks.clone());
//! skin.layout(Size::new(250.0, 350.0));
//! tasks.process_pending();
//!
//! assert_eq!(skin.tiles_per_page(), 6);
//! assert_eq!(skin.pagination().page_count(), 3);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use paginated_tiles_core::{ConnectionGuard, ListChange, ObservableList, Property, Signal, TaskQueue};

use crate::behavior::LayoutDirection;
use crate::cell::CellFactory;
use crate::error::{Error, Result};
use crate::geometry::{Size, TileGap};
use crate::skin::PaginatedTilesSkin;
use crate::style::{StyleClasses, DEFAULT_STYLE_CLASS};

/// A tile grid spread over pages.
///
/// # Signals
///
/// - `items_changed(ListChange)`: the current list was mutated or replaced
/// - `tile_size_changed(Size)`
/// - `tile_gap_changed(TileGap)`
/// - `cell_factory_changed(())`
/// - `layout_direction_changed(LayoutDirection)`
///
/// # Styling
///
/// Style class: `paginated-tiles`. See [`crate::style`] for substructure.
pub struct PaginatedTiles<T> {
    this: Weak<Self>,
    items: RwLock<Arc<ObservableList<T>>>,
    items_forward: Mutex<Option<ConnectionGuard<ListChange>>>,
    items_changed: Signal<ListChange>,
    tile_size: Property<Size>,
    tile_gap: Property<TileGap>,
    cell_factory: RwLock<Option<CellFactory<T>>>,
    cell_factory_changed: Signal<()>,
    layout_direction: Property<LayoutDirection>,
    style_classes: StyleClasses,
}

impl<T: Clone + Send + Sync + 'static> PaginatedTiles<T> {
    /// Create a control over a private copy of `items`.
    pub fn new(items: Vec<T>, tile_width: f32, tile_height: f32) -> Arc<Self> {
        Self::with_shared_items(Arc::new(ObservableList::from_vec(items)), tile_width, tile_height)
    }

    /// Create a control bound to a shared list.
    ///
    /// Mutations through `items` show up in the control and vice versa.
    pub fn with_shared_items(items: Arc<ObservableList<T>>, tile_width: f32, tile_height: f32) -> Arc<Self> {
        let control = Arc::new_cyclic(|this| Self {
            this: this.clone(),
            items: RwLock::new(items.clone()),
            items_forward: Mutex::new(None),
            items_changed: Signal::new(),
            tile_size: Property::new(Size::new(tile_width, tile_height)),
            tile_gap: Property::new(TileGap::NONE),
            cell_factory: RwLock::new(None),
            cell_factory_changed: Signal::new(),
            layout_direction: Property::new(LayoutDirection::default()),
            style_classes: StyleClasses::with_class(DEFAULT_STYLE_CLASS),
        });
        control.forward_list_changes(&items);
        control
    }

    /// Like [`new`](Self::new), rejecting invalid tile sizes.
    pub fn try_new(items: Vec<T>, tile_width: f32, tile_height: f32) -> Result<Arc<Self>> {
        validate_tile_size(tile_width, tile_height)?;
        Ok(Self::new(items, tile_width, tile_height))
    }

    /// Like [`with_shared_items`](Self::with_shared_items), rejecting invalid tile sizes.
    pub fn try_with_shared_items(
        items: Arc<ObservableList<T>>,
        tile_width: f32,
        tile_height: f32,
    ) -> Result<Arc<Self>> {
        validate_tile_size(tile_width, tile_height)?;
        Ok(Self::with_shared_items(items, tile_width, tile_height))
    }

    fn forward_list_changes(&self, list: &ObservableList<T>) {
        let this = self.this.clone();
        let guard = list.changed().connect_scoped(move |change| {
            if let Some(control) = this.upgrade() {
                control.items_changed.emit(change.clone());
            }
        });
        *self.items_forward.lock() = Some(guard);
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// The current item list.
    pub fn items(&self) -> Arc<ObservableList<T>> {
        self.items.read().clone()
    }

    /// Number of items in the current list.
    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }

    /// Replace the item list.
    ///
    /// The control follows mutations of the new list from now on and stops
    /// following the old one. Emits `items_changed` with a reset.
    pub fn set_items(&self, items: Arc<ObservableList<T>>) {
        if Arc::ptr_eq(&self.items.read(), &items) {
            return;
        }
        *self.items.write() = items.clone();
        self.forward_list_changes(&items);
        self.items_changed.emit(ListChange::Reset { len: items.len() });
    }

    /// Emitted when the current list is mutated or replaced.
    pub fn items_changed(&self) -> &Signal<ListChange> {
        &self.items_changed
    }

    // =========================================================================
    // Tile size and spacing
    // =========================================================================

    /// Tile size.
    pub fn tile_size(&self) -> Size {
        self.tile_size.get()
    }

    /// Tile width.
    pub fn tile_width(&self) -> f32 {
        self.tile_size.with(|size| size.width)
    }

    /// Tile height.
    pub fn tile_height(&self) -> f32 {
        self.tile_size.with(|size| size.height)
    }

    /// Set the tile size. Returns `true` if it changed.
    pub fn set_tile_size(&self, size: Size) -> bool {
        self.tile_size.set(size)
    }

    /// Set the tile width. Returns `true` if it changed.
    pub fn set_tile_width(&self, width: f32) -> bool {
        self.set_tile_size(Size::new(width, self.tile_height()))
    }

    /// Set the tile height. Returns `true` if it changed.
    pub fn set_tile_height(&self, height: f32) -> bool {
        self.set_tile_size(Size::new(self.tile_width(), height))
    }

    /// Emitted with the new tile size.
    pub fn tile_size_changed(&self) -> &Signal<Size> {
        self.tile_size.changed()
    }

    /// Spacing between tiles.
    pub fn tile_gap(&self) -> TileGap {
        self.tile_gap.get()
    }

    /// Horizontal spacing between tiles.
    pub fn tile_hgap(&self) -> f32 {
        self.tile_gap.with(|gap| gap.horizontal)
    }

    /// Vertical spacing between tiles.
    pub fn tile_vgap(&self) -> f32 {
        self.tile_gap.with(|gap| gap.vertical)
    }

    /// Set the spacing between tiles. Returns `true` if it changed.
    pub fn set_tile_gap(&self, gap: TileGap) -> bool {
        self.tile_gap.set(gap)
    }

    /// Set the horizontal spacing. Returns `true` if it changed.
    pub fn set_tile_hgap(&self, hgap: f32) -> bool {
        self.set_tile_gap(TileGap::new(hgap, self.tile_vgap()))
    }

    /// Set the vertical spacing. Returns `true` if it changed.
    pub fn set_tile_vgap(&self, vgap: f32) -> bool {
        self.set_tile_gap(TileGap::new(self.tile_hgap(), vgap))
    }

    /// Emitted with the new spacing.
    pub fn tile_gap_changed(&self) -> &Signal<TileGap> {
        self.tile_gap.changed()
    }

    // =========================================================================
    // Cell factory
    // =========================================================================

    /// The installed cell factory.
    pub fn cell_factory(&self) -> Option<CellFactory<T>> {
        self.cell_factory.read().clone()
    }

    /// Install the cell factory.
    pub fn set_cell_factory(&self, factory: CellFactory<T>) {
        *self.cell_factory.write() = Some(factory);
        self.cell_factory_changed.emit(());
    }

    /// Remove the cell factory. Pages built afterwards stay empty.
    pub fn clear_cell_factory(&self) {
        let had_factory = self.cell_factory.write().take().is_some();
        if had_factory {
            self.cell_factory_changed.emit(());
        }
    }

    /// Emitted whenever the factory is installed or removed.
    pub fn cell_factory_changed(&self) -> &Signal<()> {
        &self.cell_factory_changed
    }

    // =========================================================================
    // Orientation and styling
    // =========================================================================

    /// The effective layout direction.
    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction.get()
    }

    /// Set the layout direction. Returns `true` if it changed.
    pub fn set_layout_direction(&self, direction: LayoutDirection) -> bool {
        self.layout_direction.set(direction)
    }

    /// Emitted with the new direction.
    pub fn layout_direction_changed(&self) -> &Signal<LayoutDirection> {
        self.layout_direction.changed()
    }

    /// Style classes of the control.
    pub fn style_classes(&self) -> &StyleClasses {
        &self.style_classes
    }

    /// Add a style class. Returns `false` if it was already present.
    pub fn add_style_class(&self, class: impl Into<String>) -> bool {
        self.style_classes.add(class)
    }

    /// Remove a style class. Returns `true` if it was present.
    pub fn remove_style_class(&self, class: &str) -> bool {
        self.style_classes.remove(class)
    }

    /// Check for a style class.
    pub fn has_style_class(&self, class: &str) -> bool {
        self.style_classes.contains(class)
    }

    // =========================================================================
    // Skin
    // =========================================================================

    /// Create the default skin, posting deferred work to `tasks`.
    pub fn create_default_skin(self: &Arc<Self>, tasks: Arc<TaskQueue>) -> PaginatedTilesSkin<T> {
        PaginatedTilesSkin::new(self.clone(), tasks)
    }
}

pub(crate) fn validate_tile_size(width: f32, height: f32) -> Result<()> {
    if Size::new(width, height).is_valid_tile() {
        Ok(())
    } else {
        Err(Error::invalid_tile_size(width, height))
    }
}

impl<T: Clone + Send + Sync + 'static> std::fmt::Debug for PaginatedTiles<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedTiles")
            .field("item_count", &self.items.read().len())
            .field("has_cell_factory", &self.cell_factory.read().is_some())
            .finish_non_exhaustive()
    }
}

// Skins hold the control in an `Arc` captured by signal slots
static_assertions::assert_impl_all!(PaginatedTiles<u32>: Send, Sync);

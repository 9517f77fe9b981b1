//! Pages and page containers.
//!
//! A [`TilePage`] is the grid of tile cells for one page index. It lives in
//! a [`PageContainer`], which the host lays out at the available size; the
//! page itself is sized to exactly fit its tiles so the container can center
//! it. A new container is created for every page build.

use std::ops::Range;

use parking_lot::Mutex;
use paginated_tiles_core::{Property, Signal};

use crate::cell::TileCell;
use crate::geometry::{Size, TileGap};
use crate::style::{substructure, StyleClasses};

/// The tiles of one page.
pub struct TilePage<T> {
    page_index: usize,
    cells: Vec<Box<dyn TileCell<T>>>,
    item_range: Range<usize>,
    bounds: Size,
    gap: TileGap,
    style_classes: StyleClasses,
}

impl<T> TilePage<T> {
    pub(crate) fn new(page_index: usize, gap: TileGap) -> Self {
        Self {
            page_index,
            cells: Vec::new(),
            item_range: 0..0,
            bounds: Size::ZERO,
            gap,
            style_classes: StyleClasses::with_class(substructure::TILE_PANE),
        }
    }

    /// The page index this page shows.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of tiles on the page.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the page has no tiles.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Item indices bound to the tiles, in tile order.
    pub fn item_range(&self) -> Range<usize> {
        self.item_range.clone()
    }

    /// Min and max size of the page: the exact extent of its tile grid.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Spacing between tiles.
    pub fn gap(&self) -> TileGap {
        self.gap
    }

    /// Style classes of the page.
    pub fn style_classes(&self) -> &StyleClasses {
        &self.style_classes
    }

    /// The cell at `index`, downcast to `C`.
    ///
    /// Returns `None` if the index is out of range, the cell does not expose
    /// itself through [`TileCell::as_any`], or it is not a `C`.
    pub fn cell_as<C: 'static>(&self, index: usize) -> Option<&C> {
        self.cells.get(index)?.as_any()?.downcast_ref::<C>()
    }

    /// Iterate over the cells in tile order.
    pub fn cells(&self) -> impl Iterator<Item = &dyn TileCell<T>> {
        self.cells.iter().map(|cell| cell.as_ref())
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.item_range = 0..0;
    }

    pub(crate) fn fill(&mut self, page_index: usize, item_range: Range<usize>, cells: Vec<Box<dyn TileCell<T>>>) {
        debug_assert_eq!(item_range.len(), cells.len());
        self.page_index = page_index;
        self.item_range = item_range;
        self.cells = cells;
    }

    pub(crate) fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub(crate) fn set_gap(&mut self, gap: TileGap) {
        self.gap = gap;
    }
}

impl<T> std::fmt::Debug for TilePage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilePage")
            .field("page_index", &self.page_index)
            .field("tiles", &self.cells.len())
            .field("item_range", &self.item_range)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// The container a page is laid out in.
///
/// The container's size is the space available for tiles. Resizing it emits
/// [`size_changed`](Self::size_changed), which is how the skin learns about
/// layout changes.
pub struct PageContainer<T> {
    size: Property<Size>,
    page: Mutex<TilePage<T>>,
    style_classes: StyleClasses,
}

impl<T: Send + 'static> PageContainer<T> {
    pub(crate) fn new(page: TilePage<T>, size: Size) -> Self {
        Self {
            size: Property::new(size),
            page: Mutex::new(page),
            style_classes: StyleClasses::with_class(substructure::PAGE),
        }
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Resize the container. Returns `true` and emits `size_changed` if the
    /// size actually changed.
    pub fn resize(&self, size: Size) -> bool {
        self.size.set(size)
    }

    /// Emitted with the new size after each effective resize.
    pub fn size_changed(&self) -> &Signal<Size> {
        self.size.changed()
    }

    /// Style classes of the container.
    pub fn style_classes(&self) -> &StyleClasses {
        &self.style_classes
    }

    /// Inspect the page.
    ///
    /// Do not resize the container from inside `f`.
    pub fn with_page<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TilePage<T>) -> R,
    {
        f(&self.page.lock())
    }

    pub(crate) fn with_page_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TilePage<T>) -> R,
    {
        f(&mut self.page.lock())
    }

    /// Number of tiles on the page.
    pub fn tile_count(&self) -> usize {
        self.page.lock().len()
    }

    /// The page index shown.
    pub fn page_index(&self) -> usize {
        self.page.lock().page_index()
    }
}

impl<T> std::fmt::Debug for PageContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContainer")
            .field("page", &*self.page.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::Arc;

    struct Marked(u32);

    impl TileCell<u32> for Marked {
        fn update_cell(&mut self, item: &u32) {
            self.0 = *item;
        }

        fn as_any(&self) -> Option<&dyn Any> {
            Some(self)
        }
    }

    struct Opaque;

    impl TileCell<u32> for Opaque {
        fn update_cell(&mut self, _item: &u32) {}
    }

    #[test]
    fn test_fill_and_downcast() {
        let mut page = TilePage::new(0, TileGap::NONE);
        page.fill(2, 4..6, vec![Box::new(Marked(4)), Box::new(Opaque)]);

        assert_eq!(page.page_index(), 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.item_range(), 4..6);
        assert_eq!(page.cell_as::<Marked>(0).map(|p| p.0), Some(4));
        assert!(page.cell_as::<Marked>(1).is_none());
        assert!(page.cell_as::<Marked>(5).is_none());
        assert!(page.style_classes().contains("tile-pane"));

        page.clear();
        assert!(page.is_empty());
        assert!(page.item_range().is_empty());
    }

    #[test]
    fn test_container_resize_signal() {
        let container = PageContainer::new(TilePage::<u32>::new(0, TileGap::NONE), Size::ZERO);
        let sizes = Arc::new(Mutex::new(Vec::new()));

        let sizes_clone = sizes.clone();
        container.size_changed().connect(move |&size| sizes_clone.lock().push(size));

        assert!(container.resize(Size::new(300.0, 200.0)));
        assert!(!container.resize(Size::new(300.0, 200.0)));

        assert_eq!(*sizes.lock(), vec![Size::new(300.0, 200.0)]);
        assert!(container.style_classes().contains("page"));
    }
}

//! Tile cells and the factory that creates them.
//!
//! A tile cell is the visual for one data item. Applications implement
//! [`TileCell`] for their own cell type and install a [`CellFactory`] on the
//! control. The skin asks the factory for a fresh cell for every visible
//! tile, every time a page is (re)built; cells are never reused.
//!
//! # Example
//!
//! ```
//! use paginated_tiles::{cell_factory, PaginatedTiles, TileCell};
//!
//! struct Thumbnail {
//!     caption: String,
//! }
//!
//! impl TileCell<String> for Thumbnail {
//!     fn update_cell(&mut self, item: &String) {
//!         self.caption = item.to_uppercase();
//!     }
//! }
//!
//! let tiles = PaginatedTiles::new(vec!["a".to_string()], 120.0, 90.0);
//! tiles.set_cell_factory(cell_factory(|_tiles: &PaginatedTiles<String>| Thumbnail {
//!     caption: String::new(),
//! }));
//! assert!(tiles.cell_factory().is_some());
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::control::PaginatedTiles;

/// The visual representation of one data item.
pub trait TileCell<T>: Send {
    /// Bind `item` to this cell.
    fn update_cell(&mut self, item: &T);

    /// Access the concrete cell for inspection.
    ///
    /// The default returns `None`; override it to allow downcasting through
    /// [`TilePage::cell_as`](crate::page::TilePage::cell_as).
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Creates a new cell bound to the given control.
pub type CellFactory<T> = Arc<dyn Fn(&PaginatedTiles<T>) -> Box<dyn TileCell<T>> + Send + Sync>;

/// Wrap a closure returning a concrete cell type into a [`CellFactory`].
pub fn cell_factory<T, C, F>(make: F) -> CellFactory<T>
where
    F: Fn(&PaginatedTiles<T>) -> C + Send + Sync + 'static,
    C: TileCell<T> + 'static,
{
    Arc::new(move |control| Box::new(make(control)) as Box<dyn TileCell<T>>)
}

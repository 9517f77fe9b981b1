//! Paginated Tiles - a tile grid spread over pages.
//!
//! The widget shows a list of items as fixed-size tiles. As many tiles as fit
//! the available space make up one page; a pagination host steps through the
//! pages. Resizing, changing the tile size or mutating the item list
//! recomputes the grid and the page count.
//!
//! The widget is split the usual way:
//!
//! - [`PaginatedTiles`]: the control, holding items, tile geometry, the cell
//!   factory and the layout direction
//! - [`PaginatedTilesSkin`]: the layout engine that builds pages of cells and
//!   drives the [`Pagination`] host
//! - [`PaginatedTilesBehavior`]: keyboard navigation
//!
//! # Example
//!
//! ```
//! use paginated_tiles::prelude::*;
//! use std::sync::Arc;
//!
//! struct Swatch(u32);
//!
//! impl TileCell<u32> for Swatch {
//!     fn update_cell(&mut self, item: &u32) {
//!         self.0 = *item;
//!     }
//! }
//!
//! let tiles = PaginatedTiles::new((0..100).collect(), 50.0, 50.0);
//! tiles.set_cell_factory(cell_factory(|_: &PaginatedTiles<u32>| Swatch(0)));
//!
//! let tasks = Arc::new(TaskQueue::new());
//! let skin = tiles.create_default_skin(tasks.clone());
//! skin.layout(Size::new(260.0, 110.0));
//! tasks.process_pending();
//!
//! // 5 columns by 2 rows
//! assert_eq!(skin.tiles_per_page(), 10);
//! assert_eq!(skin.pagination().page_count(), 11);
//!
//! assert!(skin.handle_key_press(&KeyPressEvent::plain(Key::ArrowRight)));
//! assert_eq!(skin.pagination().current_page_index(), 1);
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing` under the targets in
//! [`paginated_tiles_core::logging::targets`]. Install a subscriber to see
//! layout decisions:
//!
//! ```text
//! RUST_LOG=paginated_tiles::layout=debug
//! ```

pub mod behavior;
pub mod cell;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod page;
pub mod pagination;
pub mod prelude;
pub mod skin;
pub mod style;

pub use behavior::{
    Action, Key, KeyBinding, KeyPressEvent, KeyboardModifiers, LayoutDirection, PaginatedTilesBehavior,
    PAGINATED_TILES_BINDINGS,
};
pub use cell::{cell_factory, CellFactory, TileCell};
pub use config::TileConfig;
pub use control::PaginatedTiles;
pub use error::{Error, Result};
pub use geometry::{Size, TileGap};
pub use layout::TileLayout;
pub use page::{PageContainer, TilePage};
pub use pagination::{PageFactory, Pagination};
pub use skin::PaginatedTilesSkin;
pub use style::StyleClasses;

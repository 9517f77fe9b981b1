//! Commonly used types.
//!
//! ```ignore
//! use paginated_tiles::prelude::*;
//! ```

// ============================================================================
// Control, skin and behavior
// ============================================================================

pub use crate::behavior::{Key, KeyPressEvent, KeyboardModifiers, LayoutDirection, PaginatedTilesBehavior};
pub use crate::control::PaginatedTiles;
pub use crate::pagination::Pagination;
pub use crate::skin::PaginatedTilesSkin;

// ============================================================================
// Cells and geometry
// ============================================================================

pub use crate::cell::{cell_factory, CellFactory, TileCell};
pub use crate::config::TileConfig;
pub use crate::geometry::{Size, TileGap};

// ============================================================================
// Observable primitives
// ============================================================================

pub use paginated_tiles_core::{ListChange, ObservableList, Signal, TaskQueue};

//! Error types for the tile grid.
//!
//! Layout itself never fails; these errors are only returned by the
//! validating entry points (`try_*` constructors and setters).

/// Result type alias for tile grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by validating operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Tile dimensions must be finite and strictly positive.
    #[error("Invalid tile size {width}x{height}: both dimensions must be finite and positive")]
    InvalidTileSize { width: f32, height: f32 },

    /// Page index outside `[0, page_count - 1]`.
    #[error("Page index {index} is out of range for {page_count} page(s)")]
    PageIndexOutOfRange { index: usize, page_count: usize },
}

impl Error {
    /// Create a tile size error.
    pub fn invalid_tile_size(width: f32, height: f32) -> Self {
        Self::InvalidTileSize { width, height }
    }

    /// Create a page index error.
    pub fn page_index_out_of_range(index: usize, page_count: usize) -> Self {
        Self::PageIndexOutOfRange { index, page_count }
    }
}

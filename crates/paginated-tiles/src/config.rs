//! Tile geometry as a single value.
//!
//! [`TileConfig`] bundles the tile size and spacing so they can be stored,
//! validated and applied to a control in one step. With the `serde` feature
//! it can be loaded from any serde format:
//!
//! ```ignore
//! let config: TileConfig = serde_json::from_str(r#"{
//!     "tile_size": { "width": 120.0, "height": 90.0 },
//!     "gap": { "horizontal": 8.0, "vertical": 8.0 }
//! }"#)?;
//! config.validate()?;
//! config.apply_to(&tiles);
//! ```

use crate::control::{validate_tile_size, PaginatedTiles};
use crate::error::Result;
use crate::geometry::{Size, TileGap};

/// Tile size and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileConfig {
    pub tile_size: Size,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gap: TileGap,
}

impl TileConfig {
    /// Tiles of `width × height` with no spacing.
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            tile_size: Size::new(width, height),
            gap: TileGap::NONE,
        }
    }

    /// Set the spacing between columns and rows.
    pub const fn with_gaps(mut self, horizontal: f32, vertical: f32) -> Self {
        self.gap = TileGap::new(horizontal, vertical);
        self
    }

    /// Check that the tile size is finite and positive.
    ///
    /// Gaps are not checked; negative gaps only shrink the page.
    pub fn validate(&self) -> Result<()> {
        validate_tile_size(self.tile_size.width, self.tile_size.height)
    }

    /// Apply tile size and spacing to `control`.
    ///
    /// Returns `true` if anything changed. Size and spacing are set one after
    /// the other, so a skin may lay out twice.
    pub fn apply_to<T>(&self, control: &PaginatedTiles<T>) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let size_changed = control.set_tile_size(self.tile_size);
        let gap_changed = control.set_tile_gap(self.gap);
        size_changed || gap_changed
    }

    /// Read the current tile size and spacing of `control`.
    pub fn from_control<T>(control: &PaginatedTiles<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            tile_size: control.tile_size(),
            gap: control.tile_gap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_validate() {
        assert!(TileConfig::new(100.0, 80.0).validate().is_ok());
        assert_eq!(
            TileConfig::new(0.0, 80.0).validate(),
            Err(Error::invalid_tile_size(0.0, 80.0))
        );
        assert!(TileConfig::new(f32::INFINITY, 80.0).validate().is_err());
    }

    #[test]
    fn test_apply_to_control() {
        let tiles = PaginatedTiles::new(vec![1u32], 10.0, 10.0);
        let config = TileConfig::new(64.0, 48.0).with_gaps(4.0, 2.0);

        assert!(config.apply_to(&tiles));
        assert!(!config.apply_to(&tiles));
        assert_eq!(tiles.tile_size(), Size::new(64.0, 48.0));
        assert_eq!(tiles.tile_hgap(), 4.0);
        assert_eq!(tiles.tile_vgap(), 2.0);
        assert_eq!(TileConfig::from_control(&tiles), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_without_gap() {
        let config: TileConfig =
            serde_json::from_str(r#"{ "tile_size": { "width": 120.0, "height": 90.0 } }"#).unwrap();
        assert_eq!(config, TileConfig::new(120.0, 90.0));
    }
}

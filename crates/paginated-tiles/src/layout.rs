//! Tile-fit arithmetic.
//!
//! Everything here is a pure function of container size, tile size, gaps and
//! item count. The reactive side (when to recompute, what to rebuild) lives in
//! [`crate::skin`].
//!
//! # Fitting tiles
//!
//! Along each axis the first tile always counts, then as many further
//! `tile + gap` steps as the remaining space allows, keeping a 2px margin:
//!
//! ```text
//! columns = 1 + floor((width  - tile_width  - 2) / (tile_width  + hgap))
//! rows    = 1 + floor((height - tile_height - 2) / (tile_height + vgap))
//! tiles_per_page = max(1, columns * rows)
//! ```
//!
//! # Page count
//!
//! `page_count = item_count / tiles_per_page + 1`. When `item_count` is an
//! exact multiple of `tiles_per_page` this yields one trailing empty page.
//! Existing callers rely on that count, so it is kept as is.

use std::ops::Range;

use paginated_tiles_core::logging::targets;

use crate::geometry::{Size, TileGap};

/// Reserved space along each axis, in logical pixels.
const FIT_MARGIN: f32 = 2.0;

/// Result of fitting tiles into a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    /// Tiles per row. May be 0 when the container is narrower than a tile.
    pub columns: usize,
    /// Tiles per column. May be 0 when the container is shorter than a tile.
    pub rows: usize,
    /// Capacity of one page. Always at least 1.
    pub tiles_per_page: usize,
    /// Exact extent of `columns x rows` tiles plus interior gaps.
    pub page_size: Size,
}

impl TileLayout {
    /// Fit tiles of size `tile` separated by `gap` into `container`.
    ///
    /// Invalid tile sizes (non-positive or non-finite) degrade to a single
    /// tile per page.
    pub fn compute(container: Size, tile: Size, gap: TileGap) -> Self {
        if !tile.is_valid_tile() {
            tracing::warn!(
                target: targets::LAYOUT,
                tile_width = tile.width,
                tile_height = tile.height,
                "invalid tile size, falling back to one tile per page"
            );
            return Self::degraded();
        }

        let columns = fit_axis(container.width, tile.width, gap.horizontal);
        let rows = fit_axis(container.height, tile.height, gap.vertical);
        let tiles_per_page = columns.saturating_mul(rows).max(1);

        Self {
            columns,
            rows,
            tiles_per_page,
            page_size: Size::new(
                axis_extent(columns, tile.width, gap.horizontal),
                axis_extent(rows, tile.height, gap.vertical),
            ),
        }
    }

    fn degraded() -> Self {
        Self {
            columns: 1,
            rows: 1,
            tiles_per_page: 1,
            page_size: Size::ZERO,
        }
    }

    /// Page count for `item_count` items with this layout.
    pub fn page_count(&self, item_count: usize) -> usize {
        page_count(item_count, self.tiles_per_page)
    }
}

fn fit_axis(extent: f32, tile: f32, gap: f32) -> usize {
    let step = tile + gap;
    if step.is_nan() || step <= 0.0 {
        return 1;
    }
    let count = (1.0 + (extent - tile - FIT_MARGIN) / step).floor();
    if count.is_nan() || count <= 0.0 {
        0
    } else {
        count as usize
    }
}

fn axis_extent(count: usize, tile: f32, gap: f32) -> f32 {
    if count == 0 {
        0.0
    } else {
        tile * count as f32 + gap * (count - 1) as f32
    }
}

/// Number of pages for `item_count` items at `tiles_per_page` per page.
///
/// A `tiles_per_page` of 0 is treated as 1.
pub fn page_count(item_count: usize, tiles_per_page: usize) -> usize {
    item_count / tiles_per_page.max(1) + 1
}

/// Indices of the items shown on page `page_index`.
///
/// Empty for pages past the end of the list.
pub fn page_item_range(page_index: usize, tiles_per_page: usize, item_count: usize) -> Range<usize> {
    let start = page_index.saturating_mul(tiles_per_page);
    let end = start.saturating_add(tiles_per_page).min(item_count);
    start.min(end)..end
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: Size = Size::new(100.0, 100.0);

    #[test]
    fn test_two_by_three_fit() {
        let layout = TileLayout::compute(Size::new(250.0, 350.0), TILE, TileGap::NONE);
        assert_eq!((layout.columns, layout.rows), (2, 3));
        assert_eq!(layout.tiles_per_page, 6);
        assert_eq!(layout.page_size, Size::new(200.0, 300.0));
    }

    #[test]
    fn test_margin_boundary() {
        // 1 + (301 - 102) / 100 = 2.99
        assert_eq!(TileLayout::compute(Size::new(301.0, 150.0), TILE, TileGap::NONE).columns, 2);
        // 1 + (302 - 102) / 100 = 3
        assert_eq!(TileLayout::compute(Size::new(302.0, 150.0), TILE, TileGap::NONE).columns, 3);
    }

    #[test]
    fn test_gaps_reduce_fit_and_pad_page() {
        let gap = TileGap::new(10.0, 20.0);
        let layout = TileLayout::compute(Size::new(340.0, 250.0), TILE, gap);
        // 1 + (340 - 102) / 110 = 3.16, 1 + (250 - 102) / 120 = 2.23
        assert_eq!((layout.columns, layout.rows), (3, 2));
        assert_eq!(layout.page_size, Size::new(320.0, 220.0));
    }

    #[test]
    fn test_too_small_container_keeps_one_tile() {
        let layout = TileLayout::compute(Size::new(40.0, 40.0), TILE, TileGap::NONE);
        assert_eq!((layout.columns, layout.rows), (0, 0));
        assert_eq!(layout.tiles_per_page, 1);
        assert_eq!(layout.page_size, Size::ZERO);
    }

    #[test]
    fn test_one_axis_too_small() {
        let layout = TileLayout::compute(Size::new(1000.0, 50.0), TILE, TileGap::NONE);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.tiles_per_page, 1);
    }

    #[test]
    fn test_invalid_tile_degrades() {
        for tile in [Size::ZERO, Size::new(-5.0, 10.0), Size::new(f32::NAN, 10.0)] {
            let layout = TileLayout::compute(Size::new(500.0, 500.0), tile, TileGap::NONE);
            assert_eq!(layout.tiles_per_page, 1);
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_invalid_tile_logs_warning() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let layout = tracing::subscriber::with_default(subscriber, || {
            TileLayout::compute(Size::new(500.0, 500.0), Size::new(0.0, 100.0), TileGap::NONE)
        });
        assert_eq!(layout.tiles_per_page, 1);
        assert_eq!(layout.page_size, Size::ZERO);

        let output = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
        assert!(output.contains("WARN"));
        assert!(output.contains(targets::LAYOUT));
        assert!(output.contains("invalid tile size"));
    }

    #[test]
    fn test_negative_gap_swallowing_tile() {
        let layout = TileLayout::compute(Size::new(500.0, 500.0), TILE, TileGap::uniform(-100.0));
        assert_eq!((layout.columns, layout.rows), (1, 1));
    }

    #[test]
    fn test_tiles_per_page_never_zero() {
        for width in [1.0, 50.0, 101.0, 102.0, 203.0, 999.0] {
            for height in [1.0, 99.0, 150.0, 777.0] {
                for tile in [Size::new(10.0, 10.0), Size::new(100.0, 30.0), Size::new(640.0, 480.0)] {
                    let layout = TileLayout::compute(Size::new(width, height), tile, TileGap::uniform(4.0));
                    assert!(layout.tiles_per_page >= 1);
                }
            }
        }
    }

    #[test]
    fn test_page_count_formula() {
        assert_eq!(page_count(0, 6), 1);
        assert_eq!(page_count(5, 6), 1);
        assert_eq!(page_count(6, 6), 2);
        assert_eq!(page_count(13, 6), 3);
        assert_eq!(page_count(100, 10), 11);
        assert_eq!(page_count(3, 0), 4);
    }

    #[test]
    fn test_trailing_page_is_empty() {
        assert_eq!(page_item_range(10, 10, 100), 100..100);
        assert!(page_item_range(10, 10, 100).is_empty());
    }

    #[test]
    fn test_page_item_range() {
        assert_eq!(page_item_range(0, 6, 13), 0..6);
        assert_eq!(page_item_range(1, 6, 13), 6..12);
        assert_eq!(page_item_range(2, 6, 13), 12..13);
        assert_eq!(page_item_range(7, 6, 13), 13..13);
    }

    #[test]
    fn test_page_item_range_sizes_match_clamp() {
        let item_count = 23;
        let tpp = 4;
        for page in 0..page_count(item_count, tpp) {
            let expected = item_count.saturating_sub(page * tpp).min(tpp);
            assert_eq!(page_item_range(page, tpp, item_count).len(), expected);
        }
    }
}

//! Geometry value types used by the tile layout.

/// A size in 2D space (width and height), in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_valid_tile(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && !self.is_empty()
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Spacing between neighbouring tiles on a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGap {
    /// Gap between columns.
    pub horizontal: f32,
    /// Gap between rows.
    pub vertical: f32,
}

impl TileGap {
    /// Create a gap.
    #[inline]
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The same gap on both axes.
    #[inline]
    pub const fn uniform(gap: f32) -> Self {
        Self::new(gap, gap)
    }

    /// No spacing.
    pub const NONE: Self = Self::uniform(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }

    #[test]
    fn test_size_is_valid_tile() {
        assert!(Size::new(80.0, 60.0).is_valid_tile());
        assert!(!Size::new(-1.0, 60.0).is_valid_tile());
        assert!(!Size::new(f32::NAN, 60.0).is_valid_tile());
        assert!(!Size::new(f32::INFINITY, 60.0).is_valid_tile());
    }

    #[test]
    fn test_size_from_tuples() {
        assert_eq!(Size::from((3.0, 4.0)), Size::new(3.0, 4.0));
        assert_eq!(Size::from((3u32, 4u32)), Size::new(3.0, 4.0));
    }
}

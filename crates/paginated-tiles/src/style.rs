//! Style class names.
//!
//! The tile grid does not interpret styles. It only tags its parts with the
//! class names below so an external stylesheet can target them:
//!
//! ```text
//! .paginated-tiles
//!   .page                      (page container)
//!     .tile-pane               (the grid of tiles)
//!   .pagination-control
//!     .left-arrow-button > .left-arrow
//!     .right-arrow-button > .right-arrow
//!     .bullet-button
//!     .number-button
//!     .page-information
//! ```

use parking_lot::RwLock;

/// Root style class of the control.
pub const DEFAULT_STYLE_CLASS: &str = "paginated-tiles";

/// Substructure class names.
pub mod substructure {
    /// The container a page is centered in.
    pub const PAGE: &str = "page";
    /// The tile grid of a page.
    pub const TILE_PANE: &str = "tile-pane";
    /// The navigation strip.
    pub const PAGINATION_CONTROL: &str = "pagination-control";
    /// The "previous page" button.
    pub const LEFT_ARROW_BUTTON: &str = "left-arrow-button";
    /// The arrow glyph inside the "previous page" button.
    pub const LEFT_ARROW: &str = "left-arrow";
    /// The "next page" button.
    pub const RIGHT_ARROW_BUTTON: &str = "right-arrow-button";
    /// The arrow glyph inside the "next page" button.
    pub const RIGHT_ARROW: &str = "right-arrow";
    /// A bullet-style page indicator.
    pub const BULLET_BUTTON: &str = "bullet-button";
    /// A numbered page indicator.
    pub const NUMBER_BUTTON: &str = "number-button";
    /// The "page x of n" label.
    pub const PAGE_INFORMATION: &str = "page-information";
}

/// An ordered, duplicate-free set of style class names.
#[derive(Debug, Default)]
pub struct StyleClasses {
    classes: RwLock<Vec<String>>,
}

impl StyleClasses {
    /// Start with a single class.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: RwLock::new(vec![class.into()]),
        }
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add(&self, class: impl Into<String>) -> bool {
        let class = class.into();
        let mut classes = self.classes.write();
        if classes.contains(&class) {
            false
        } else {
            classes.push(class);
            true
        }
    }

    /// Remove a class. Returns `true` if it was present.
    pub fn remove(&self, class: &str) -> bool {
        let mut classes = self.classes.write();
        match classes.iter().position(|c| c == class) {
            Some(pos) => {
                classes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check for a class.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.read().iter().any(|c| c == class)
    }

    /// Replace all classes.
    pub fn set_all<I, S>(&self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next: Vec<String> = Vec::new();
        for class in classes {
            let class = class.into();
            if !next.contains(&class) {
                next.push(class);
            }
        }
        *self.classes.write() = next;
    }

    /// Snapshot of the classes in insertion order.
    pub fn to_vec(&self) -> Vec<String> {
        self.classes.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_classes() {
        let classes = StyleClasses::with_class(DEFAULT_STYLE_CLASS);
        assert!(classes.contains("paginated-tiles"));
        assert!(classes.add("dark"));
        assert!(!classes.add("dark"));
        assert!(classes.remove("dark"));
        assert!(!classes.remove("dark"));
        assert_eq!(classes.to_vec(), vec!["paginated-tiles".to_string()]);
    }

    #[test]
    fn test_set_all_dedups() {
        let classes = StyleClasses::default();
        classes.set_all(["a", "b", "a"]);
        assert_eq!(classes.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }
}

//! Logging facilities for Paginated Tiles.
//!
//! All crates in the workspace log through the `tracing` crate using the
//! targets below. Nothing is printed unless the application installs a
//! subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("paginated_tiles::layout=debug")
//!     .init();
//! ```

/// Span names used for tracing.
pub mod span_names {
    /// A page (re)build.
    pub const PAGE_BUILD: &str = "paginated_tiles::page_build";
    /// A resize recomputation.
    pub const RESIZE: &str = "paginated_tiles::resize";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "paginated_tiles_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "paginated_tiles_core::task";
    /// Observable list target.
    pub const LIST: &str = "paginated_tiles_core::list";
    /// Tile layout and page build target.
    pub const LAYOUT: &str = "paginated_tiles::layout";
    /// Pagination host target.
    pub const PAGINATION: &str = "paginated_tiles::pagination";
    /// Key binding target.
    pub const BEHAVIOR: &str = "paginated_tiles::behavior";
    /// Performance spans.
    pub const PERF: &str = "paginated_tiles::perf";
}

/// A guard that keeps a performance span entered until dropped.
///
/// ```
/// use paginated_tiles_core::logging::{span_names, PerfSpan};
///
/// {
///     let _span = PerfSpan::new(span_names::PAGE_BUILD);
///     // timed work
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "paginated_tiles::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new(span_names::RESIZE);
            tracing::debug!(target: targets::LAYOUT, "inside span");
        });
    }

    #[test]
    fn test_targets_share_crate_prefixes() {
        for target in [targets::SIGNAL, targets::TASK, targets::LIST] {
            assert!(target.starts_with("paginated_tiles_core::"));
        }
        for target in [targets::LAYOUT, targets::PAGINATION, targets::BEHAVIOR, targets::PERF] {
            assert!(target.starts_with("paginated_tiles::"));
        }
    }
}

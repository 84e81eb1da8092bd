//! The derived, read-only snapshot of a table.

use crate::model::Row;

/// Visible rows plus pagination metadata, as computed by
/// [`TableEngine::view`](super::TableEngine::view).
///
/// Rows are borrowed from the engine's current row list; the view is
/// recomputed on every call and holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// Rows of the current page, in pipeline order.
    pub rows: Vec<&'a Row>,
    /// Rows left after search and filters.
    pub total_count: usize,
    /// `ceil(total_count / page_size)`; zero when nothing matches.
    pub total_pages: usize,
    /// 1-based page shown.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Rows handed to the engine before search and filters.
    pub unfiltered_count: usize,
}

/// 1-based positions of the first and last row shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
}

impl View<'_> {
    /// Returns `true` if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Positions shown on this page, `None` when the page is empty.
    pub fn range(&self) -> Option<PageRange> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some(PageRange {
            first,
            last: first + self.rows.len() - 1,
        })
    }

    /// One-line summary, e.g. `Page 2 of 3 (11-20 of 25)`.
    pub fn summary(&self) -> String {
        let shown = match self.range() {
            Some(range) => format!("{}-{} of {}", range.first, range.last, self.total_count),
            None => format!("0 of {}", self.total_count),
        };
        format!(
            "Page {} of {} ({})",
            self.current_page,
            self.total_pages.max(1),
            shown
        )
    }
}

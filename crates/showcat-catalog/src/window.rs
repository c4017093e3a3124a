//! Bounded pagination control model.

use std::ops::RangeInclusive;

/// Number of consecutive page links shown around the current page.
pub const WINDOW_SIZE: u32 = 5;

/// Link to the first or last page shown outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLink {
    /// Target page.
    pub page: u32,
    /// Whether an ellipsis separates the link from the window.
    pub ellipsis: bool,
}

/// Page links to render for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First page in the window.
    pub start: u32,
    /// Last page in the window (`end < start` when there are no pages).
    pub end: u32,
    /// Link to page 1 when the window starts after it.
    pub first: Option<EdgeLink>,
    /// Link to the last page when the window ends before it.
    pub last: Option<EdgeLink>,
    /// Whether a "previous" control applies.
    pub has_prev: bool,
    /// Whether a "next" control applies.
    pub has_next: bool,
}

impl PageWindow {
    /// Pages inside the window.
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of pages inside the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages().count()
    }

    /// Returns `true` if there are no pages at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Computes the window of `WINDOW_SIZE` page links around `current`.
///
/// The window is centered on the current page where possible and slides to
/// stay full near either end, so it always spans `min(WINDOW_SIZE, total)`
/// pages. A `current` outside `1..=total` is clamped before placing the
/// window.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn page_window(current: u32, total: u32) -> PageWindow {
    if total == 0 {
        return PageWindow {
            start: 1,
            end: 0,
            first: None,
            last: None,
            has_prev: false,
            has_next: false,
        };
    }

    let current = current.clamp(1, total);
    let span = WINDOW_SIZE.min(total);

    let mut start = current.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = start.saturating_add(WINDOW_SIZE - 1).min(total);
    if end - start + 1 < span {
        start = end + 1 - span;
    }

    let first = (start > 1).then_some(EdgeLink {
        page: 1,
        ellipsis: start > 2,
    });
    let last = (end < total).then_some(EdgeLink {
        page: total,
        ellipsis: end < total - 1,
    });

    PageWindow {
        start,
        end,
        first,
        last,
        has_prev: current > 1,
        has_next: current < total,
    }
}

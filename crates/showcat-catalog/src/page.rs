//! Fixed-size pagination over filtered results.

use std::ops::Range;

use showcat_api::tvmaze::Show;

use crate::query::{QueryState, filter_indices};

/// Shows per page.
pub const PAGE_SIZE: usize = 15;

/// Returns `ceil(count / PAGE_SIZE)`.
#[must_use]
pub fn total_pages(count: usize) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// Returns the index range of `page` (1-indexed) within `count` results.
///
/// Page 0 and pages past the end yield an empty range; no clamping happens
/// here.
#[must_use]
pub fn page_bounds(count: usize, page: u32) -> Range<usize> {
    let Some(offset) = page.checked_sub(1) else {
        return 0..0;
    };
    let start = usize::try_from(offset)
        .unwrap_or(usize::MAX)
        .saturating_mul(PAGE_SIZE);
    if start >= count {
        return count..count;
    }
    start..start.saturating_add(PAGE_SIZE).min(count)
}

/// One derived page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<'a> {
    /// Shows on the requested page.
    pub shows: Vec<&'a Show>,
    /// Requested page number.
    pub page: u32,
    /// Page count of the filtered results.
    pub total_pages: u32,
    /// Number of shows passing the filters.
    pub filtered_count: usize,
}

/// Filters `shows` by `query` and slices out `query.page`.
///
/// Pure: the same inputs always give the same page.
#[must_use]
pub fn derive_page<'a>(shows: &'a [Show], query: &QueryState) -> ResultPage<'a> {
    let indices = filter_indices(shows, query);
    page_of(shows, &indices, query.page)
}

/// Slices `page` out of precomputed filter indices.
pub(crate) fn page_of<'a>(shows: &'a [Show], indices: &[usize], page: u32) -> ResultPage<'a> {
    let bounds = page_bounds(indices.len(), page);
    let visible = indices
        .get(bounds)
        .unwrap_or_default()
        .iter()
        .filter_map(|&i| shows.get(i))
        .collect();
    ResultPage {
        shows: visible,
        page,
        total_pages: total_pages(indices.len()),
        filtered_count: indices.len(),
    }
}

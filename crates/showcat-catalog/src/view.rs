//! Catalog view controller.

use showcat_api::tvmaze::{Catalog, Show};

use crate::page::{ResultPage, page_of, total_pages};
use crate::query::{QueryState, RatingFloor, filter_indices};
use crate::window::{PageWindow, page_window};

/// Owns the loaded catalog and the query state driving the visible page.
///
/// Every setter re-derives the filtered result from scratch. Changing the
/// search text, genre, or rating returns to page 1; page changes are clamped
/// to the available pages.
#[derive(Debug, Clone)]
pub struct CatalogView {
    /// Loaded catalog; never mutated after construction.
    catalog: Catalog,
    /// Current query.
    query: QueryState,
    /// Indices into `catalog.shows` passing the current filters.
    filtered_indices: Vec<usize>,
}

impl CatalogView {
    /// Creates a view over `catalog` with no filters on page 1.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_query(catalog, QueryState::default())
    }

    /// Creates a view with an initial query; its page is clamped.
    #[must_use]
    pub fn with_query(catalog: Catalog, query: QueryState) -> Self {
        let page = query.page;
        let mut view = Self {
            catalog,
            query,
            filtered_indices: Vec::new(),
        };
        view.rebuild_filter_cache();
        view.set_page(page);
        view
    }

    /// Returns the loaded catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// Returns the current page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.query.page
    }

    /// Returns the number of shows passing the filters.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Returns the page count of the filtered results.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.filtered_indices.len())
    }

    /// Returns the current page of results.
    #[must_use]
    pub fn page(&self) -> ResultPage<'_> {
        page_of(&self.catalog.shows, &self.filtered_indices, self.query.page)
    }

    /// Returns the shows on the current page.
    #[must_use]
    pub fn visible(&self) -> Vec<&Show> {
        self.page().shows
    }

    /// Returns the pagination window for the current page.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        page_window(self.query.page, self.total_pages())
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refilter();
    }

    /// Appends a character to the search text.
    pub fn push_search_char(&mut self, ch: char) {
        self.query.search.push(ch);
        self.refilter();
    }

    /// Removes the last character from the search text.
    pub fn pop_search_char(&mut self) {
        if self.query.search.pop().is_some() {
            self.refilter();
        }
    }

    /// Sets or clears the genre filter.
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.query.genre = genre;
        self.refilter();
    }

    /// Sets or clears the rating floor.
    pub fn set_rating(&mut self, rating: Option<RatingFloor>) {
        self.query.rating = rating;
        self.refilter();
    }

    /// Moves to `page`, clamped to `1..=max(total_pages, 1)`.
    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Moves to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.query.page.saturating_add(1));
    }

    /// Moves to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.set_page(self.query.page.saturating_sub(1));
    }

    /// Moves to page 1.
    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Rebuilds the filter cache and returns to page 1.
    fn refilter(&mut self) {
        self.rebuild_filter_cache();
        self.query.page = 1;
    }

    /// Rebuilds the filtered index cache from the full catalog.
    fn rebuild_filter_cache(&mut self) {
        self.filtered_indices = filter_indices(&self.catalog.shows, &self.query);
        tracing::debug!(
            search = %self.query.search,
            genre = ?self.query.genre,
            rating = ?self.query.rating,
            filtered = self.filtered_indices.len(),
            "catalog re-derived"
        );
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn make_view(count: u64) -> CatalogView {
        let shows = (1..=count)
            .map(|id| Show {
                id,
                name: if id % 3 == 0 {
                    format!("Mystery {id}")
                } else {
                    format!("Show {id}")
                },
                rating: Some(if id <= 10 { 7.5 } else { 6.0 }),
                genres: if id % 2 == 0 {
                    vec![String::from("Comedy")]
                } else {
                    vec![String::from("Drama")]
                },
                status: None,
                premiered: None,
                url: None,
                image: None,
            })
            .collect();
        CatalogView::new(Catalog::from_shows(shows))
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let view = make_view(20);

        // Assert
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.visible().len(), 15);
        assert_eq!(view.filtered_count(), 20);
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        // Arrange
        let mut view = make_view(20);

        // Act & Assert
        view.next_page();
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.visible().len(), 5);

        view.next_page(); // at end, should not move
        assert_eq!(view.current_page(), 2);

        view.set_page(50);
        assert_eq!(view.current_page(), 2);

        view.first_page();
        view.prev_page(); // at start, should not move
        assert_eq!(view.current_page(), 1);

        view.last_page();
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        // Arrange
        let mut view = make_view(40);
        view.set_page(3);

        // Act
        view.set_genre(Some(String::from("Comedy")));

        // Assert
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.filtered_count(), 20);
        assert!(
            view.visible()
                .iter()
                .all(|s| s.genres.contains(&String::from("Comedy")))
        );
    }

    #[test]
    fn test_search_typing() {
        // Arrange
        let mut view = make_view(20);

        // Act
        for ch in "myst".chars() {
            view.push_search_char(ch);
        }

        // Assert
        assert_eq!(view.query().search, "myst");
        assert_eq!(view.filtered_count(), 6);

        // Act: erase everything
        for _ in 0..10 {
            view.pop_search_char();
        }

        // Assert
        assert_eq!(view.filtered_count(), 20);
    }

    #[test]
    fn test_rating_filter() {
        // Arrange
        let mut view = make_view(20);

        // Act
        view.set_rating(Some(RatingFloor::from_tenths(70)));

        // Assert
        assert_eq!(view.filtered_count(), 10);
        assert_eq!(view.total_pages(), 1);
    }

    #[test]
    fn test_no_results_keeps_page_one() {
        // Arrange
        let mut view = make_view(20);

        // Act
        view.set_search("nothing matches this");
        view.next_page();

        // Assert
        assert_eq!(view.total_pages(), 0);
        assert_eq!(view.current_page(), 1);
        assert!(view.visible().is_empty());
        assert!(view.window().is_empty());
    }

    #[test]
    fn test_source_collection_is_untouched() {
        // Arrange
        let mut view = make_view(20);
        let before = view.catalog().clone();

        // Act
        view.set_search("show");
        view.set_genre(Some(String::from("Drama")));
        view.set_page(2);

        // Assert
        assert_eq!(view.catalog(), &before);
    }

    #[test]
    fn test_initial_query_page_is_clamped() {
        // Arrange
        let catalog = Catalog::from_shows(make_view(20).catalog().shows.clone());

        // Act
        let view = CatalogView::with_query(catalog, QueryState::new().page(7));

        // Assert
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.window().pages(), 1..=2);
    }
}

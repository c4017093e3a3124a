//! Catalog browser TUI state management.

use ratatui::widgets::TableState;
use showcat_api::tvmaze::{Catalog, Show};
use showcat_catalog::{CatalogView, DetailController, DetailTicket, DetailUpdate, RatingFloor};

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// A select control cycling through `None` ("any") and a fixed list.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    /// Selectable values.
    options: Vec<T>,
    /// Index of the selected value; `None` means "any".
    selected: Option<usize>,
}

impl<T: Clone> Choice<T> {
    /// Creates a control with "any" selected.
    #[must_use]
    pub const fn new(options: Vec<T>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    /// Returns the selected value.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Advances to the next value, wrapping back to "any" after the last.
    pub fn cycle(&mut self) -> Option<T> {
        self.selected = match self.selected {
            None if !self.options.is_empty() => Some(0),
            Some(i) if i.saturating_add(1) < self.options.len() => Some(i.saturating_add(1)),
            _ => None,
        };
        self.selected().cloned()
    }
}

/// State for the catalog browser TUI.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct BrowserState {
    /// Filtered and paginated catalog.
    pub view: CatalogView,
    /// Detail sub-controller.
    pub details: DetailController,
    /// Table state for the visible page (handles selection and scroll).
    pub table_state: TableState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Genre filter control.
    pub genre: Choice<String>,
    /// Rating filter control.
    pub rating: Choice<RatingFloor>,
}

impl BrowserState {
    /// Creates a new state over a loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog, genres: Vec<String>, ratings: Vec<RatingFloor>) -> Self {
        let mut state = Self {
            view: CatalogView::new(catalog),
            details: DetailController::new(),
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            genre: Choice::new(genres),
            rating: Choice::new(ratings),
        };
        state.select_first_row();
        state
    }

    /// Returns the cursor position within the visible page.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the show under the cursor (if any).
    #[must_use]
    pub fn current_show(&self) -> Option<&Show> {
        self.view.visible().get(self.cursor()).copied()
    }

    /// Returns the show whose details are open (if any).
    #[must_use]
    pub fn detail_show(&self) -> Option<&Show> {
        let id = self.details.selected_show()?;
        self.view.catalog().shows.iter().find(|s| s.id == id)
    }

    /// Moves cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.cursor();
        if current + 1 < self.view.visible().len() {
            self.table_state.select(Some(current + 1));
        }
    }

    /// Goes to the next page.
    pub fn next_page(&mut self) {
        self.view.next_page();
        self.select_first_row();
    }

    /// Goes to the previous page.
    pub fn prev_page(&mut self) {
        self.view.prev_page();
        self.select_first_row();
    }

    /// Goes to the first page.
    pub fn first_page(&mut self) {
        self.view.first_page();
        self.select_first_row();
    }

    /// Goes to the last page.
    pub fn last_page(&mut self) {
        self.view.last_page();
        self.select_first_row();
    }

    /// Appends a character to the search text.
    pub fn search_push(&mut self, ch: char) {
        self.view.push_search_char(ch);
        self.select_first_row();
    }

    /// Removes the last character from the search text.
    pub fn search_pop(&mut self) {
        self.view.pop_search_char();
        self.select_first_row();
    }

    /// Clears the search text.
    pub fn search_clear(&mut self) {
        self.view.set_search(String::new());
        self.select_first_row();
    }

    /// Advances the genre filter.
    pub fn cycle_genre(&mut self) {
        let genre = self.genre.cycle();
        self.view.set_genre(genre);
        self.select_first_row();
    }

    /// Advances the rating filter.
    pub fn cycle_rating(&mut self) {
        let rating = self.rating.cycle();
        self.view.set_rating(rating);
        self.select_first_row();
    }

    /// Opens the details of the show under the cursor.
    ///
    /// Returns the ticket the detail fetches must report with.
    pub fn open_details(&mut self) -> Option<DetailTicket> {
        let id = self.current_show()?.id;
        Some(self.details.select(id))
    }

    /// Closes the detail pane.
    pub fn close_details(&mut self) {
        self.details.clear();
    }

    /// Applies a finished detail fetch; stale updates are ignored.
    pub fn apply_detail(&mut self, update: DetailUpdate) {
        self.details.apply(update);
    }

    /// Selects the first row if available.
    fn select_first_row(&mut self) {
        if self.view.visible().is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }
}

//! Catalog derivation and view state for showcat.
//!
//! The engine (`query`, `page`, `window`) is a set of pure functions over an
//! immutable show collection. `view` and `detail` hold the mutable
//! presentation state and re-derive from scratch on every change.

pub mod detail;
pub mod page;
pub mod query;
pub mod view;
pub mod window;

pub use detail::{
    DetailController, DetailPart, DetailPhase, DetailTicket, DetailUpdate, Section,
    ShowDetailView, load_details,
};
pub use page::{PAGE_SIZE, ResultPage, derive_page, page_bounds, total_pages};
pub use query::{QueryState, RatingFloor, filter_indices, matches, parse_genre_filter};
pub use view::CatalogView;
pub use window::{EdgeLink, PageWindow, WINDOW_SIZE, page_window};

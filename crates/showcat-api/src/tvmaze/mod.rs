//! TVmaze API client module.
//!
//! Handles HTTP requests to the public TVmaze API (`/shows` index and the
//! per-show seasons/cast/crew endpoints) and aggregates the paginated index
//! into a single catalog.

mod api;
mod client;
mod error;
mod fetch;
mod outcome;
mod rate_limiter;
mod types;
mod wire;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTvMazeApi, TvMazeApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TvMazeClient, TvMazeClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TvMazeError;
pub use fetch::{
    Catalog, CatalogFetchOptions, DEFAULT_BATCH_SIZE, PageFailure, ShowDetails, fetch_cast,
    fetch_crew, fetch_details, fetch_seasons, fetch_shows,
};
pub use outcome::{FailureKind, FetchFailure, FetchOutcome};
pub use types::{CastMember, CrewMember, ImageRef, Person, Season, Show};

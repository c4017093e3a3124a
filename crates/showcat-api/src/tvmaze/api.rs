//! `TvMazeApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{CastMember, CrewMember, Season, Show};

/// TVmaze API trait.
///
/// Abstracts the four read-only endpoints the catalog uses so the fetch
/// orchestration can run against stubs in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TvMazeApi: Send)]
pub trait LocalTvMazeApi {
    /// Fetches one page of the show index (`GET shows?page={page}`).
    ///
    /// A page past the end of the index resolves to an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn show_page(&self, page: u32) -> Result<Vec<Show>>;

    /// Fetches the seasons of a show.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn seasons(&self, show_id: u64) -> Result<Vec<Season>>;

    /// Fetches the cast of a show.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn cast(&self, show_id: u64) -> Result<Vec<CastMember>>;

    /// Fetches the crew of a show.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn crew(&self, show_id: u64) -> Result<Vec<CrewMember>>;
}

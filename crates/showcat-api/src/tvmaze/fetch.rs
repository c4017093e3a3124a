//! Catalog aggregation and detail fetches over a `LocalTvMazeApi`.
//!
//! Nothing here returns an error: failures are logged and reported in the
//! returned values so the catalog and detail views always have something to
//! show.

use futures::future::join_all;
use tracing::instrument;

use super::api::LocalTvMazeApi;
use super::outcome::{FetchFailure, FetchOutcome};
use super::types::{CastMember, CrewMember, Season, Show};

/// Default number of index pages requested concurrently per batch.
pub const DEFAULT_BATCH_SIZE: u32 = 6;

/// How the show index is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFetchOptions {
    /// Pages requested concurrently per batch (minimum 1).
    pub batch_size: u32,
    /// Upper bound on pages requested; `None` walks until the index is exhausted.
    pub max_pages: Option<u32>,
}

impl Default for CatalogFetchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_pages: None,
        }
    }
}

/// A catalog page that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Index page number.
    pub page: u32,
    /// Failure detail.
    pub failure: FetchFailure,
}

/// The loaded show collection plus how complete it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Shows in page-index order, then per-page order.
    pub shows: Vec<Show>,
    /// Number of pages that returned shows.
    pub pages_loaded: u32,
    /// Pages that failed; the catalog is partial when non-empty.
    pub failed_pages: Vec<PageFailure>,
}

impl Catalog {
    /// Wraps an already-loaded collection.
    #[must_use]
    pub const fn from_shows(shows: Vec<Show>) -> Self {
        Self {
            shows,
            pages_loaded: 0,
            failed_pages: Vec::new(),
        }
    }

    /// Returns `true` if at least one page failed to load.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        !self.failed_pages.is_empty()
    }
}

/// Fetches the show index batch by batch.
///
/// Each batch requests `batch_size` consecutive pages concurrently and
/// appends their shows in page order. Walking stops after a batch in which a
/// page came back empty (end of index), after a batch in which every page
/// failed, or when `max_pages` pages have been requested. Failed pages are
/// logged and recorded in `Catalog::failed_pages`.
#[instrument(skip_all)]
pub async fn fetch_shows(
    api: &(impl LocalTvMazeApi + Sync),
    options: &CatalogFetchOptions,
) -> Catalog {
    let batch_size = options.batch_size.max(1);
    let limit = options.max_pages.unwrap_or(u32::MAX);

    let mut catalog = Catalog::default();
    let mut next_page: u32 = 0;

    while next_page < limit {
        let batch_end = next_page.saturating_add(batch_size).min(limit);
        let pages: Vec<u32> = (next_page..batch_end).collect();

        tracing::debug!(first = next_page, last = batch_end.saturating_sub(1), "Fetching show index batch");

        let results = join_all(
            pages
                .iter()
                .map(|&page| async move { (page, api.show_page(page).await) }),
        )
        .await;

        let mut exhausted = false;
        let mut any_loaded = false;
        for (page, result) in results {
            match result {
                Ok(shows) if shows.is_empty() => exhausted = true,
                Ok(shows) => {
                    tracing::debug!(page, count = shows.len(), "show index page loaded");
                    any_loaded = true;
                    catalog.pages_loaded = catalog.pages_loaded.saturating_add(1);
                    catalog.shows.extend(shows);
                }
                Err(err) => {
                    let failure = FetchFailure::from_error(&err);
                    tracing::warn!(page, "Failed to fetch show index page: {failure}");
                    catalog.failed_pages.push(PageFailure { page, failure });
                }
            }
        }

        if exhausted || !any_loaded {
            break;
        }
        next_page = batch_end;
    }

    tracing::info!(
        shows = catalog.shows.len(),
        pages = catalog.pages_loaded,
        failed = catalog.failed_pages.len(),
        "Catalog loaded"
    );

    catalog
}

/// Fetches the seasons of a show.
#[instrument(skip_all, fields(show_id = show_id))]
pub async fn fetch_seasons(
    api: &(impl LocalTvMazeApi + Sync),
    show_id: u64,
) -> FetchOutcome<Season> {
    FetchOutcome::from_result(api.seasons(show_id).await, "seasons")
}

/// Fetches the cast of a show.
#[instrument(skip_all, fields(show_id = show_id))]
pub async fn fetch_cast(
    api: &(impl LocalTvMazeApi + Sync),
    show_id: u64,
) -> FetchOutcome<CastMember> {
    FetchOutcome::from_result(api.cast(show_id).await, "cast")
}

/// Fetches the crew of a show.
#[instrument(skip_all, fields(show_id = show_id))]
pub async fn fetch_crew(
    api: &(impl LocalTvMazeApi + Sync),
    show_id: u64,
) -> FetchOutcome<CrewMember> {
    FetchOutcome::from_result(api.crew(show_id).await, "crew")
}

/// Seasons, cast, and crew of one show.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetails {
    /// Show the details were fetched for.
    pub show_id: u64,
    /// Season list.
    pub seasons: FetchOutcome<Season>,
    /// Cast list.
    pub cast: FetchOutcome<CastMember>,
    /// Crew list.
    pub crew: FetchOutcome<CrewMember>,
}

/// Fetches seasons, cast, and crew concurrently.
///
/// The three requests are independent: a failure in one leaves the other
/// two untouched.
#[instrument(skip_all, fields(show_id = show_id))]
pub async fn fetch_details(api: &(impl LocalTvMazeApi + Sync), show_id: u64) -> ShowDetails {
    let (seasons, cast, crew) = tokio::join!(
        fetch_seasons(api, show_id),
        fetch_cast(api, show_id),
        fetch_crew(api, show_id),
    );
    ShowDetails {
        show_id,
        seasons,
        cast,
        crew,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use anyhow::{Result, bail};

    use super::*;
    use crate::tvmaze::TvMazeError;
    use crate::tvmaze::outcome::FailureKind;
    use crate::tvmaze::types::Person;

    /// In-memory index: `pages[n]` is page n; missing pages are past the end.
    #[derive(Default)]
    struct StubApi {
        pages: Vec<Vec<Show>>,
        failing_pages: HashSet<u32>,
        failing_seasons: bool,
        requested: Mutex<Vec<u32>>,
        detail_calls: Mutex<HashMap<&'static str, u32>>,
    }

    impl StubApi {
        fn with_pages(sizes: &[usize]) -> Self {
            let mut next_id = 0_u64;
            let pages = sizes
                .iter()
                .map(|&size| {
                    (0..size)
                        .map(|_| {
                            next_id += 1;
                            show(next_id)
                        })
                        .collect()
                })
                .collect();
            Self {
                pages,
                ..Self::default()
            }
        }

        fn requested(&self) -> Vec<u32> {
            let mut pages = self.requested.lock().unwrap().clone();
            pages.sort_unstable();
            pages
        }

        fn count(&self, what: &'static str) {
            *self.detail_calls.lock().unwrap().entry(what).or_default() += 1;
        }
    }

    fn show(id: u64) -> Show {
        Show {
            id,
            name: format!("Show {id}"),
            rating: None,
            genres: Vec::new(),
            status: None,
            premiered: None,
            url: None,
            image: None,
        }
    }

    fn person(id: u64) -> Person {
        Person {
            id,
            name: format!("Person {id}"),
            image: None,
        }
    }

    impl LocalTvMazeApi for StubApi {
        async fn show_page(&self, page: u32) -> Result<Vec<Show>> {
            self.requested.lock().unwrap().push(page);
            if self.failing_pages.contains(&page) {
                return Err(TvMazeError::Transport {
                    path: String::from("shows"),
                    message: String::from("connection refused"),
                }
                .into());
            }
            Ok(self
                .pages
                .get(usize::try_from(page).unwrap())
                .cloned()
                .unwrap_or_default())
        }

        async fn seasons(&self, _show_id: u64) -> Result<Vec<Season>> {
            self.count("seasons");
            if self.failing_seasons {
                return Err(TvMazeError::Status {
                    path: String::from("shows/1/seasons"),
                    status: 500,
                }
                .into());
            }
            Ok(vec![Season {
                id: 10,
                number: 1,
                episode_order: Some(8),
                premiere_date: None,
                end_date: None,
                image: None,
            }])
        }

        async fn cast(&self, _show_id: u64) -> Result<Vec<CastMember>> {
            self.count("cast");
            Ok(vec![CastMember {
                person: person(1),
                character: String::from("Lead"),
            }])
        }

        async fn crew(&self, _show_id: u64) -> Result<Vec<CrewMember>> {
            self.count("crew");
            bail!("crew endpoint unavailable")
        }
    }

    fn ids(catalog: &Catalog) -> Vec<u64> {
        catalog.shows.iter().map(|s| s.id).collect()
    }

    #[tokio::test]
    async fn test_fixed_six_page_snapshot_preserves_order() {
        // Arrange
        let api = StubApi::with_pages(&[2, 2, 2, 2, 2, 2, 2, 2]);
        let options = CatalogFetchOptions {
            batch_size: 6,
            max_pages: Some(6),
        };

        // Act
        let catalog = fetch_shows(&api, &options).await;

        // Assert
        assert_eq!(api.requested(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ids(&catalog), (1..=12).collect::<Vec<_>>());
        assert_eq!(catalog.pages_loaded, 6);
        assert!(!catalog.is_partial());
    }

    #[tokio::test]
    async fn test_walks_until_index_exhausted() {
        // Arrange: 8 pages, batches of 3 -> pages 0..=8 requested, 8 is empty
        let api = StubApi::with_pages(&[1, 1, 1, 1, 1, 1, 1, 1]);
        let options = CatalogFetchOptions {
            batch_size: 3,
            max_pages: None,
        };

        // Act
        let catalog = fetch_shows(&api, &options).await;

        // Assert
        assert_eq!(api.requested(), (0..9).collect::<Vec<_>>());
        assert_eq!(catalog.shows.len(), 8);
        assert_eq!(catalog.pages_loaded, 8);
    }

    #[tokio::test]
    async fn test_failed_page_yields_partial_catalog() {
        // Arrange
        let mut api = StubApi::with_pages(&[2, 2, 2]);
        api.failing_pages.insert(1);

        // Act
        let catalog = fetch_shows(&api, &CatalogFetchOptions::default()).await;

        // Assert
        assert!(catalog.is_partial());
        assert_eq!(ids(&catalog), vec![1, 2, 5, 6]);
        assert_eq!(catalog.failed_pages.len(), 1);
        assert_eq!(catalog.failed_pages[0].page, 1);
        assert_eq!(catalog.failed_pages[0].failure.kind, FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_all_pages_failing_stops_and_resolves_empty() {
        // Arrange
        let mut api = StubApi::with_pages(&[2, 2]);
        api.failing_pages.extend(0..6);

        // Act
        let catalog = fetch_shows(&api, &CatalogFetchOptions::default()).await;

        // Assert
        assert!(catalog.shows.is_empty());
        assert_eq!(catalog.failed_pages.len(), 6);
        assert_eq!(api.requested(), (0..6).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_treated_as_one() {
        // Arrange
        let api = StubApi::with_pages(&[1, 1]);
        let options = CatalogFetchOptions {
            batch_size: 0,
            max_pages: None,
        };

        // Act
        let catalog = fetch_shows(&api, &options).await;

        // Assert
        assert_eq!(catalog.shows.len(), 2);
        assert_eq!(api.requested(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_detail_failures_are_isolated() {
        // Arrange
        let api = StubApi {
            failing_seasons: true,
            ..StubApi::default()
        };

        // Act
        let details = fetch_details(&api, 1).await;

        // Assert
        assert_eq!(
            details.seasons.failure().map(|f| f.kind),
            Some(FailureKind::UpstreamStatus(500))
        );
        assert_eq!(details.cast.items().len(), 1);
        assert!(details.crew.is_failed());
        let calls = api.detail_calls.lock().unwrap().clone();
        assert_eq!(calls.get("seasons"), Some(&1));
        assert_eq!(calls.get("cast"), Some(&1));
        assert_eq!(calls.get("crew"), Some(&1));
    }

    #[tokio::test]
    async fn test_lossy_view_of_failed_seasons_is_empty() {
        // Arrange
        let api = StubApi {
            failing_seasons: true,
            ..StubApi::default()
        };

        // Act
        let seasons = fetch_seasons(&api, 1).await.into_items();
        let cast = fetch_cast(&api, 1).await.into_items();

        // Assert
        assert!(seasons.is_empty());
        assert_eq!(cast[0].character, "Lead");
    }
}

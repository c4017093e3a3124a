//! Query state and the per-show filter predicate.

use std::str::FromStr;

use anyhow::{Context, Result};
use showcat_api::tvmaze::Show;

/// Select-control value meaning "no filter".
pub const ANY: &str = "any";

/// Minimum average rating, stored in tenths (`70` means 7.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatingFloor(u32);

impl RatingFloor {
    /// Creates a floor from a tenths-encoded value.
    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Returns the tenths-encoded value.
    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// Returns the floor as a rating value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Returns `true` if `rating` reaches the floor. Unrated counts as 0.0.
    #[must_use]
    pub fn admits(self, rating: Option<f64>) -> bool {
        rating.unwrap_or(0.0) >= self.value()
    }

    /// Parses a select-control value; `"any"` and `""` mean no floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither "any" nor an unsigned integer.
    pub fn parse_filter(value: &str) -> Result<Option<Self>> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ANY) {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for RatingFloor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let tenths: u32 = s
            .trim()
            .parse()
            .with_context(|| format!("invalid rating filter: {s:?} (expected tenths, e.g. 70)"))?;
        Ok(Self(tenths))
    }
}

impl std::fmt::Display for RatingFloor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 10;
        let tenth = self.0 % 10;
        if tenth == 0 {
            write!(f, "{whole}+")
        } else {
            write!(f, "{whole}.{tenth}+")
        }
    }
}

/// Parses a genre select-control value; `"any"` and `""` mean no filter.
#[must_use]
pub fn parse_genre_filter(value: &str) -> Option<String> {
    if value.is_empty() || value == ANY {
        None
    } else {
        Some(String::from(value))
    }
}

/// Search, filter, and page selection driving the visible page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Case-insensitive name substring; empty matches everything.
    pub search: String,
    /// Exact genre label; `None` matches everything.
    pub genre: Option<String>,
    /// Rating floor; `None` matches everything.
    pub rating: Option<RatingFloor>,
    /// 1-indexed page number.
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: None,
            rating: None,
            page: 1,
        }
    }
}

impl QueryState {
    /// Creates an unfiltered query for page 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the genre filter.
    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets the rating floor.
    #[must_use]
    pub const fn rating(mut self, rating: RatingFloor) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Returns `true` if the show passes search, genre, and rating filters.
#[must_use]
pub fn matches(show: &Show, query: &QueryState) -> bool {
    Predicate::new(query).test(show)
}

/// Returns the indices of matching shows, in collection order.
#[must_use]
pub fn filter_indices(shows: &[Show], query: &QueryState) -> Vec<usize> {
    let predicate = Predicate::new(query);
    shows
        .iter()
        .enumerate()
        .filter(|(_, show)| predicate.test(show))
        .map(|(i, _)| i)
        .collect()
}

/// Query with the search text lowered once.
struct Predicate<'q> {
    search_lower: String,
    genre: Option<&'q str>,
    rating: Option<RatingFloor>,
}

impl<'q> Predicate<'q> {
    fn new(query: &'q QueryState) -> Self {
        Self {
            search_lower: query.search.to_lowercase(),
            genre: query.genre.as_deref(),
            rating: query.rating,
        }
    }

    fn test(&self, show: &Show) -> bool {
        let matches_search =
            self.search_lower.is_empty() || show.name.to_lowercase().contains(&self.search_lower);
        let matches_genre = self
            .genre
            .is_none_or(|genre| show.genres.iter().any(|g| g == genre));
        let matches_rating = self.rating.is_none_or(|floor| floor.admits(show.rating));

        matches_search && matches_genre && matches_rating
    }
}

//! Catalog domain types normalized from TVmaze payloads.

/// Thumbnail image references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRef {
    /// Medium-sized image URL.
    pub medium: Option<String>,
    /// Original-sized image URL.
    pub original: Option<String>,
}

/// A show in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    /// TVmaze show ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Average rating (0.0 - 10.0), absent when unrated.
    pub rating: Option<f64>,
    /// Genre labels.
    pub genres: Vec<String>,
    /// Airing status (e.g. "Running", "Ended").
    pub status: Option<String>,
    /// Premiere date (YYYY-MM-DD).
    pub premiered: Option<String>,
    /// TVmaze web page for the show.
    pub url: Option<String>,
    /// Thumbnail image.
    pub image: Option<ImageRef>,
}

/// A season of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// TVmaze season ID.
    pub id: u64,
    /// Season number.
    pub number: u32,
    /// Number of episodes (unknown for announced seasons).
    pub episode_order: Option<u32>,
    /// Premiere date (YYYY-MM-DD).
    pub premiere_date: Option<String>,
    /// End date (YYYY-MM-DD).
    pub end_date: Option<String>,
    /// Season poster.
    pub image: Option<ImageRef>,
}

/// A person credited on a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// TVmaze person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Portrait.
    pub image: Option<ImageRef>,
}

/// A cast credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Performer.
    pub person: Person,
    /// Character name.
    pub character: String,
}

/// A crew credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    /// Role label (e.g. "Creator", "Executive Producer").
    pub kind: String,
    /// Credited person.
    pub person: Person,
}

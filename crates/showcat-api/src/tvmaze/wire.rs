//! Raw TVmaze JSON payloads.
//!
//! These mirror the upstream response bodies and are converted into the
//! domain types in `types` right after decoding. Fields the catalog does not
//! use are left out; serde ignores them.

use serde::Deserialize;

use super::types::{CastMember, CrewMember, ImageRef, Person, Season, Show};

/// Image pair as returned by TVmaze.
#[derive(Debug, Deserialize)]
pub(crate) struct WireImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

/// `rating` object of a show.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireRating {
    pub average: Option<f64>,
}

/// One element of `GET /shows?page=N`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub rating: Option<WireRating>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub premiered: Option<String>,
    pub url: Option<String>,
    pub image: Option<WireImage>,
}

/// One element of `GET /shows/{id}/seasons`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSeason {
    pub id: u64,
    pub number: u32,
    pub episode_order: Option<u32>,
    pub premiere_date: Option<String>,
    pub end_date: Option<String>,
    pub image: Option<WireImage>,
}

/// `person` object embedded in cast and crew credits.
#[derive(Debug, Deserialize)]
pub(crate) struct WirePerson {
    pub id: u64,
    pub name: String,
    pub image: Option<WireImage>,
}

/// `character` object of a cast credit.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCharacter {
    pub name: String,
}

/// One element of `GET /shows/{id}/cast`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCastCredit {
    pub person: WirePerson,
    pub character: WireCharacter,
}

/// One element of `GET /shows/{id}/crew`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCrewCredit {
    #[serde(rename = "type")]
    pub kind: String,
    pub person: WirePerson,
}

impl From<WireImage> for ImageRef {
    fn from(raw: WireImage) -> Self {
        Self {
            medium: raw.medium,
            original: raw.original,
        }
    }
}

impl From<WirePerson> for Person {
    fn from(raw: WirePerson) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            image: raw.image.map(ImageRef::from),
        }
    }
}

impl From<WireShow> for Show {
    fn from(raw: WireShow) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            rating: raw.rating.and_then(|r| r.average),
            genres: raw.genres,
            status: raw.status,
            premiered: raw.premiered.filter(|s| !s.is_empty()),
            url: raw.url,
            image: raw.image.map(ImageRef::from),
        }
    }
}

impl From<WireSeason> for Season {
    fn from(raw: WireSeason) -> Self {
        Self {
            id: raw.id,
            number: raw.number,
            episode_order: raw.episode_order,
            premiere_date: raw.premiere_date,
            end_date: raw.end_date,
            image: raw.image.map(ImageRef::from),
        }
    }
}

impl From<WireCastCredit> for CastMember {
    fn from(raw: WireCastCredit) -> Self {
        Self {
            person: Person::from(raw.person),
            character: raw.character.name,
        }
    }
}

impl From<WireCrewCredit> for CrewMember {
    fn from(raw: WireCrewCredit) -> Self {
        Self {
            kind: raw.kind,
            person: Person::from(raw.person),
        }
    }
}

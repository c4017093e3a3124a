//! Per-show detail state machine.
//!
//! `select` starts a new selection and hands out a [`DetailTicket`]. The three
//! detail fetches report back through [`DetailUpdate`]s carrying that ticket;
//! `apply` drops any update issued for an earlier selection, so a slow
//! response for show A can never overwrite the details of show B.

use showcat_api::tvmaze::{
    CastMember, CrewMember, FetchFailure, FetchOutcome, LocalTvMazeApi, Season, fetch_cast,
    fetch_crew, fetch_seasons,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::instrument;

/// One detail section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    /// Request in flight.
    Loading,
    /// Request finished, possibly with zero items.
    Loaded(Vec<T>),
    /// Request failed.
    Failed(FetchFailure),
}

impl<T> Section<T> {
    /// Returns `true` while the request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded items (empty while loading or on failure).
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }
}

impl<T> From<FetchOutcome<T>> for Section<T> {
    fn from(outcome: FetchOutcome<T>) -> Self {
        match outcome {
            FetchOutcome::Loaded(items) => Self::Loaded(items),
            FetchOutcome::Failed(failure) => Self::Failed(failure),
        }
    }
}

/// Identifies one selection; a new `select` invalidates older tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailTicket {
    /// Selected show.
    pub show_id: u64,
    generation: u64,
}

/// A finished detail fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPart {
    /// Season list.
    Seasons(FetchOutcome<Season>),
    /// Cast list.
    Cast(FetchOutcome<CastMember>),
    /// Crew list.
    Crew(FetchOutcome<CrewMember>),
}

/// A finished detail fetch tagged with the selection it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailUpdate {
    /// Selection the fetch was issued for.
    pub ticket: DetailTicket,
    /// Fetch result.
    pub part: DetailPart,
}

/// Detail state of the selected show.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetailView {
    /// Current selection.
    pub ticket: DetailTicket,
    /// Seasons section.
    pub seasons: Section<Season>,
    /// Cast section.
    pub cast: Section<CastMember>,
    /// Crew section.
    pub crew: Section<CrewMember>,
}

impl ShowDetailView {
    const fn loading(ticket: DetailTicket) -> Self {
        Self {
            ticket,
            seasons: Section::Loading,
            cast: Section::Loading,
            crew: Section::Loading,
        }
    }

    /// Returns `true` once every section has resolved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.seasons.is_loading() && !self.cast.is_loading() && !self.crew.is_loading()
    }
}

/// Overall detail state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    /// Nothing selected.
    Idle,
    /// At least one section still in flight.
    Loading,
    /// Every section resolved.
    Loaded,
}

/// Tracks the selected show and its detail sections.
#[derive(Debug, Default)]
pub struct DetailController {
    current: Option<ShowDetailView>,
    generation: u64,
}

impl DetailController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `show_id`, resetting every section to loading.
    ///
    /// Selecting the same show again also issues a fresh ticket; details are
    /// re-fetched on every open.
    pub fn select(&mut self, show_id: u64) -> DetailTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = DetailTicket {
            show_id,
            generation: self.generation,
        };
        self.current = Some(ShowDetailView::loading(ticket));
        tracing::debug!(show_id, "detail selection started");
        ticket
    }

    /// Clears the selection. Updates still in flight become stale.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.current = None;
    }

    /// Applies a finished fetch. Returns `false` if the update was stale.
    pub fn apply(&mut self, update: DetailUpdate) -> bool {
        let Some(view) = self
            .current
            .as_mut()
            .filter(|view| view.ticket == update.ticket)
        else {
            tracing::debug!(
                show_id = update.ticket.show_id,
                "dropping stale detail update"
            );
            return false;
        };

        match update.part {
            DetailPart::Seasons(outcome) => view.seasons = outcome.into(),
            DetailPart::Cast(outcome) => view.cast = outcome.into(),
            DetailPart::Crew(outcome) => view.crew = outcome.into(),
        }
        true
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> DetailPhase {
        match &self.current {
            None => DetailPhase::Idle,
            Some(view) if view.is_complete() => DetailPhase::Loaded,
            Some(_) => DetailPhase::Loading,
        }
    }

    /// Returns the detail state of the selected show.
    #[must_use]
    pub const fn current(&self) -> Option<&ShowDetailView> {
        self.current.as_ref()
    }

    /// Returns the selected show id.
    #[must_use]
    pub fn selected_show(&self) -> Option<u64> {
        self.current.as_ref().map(|view| view.ticket.show_id)
    }
}

/// Fetches seasons, cast, and crew for `ticket` concurrently.
///
/// Each section is sent on `sender` as soon as it resolves. A closed
/// receiver only means nobody is interested any more.
#[instrument(skip_all, fields(show_id = ticket.show_id))]
pub async fn load_details(
    api: &(impl LocalTvMazeApi + Sync),
    ticket: DetailTicket,
    sender: &UnboundedSender<DetailUpdate>,
) {
    let show_id = ticket.show_id;
    let send = |part: DetailPart| {
        if sender.send(DetailUpdate { ticket, part }).is_err() {
            tracing::debug!(show_id, "detail receiver closed");
        }
    };

    tokio::join!(
        async { send(DetailPart::Seasons(fetch_seasons(api, show_id).await)) },
        async { send(DetailPart::Cast(fetch_cast(api, show_id).await)) },
        async { send(DetailPart::Crew(fetch_crew(api, show_id).await)) },
    );
}

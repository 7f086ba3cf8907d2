//! In-memory registry of viewer states and the tickets that tie fetches to them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::character::CharacterPage;
use crate::domain::query::CharacterQuery;
use crate::domain::types::PageNumber;
use crate::domain::view::ViewState;
use crate::services::{ServiceError, ServiceResult};

/// Browser session identifier stored in the session cookie.
pub type ViewerId = Uuid;

/// Parameter change requested by a viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewChange {
    /// Page view; starts the first fetch for a viewer that has none.
    Visit,
    Search(String),
    GoToPage(PageNumber),
    Refresh,
}

/// Permission to apply one fetch result to a viewer's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub viewer: ViewerId,
    pub generation: u64,
    pub query: CharacterQuery,
}

/// What happened to a completed fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Parameters changed (or the viewer expired) while the fetch was in flight.
    Superseded,
}

struct ViewerEntry {
    state: ViewState,
    last_seen: Instant,
}

/// Shared map of viewer id to [`ViewState`].
///
/// The lock is only held for the duration of a state transition, never
/// across a fetch.
pub struct ViewerRegistry {
    viewers: Mutex<HashMap<ViewerId, ViewerEntry>>,
    idle_timeout: Duration,
}

impl ViewerRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            viewers: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    fn lock(&self) -> ServiceResult<MutexGuard<'_, HashMap<ViewerId, ViewerEntry>>> {
        self.viewers
            .lock()
            .map_err(|_| ServiceError::Internal("viewer registry lock poisoned".to_string()))
    }

    /// Copy of the viewer's current state, if the viewer is known.
    pub fn snapshot(&self, viewer: ViewerId) -> ServiceResult<Option<ViewState>> {
        let mut viewers = self.lock()?;
        Ok(viewers.get_mut(&viewer).map(|entry| {
            entry.last_seen = Instant::now();
            entry.state.clone()
        }))
    }

    /// Applies `change` to the viewer's state.
    ///
    /// Returns a ticket when the change requires a fetch. A `Visit` of a
    /// viewer that already has state does not.
    pub fn apply(&self, viewer: ViewerId, change: ViewChange) -> ServiceResult<Option<FetchTicket>> {
        let now = Instant::now();
        let mut viewers = self.lock()?;

        if !viewers.contains_key(&viewer) {
            let idle_timeout = self.idle_timeout;
            viewers.retain(|_, entry| now.duration_since(entry.last_seen) < idle_timeout);
        }

        let entry = viewers.entry(viewer).or_insert_with(|| ViewerEntry {
            state: ViewState::new(),
            last_seen: now,
        });
        entry.last_seen = now;

        let state = &mut entry.state;
        let generation = match change {
            ViewChange::Visit if !state.is_fresh() => return Ok(None),
            ViewChange::Visit | ViewChange::Refresh => state.reload(),
            ViewChange::Search(name) => state.set_name(name),
            ViewChange::GoToPage(page) => state.set_page(page),
        };

        log::debug!(
            "Viewer {viewer} starts generation {generation} for page {} name '{}'",
            state.query().page,
            state.query().name
        );

        Ok(Some(FetchTicket {
            viewer,
            generation,
            query: state.query().clone(),
        }))
    }

    /// Stores the result of the fetch started for `ticket`, unless it was superseded.
    pub fn complete(
        &self,
        ticket: &FetchTicket,
        result: Result<CharacterPage, String>,
    ) -> ServiceResult<FetchOutcome> {
        let mut viewers = self.lock()?;
        let Some(entry) = viewers.get_mut(&ticket.viewer) else {
            return Ok(FetchOutcome::Superseded);
        };

        if entry.state.complete(ticket.generation, result) {
            Ok(FetchOutcome::Applied)
        } else {
            Ok(FetchOutcome::Superseded)
        }
    }

    /// Number of viewers currently tracked.
    pub fn len(&self) -> ServiceResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> ServiceResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}

//! Per-viewer query state and the lifecycle of the fetch serving it.

use crate::domain::character::CharacterPage;
use crate::domain::query::CharacterQuery;
use crate::domain::types::PageNumber;

/// Lifecycle of the latest fetch issued for a viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    /// A fetch is in flight. `previous` keeps the last successful page so the
    /// grid stays on screen until the new one arrives.
    Loading { previous: Option<CharacterPage> },
    Failed(String),
    Succeeded(CharacterPage),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Page currently available for display, fresh or stale.
    pub fn data(&self) -> Option<&CharacterPage> {
        match self {
            FetchStatus::Loading { previous } => previous.as_ref(),
            FetchStatus::Failed(_) => None,
            FetchStatus::Succeeded(page) => Some(page),
        }
    }

    fn into_data(self) -> Option<CharacterPage> {
        match self {
            FetchStatus::Loading { previous } => previous,
            FetchStatus::Failed(_) => None,
            FetchStatus::Succeeded(page) => Some(page),
        }
    }
}

/// Query parameters of one viewer together with the status of the fetch
/// serving them.
///
/// Every parameter change bumps `generation`. A completion carrying an older
/// generation belongs to superseded parameters and is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    query: CharacterQuery,
    status: FetchStatus,
    generation: u64,
    /// The displayed page was fetched for a different name filter.
    stale_filter: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// State of a viewer that has not issued any fetch yet.
    pub fn new() -> Self {
        Self {
            query: CharacterQuery::default(),
            status: FetchStatus::Loading { previous: None },
            generation: 0,
            stale_filter: false,
        }
    }

    pub fn query(&self) -> &CharacterQuery {
        &self.query
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True until the first fetch has been started.
    pub fn is_fresh(&self) -> bool {
        self.generation == 0
    }

    /// Total number of pages known for the current filter; one until data
    /// for that filter arrives.
    pub fn total_pages(&self) -> u32 {
        if self.stale_filter {
            return 1;
        }
        self.status
            .data()
            .map(CharacterPage::total_pages)
            .unwrap_or(1)
    }

    /// Sets the name filter, resets to the first page and starts a new generation.
    pub fn set_name(&mut self, name: impl Into<String>) -> u64 {
        self.query = std::mem::take(&mut self.query).with_name(name);
        self.stale_filter = true;
        self.begin()
    }

    /// Moves to `page`, clamped to the known page count, and starts a new generation.
    pub fn set_page(&mut self, page: PageNumber) -> u64 {
        let page = page.clamp_to(self.total_pages());
        self.query = std::mem::take(&mut self.query).with_page(page);
        self.begin()
    }

    /// Starts a new generation for unchanged parameters.
    pub fn reload(&mut self) -> u64 {
        self.begin()
    }

    fn begin(&mut self) -> u64 {
        self.generation += 1;
        let previous = std::mem::replace(&mut self.status, FetchStatus::Loading { previous: None })
            .into_data();
        self.status = FetchStatus::Loading { previous };
        self.generation
    }

    /// Applies the outcome of the fetch started for `generation`.
    ///
    /// Returns `false` and leaves the state untouched when `generation` is
    /// not the current one.
    pub fn complete(&mut self, generation: u64, result: Result<CharacterPage, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.stale_filter = false;
        self.status = match result {
            Ok(page) => {
                self.query.page = self.query.page.clamp_to(page.total_pages());
                FetchStatus::Succeeded(page)
            }
            Err(message) => FetchStatus::Failed(message),
        };
        true
    }
}

// Frame picker state machine: slots, the search session of the active slot,
// and the debounced search trigger. No egui and no networking in here; the
// app layer turns returned `SearchRequest`s into HTTP calls and feeds the
// outcomes back through `apply_response`.

use std::time::{Duration, Instant};

use crate::app::config::AppConfig;
use crate::search::{SearchError, SearchResult};
use crate::types::{SearchStatus, StalePolicy};
use crate::ui_constants::MIN_QUERY_CHARS;

mod debounce;

pub use debounce::Debounce;

/// A search the app must send to the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub query: String,
}

/// Transient state of the open slot's search box.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub status: SearchStatus,
}

impl SearchSession {
    fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.status = SearchStatus::Idle;
    }
}

pub struct FramePicker {
    slots: Vec<Option<String>>,
    active: Option<usize>,
    session: SearchSession,
    debounce: Debounce<String>,
    stale_policy: StalePolicy,
    counter: u64,
    // Id of the request whose answer LatestIssued still accepts
    latest_request: Option<u64>,
    results_generation: u64,
    focus_requested: bool,
}

impl FramePicker {
    pub fn new(slot_count: usize, debounce: Duration, stale_policy: StalePolicy) -> Self {
        Self {
            slots: vec![None; slot_count],
            active: None,
            session: SearchSession::default(),
            debounce: Debounce::new(debounce),
            stale_policy,
            counter: 0,
            latest_request: None,
            results_generation: 0,
            focus_requested: false,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.slot_count, cfg.debounce(), cfg.stale_policy)
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn status(&self) -> SearchStatus {
        self.session.status
    }

    /// Bumped every time a response replaces the result list.
    pub fn results_generation(&self) -> u64 {
        self.results_generation
    }

    /// How long until the pending debounced search fires, if one is armed.
    pub fn pending_search_in(&self, now: Instant) -> Option<Duration> {
        self.debounce.remaining(now)
    }

    /// True once after a slot was activated, so the view can focus the search box.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Open a search session on `index`, dropping whatever the previous one held.
    pub fn activate_slot(&mut self, index: usize) {
        if index >= self.slots.len() {
            log::warn!(
                "activate_slot: index {index} out of range (slots: {})",
                self.slots.len()
            );
            return;
        }
        self.debounce.cancel();
        self.session.clear();
        self.latest_request = None;
        self.active = Some(index);
        self.focus_requested = true;
        log::debug!("slot {index} activated");
    }

    /// Keystroke: show the new text right away, search once input goes quiet.
    pub fn on_query_change(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.session.query.clone_from(&text);
        self.debounce.schedule(text, now);
    }

    /// Enter: skip the quiet period and search the current text now.
    pub fn on_submit(&mut self) -> Option<SearchRequest> {
        if self.debounce.is_pending() {
            log::debug!("enter pressed, dropping the pending debounced search");
        }
        self.debounce.cancel();
        let query = self.session.query.clone();
        self.search(&query)
    }

    /// Fire the debounced search if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        let query = self.debounce.take_due(now)?;
        self.search(&query)
    }

    pub fn search(&mut self, text: &str) -> Option<SearchRequest> {
        if text.chars().count() < MIN_QUERY_CHARS {
            self.session.results.clear();
            self.session.status = SearchStatus::Idle;
            self.latest_request = None;
            return None;
        }
        self.counter = self.counter.wrapping_add(1);
        let id = self.counter;
        self.latest_request = Some(id);
        self.session.status = SearchStatus::Searching;
        Some(SearchRequest {
            id,
            query: text.to_string(),
        })
    }

    /// Apply the outcome of request `id`. Failures end up in the status line
    /// and the log; nothing is propagated.
    pub fn apply_response(&mut self, id: u64, res: Result<Vec<SearchResult>, SearchError>) {
        if self.stale_policy == StalePolicy::LatestIssued && self.latest_request != Some(id) {
            log::debug!("dropping stale search response #{id}");
            return;
        }
        match res {
            Ok(results) => {
                self.session.status = if results.is_empty() {
                    SearchStatus::NoResults
                } else {
                    SearchStatus::Results
                };
                self.session.results = results;
                self.results_generation = self.results_generation.wrapping_add(1);
            }
            Err(err) => {
                log::error!("Error fetching search results (#{id}): {err}");
                self.session.status = SearchStatus::Error;
            }
        }
    }

    /// Put the result's full image into the active slot and close the session.
    pub fn select_result(&mut self, result: &SearchResult) {
        let Some(index) = self.active else {
            log::warn!("select_result without an active slot: {}", result.name);
            return;
        };
        self.slots[index] = Some(result.original_url.clone());
        log::info!("slot {index} <- {} ({})", result.name, result.original_url);
        self.debounce.cancel();
        self.session.clear();
        self.latest_request = None;
        self.active = None;
    }
}

//! Session store: status machine, history, and stale-response gating.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use research_pipeline::{is_valid_query, ResearchResponse, MIN_QUERY_LEN};

/// Monotonically increasing identifier for one submission.
pub type RequestSeq = u64;

/// Session status. Re-entrant: a new submission moves `Done`/`Error` back to
/// `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Done,
    Error,
}

impl Default for SearchStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// A completed response retained for re-display, with its capture time.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub response: ResearchResponse,
    /// Unix milliseconds at the moment the response was recorded.
    pub captured_at_ms: u64,
}

/// Local rejection of a submission attempt. This is a pure validation
/// transition; nothing is sent.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("query must be at least {} characters after trimming", MIN_QUERY_LEN)]
    QueryTooShort,
}

/// In-memory session state for one search panel.
///
/// Responses and errors are applied through [`record_result`] /
/// [`record_error`] with the sequence number handed out by
/// [`begin_submit`]; only the highest sequence seen so far is accepted, so a
/// slow stale response can never overwrite a newer one.
///
/// [`begin_submit`]: SearchSession::begin_submit
/// [`record_result`]: SearchSession::record_result
/// [`record_error`]: SearchSession::record_error
#[derive(Debug, Default)]
pub struct SearchSession {
    status: SearchStatus,
    current: Option<ResearchResponse>,
    history: Vec<HistoryEntry>,
    error: Option<String>,
    next_seq: RequestSeq,
    applied_seq: RequestSeq,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The response currently on display, if any.
    pub fn current(&self) -> Option<&ResearchResponse> {
        self.current.as_ref()
    }

    /// Past responses, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mirrors the submit control: valid query and no request in flight.
    pub fn can_submit(&self, query: &str) -> bool {
        is_valid_query(query) && self.status != SearchStatus::Loading
    }

    /// Start a submission. Short queries are rejected locally without a
    /// sequence number being spent; otherwise the session enters `Loading`
    /// and the caller receives the sequence to report the outcome under.
    pub fn begin_submit(&mut self, query: &str) -> Result<RequestSeq, SubmitError> {
        if !is_valid_query(query) {
            return Err(SubmitError::QueryTooShort);
        }

        self.next_seq += 1;
        self.status = SearchStatus::Loading;
        self.error = None;
        Ok(self.next_seq)
    }

    /// Apply a completed response. Returns `false` when `seq` is stale, in
    /// which case nothing changes.
    pub fn record_result(&mut self, seq: RequestSeq, response: ResearchResponse) -> bool {
        if !self.accepts(seq) {
            return false;
        }

        self.applied_seq = seq;
        self.push_history(response.clone());
        self.current = Some(response);
        self.status = SearchStatus::Done;
        self.error = None;
        true
    }

    /// Apply a failed outcome. Same gating as [`record_result`]; history and
    /// the current response are left untouched, and the session is
    /// immediately resubmittable.
    ///
    /// [`record_result`]: SearchSession::record_result
    pub fn record_error(&mut self, seq: RequestSeq, message: impl Into<String>) -> bool {
        if !self.accepts(seq) {
            return false;
        }

        self.applied_seq = seq;
        self.status = SearchStatus::Error;
        self.error = Some(message.into());
        true
    }

    /// Republish a past response as current, without a network call and
    /// without reordering history.
    pub fn select_history_entry(&mut self, query: &str) -> Option<&ResearchResponse> {
        let response = self
            .history
            .iter()
            .find(|entry| entry.response.query == query)?
            .response
            .clone();

        self.current = Some(response);
        self.status = SearchStatus::Done;
        self.error = None;
        self.current.as_ref()
    }

    fn accepts(&self, seq: RequestSeq) -> bool {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "dropping stale outcome");
            return false;
        }
        true
    }

    /// Prepend to history, replacing the head when it holds the same query.
    fn push_history(&mut self, response: ResearchResponse) {
        let entry = HistoryEntry {
            captured_at_ms: now_ms(),
            response,
        };
        match self.history.first() {
            Some(head) if head.response.query == entry.response.query => {
                self.history[0] = entry;
            }
            _ => self.history.insert(0, entry),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

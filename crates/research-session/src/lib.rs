//! Search session state for research clients.
//!
//! This crate provides:
//! - An explicit, injectable session store (no ambient singleton) with the
//!   `Idle -> Loading -> {Done, Error}` status machine
//! - A most-recent-first query history that collapses consecutive repeats
//! - Stale-response gating via monotonically increasing request sequence
//!   numbers
//! - The snippet preview helper used by result rendering

pub mod display;
pub mod store;

pub use display::{needs_toggle, snippet_preview, SNIPPET_PREVIEW_CHARS};
pub use store::{HistoryEntry, RequestSeq, SearchSession, SearchStatus, SubmitError};

//! Research pipeline - query validation, provider fetch, and response shaping.
//!
//! This crate provides:
//! - A DuckDuckGo Instant Answer API client
//! - Topic flattening and filtering
//! - Snippet cleanup, title extraction, and response assembly

pub mod client;
pub mod shape;
pub mod types;

pub use client::{is_valid_query, ResearchClient, ResearchError, SearchConfig, MIN_QUERY_LEN};
pub use shape::{
    clean_snippet, extract_title, flatten_topics, shape_payload, FALLBACK_SUMMARY, MAX_INSIGHTS,
    MAX_ITEMS,
};
pub use types::{FlatTopic, InstantAnswer, RelatedTopic, ResearchItem, ResearchResponse, TopicGroup};

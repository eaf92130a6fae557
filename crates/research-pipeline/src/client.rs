//! Instant Answer API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::shape::shape_payload;
use crate::types::{InstantAnswer, ResearchResponse};

/// Minimum trimmed query length accepted by the pipeline.
pub const MIN_QUERY_LEN: usize = 3;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com/";
const DEFAULT_CLIENT_TAG: &str = "agentic-researcher";
const DEFAULT_USER_AGENT: &str = "Agentic-Researcher/1.0";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error types for the research pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("query must be at least {} characters after trimming", MIN_QUERY_LEN)]
    InvalidQuery,

    #[error("search provider returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ResearchError {
    /// Whether the failure is attributable to the upstream provider (its
    /// status or its reachability) as opposed to our own processing.
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::UpstreamStatus { .. } => true,
            Self::Http(error) => !error.is_decode(),
            Self::InvalidQuery => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResearchError>;

/// Whether a query survives validation: trimmed length of at least
/// [`MIN_QUERY_LEN`] characters.
pub fn is_valid_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// Configuration for the research client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Fixed identifying tag sent as the `t` query parameter.
    pub client_tag: String,
    /// User-Agent header on outbound calls.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_tag: DEFAULT_CLIENT_TAG.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// Create config from environment variables, falling back to the public
    /// provider endpoint.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SEARCH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            ..Default::default()
        }
    }
}

/// Instant Answer API client: validates the query, performs the single
/// outbound call, and shapes the payload.
pub struct ResearchClient {
    config: SearchConfig,
    http: Client,
}

impl ResearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { config, http })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(SearchConfig::from_env())
    }

    /// Run one research query end to end.
    ///
    /// Validation happens before any network traffic; a single provider call
    /// follows, and the raw payload is shaped into a [`ResearchResponse`].
    pub async fn research(&self, query: &str) -> Result<ResearchResponse> {
        if !is_valid_query(query) {
            return Err(ResearchError::InvalidQuery);
        }

        debug!(%query, "dispatching research query");
        let payload = self.fetch(query).await?;
        Ok(shape_payload(payload, query))
    }

    /// Perform the provider call: JSON format, fixed client tag, redirects
    /// and raw HTML suppressed.
    async fn fetch(&self, query: &str) -> Result<InstantAnswer> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("t", self.config.client_tag.as_str()),
                ("no_redirect", "1"),
                ("no_html", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResearchError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "https://api.duckduckgo.com/");
        assert_eq!(config.client_tag, "agentic-researcher");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_query_validation() {
        assert!(!is_valid_query(""));
        assert!(!is_valid_query("ai"));
        assert!(!is_valid_query("  a  "));
        assert!(is_valid_query("rust"));
        assert!(is_valid_query("  rio  "));
    }

    #[tokio::test]
    async fn test_short_query_rejected_before_any_call() {
        // Default config points at the live endpoint; validation must fail
        // first, so no socket is ever opened.
        let client = ResearchClient::new(SearchConfig::default()).unwrap();
        let err = client.research("ai").await.unwrap_err();
        assert!(matches!(err, ResearchError::InvalidQuery));
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_upstream_status_is_upstream() {
        let err = ResearchError::UpstreamStatus { status: 500 };
        assert!(err.is_upstream());
        assert_eq!(err.to_string(), "search provider returned status 500");
    }
}

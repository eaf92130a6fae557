//! Pure shaping stages: flatten, filter, clean text, assemble the response.

use url::Url;

use crate::types::{FlatTopic, InstantAnswer, RelatedTopic, ResearchItem, ResearchResponse};

/// Summary used when the provider returns no abstract text.
pub const FALLBACK_SUMMARY: &str =
    "Survey of related sources complete. Review the detailed findings below.";

/// Maximum number of insight strings in a response.
pub const MAX_INSIGHTS: usize = 6;

/// Maximum number of source items in a response.
pub const MAX_ITEMS: usize = 10;

/// Expand grouped entries into a single flat sequence, preserving the
/// provider's original order.
pub fn flatten_topics(related: Vec<RelatedTopic>) -> Vec<FlatTopic> {
    let mut flat = Vec::with_capacity(related.len());
    for topic in related {
        match topic {
            RelatedTopic::Group(group) => flat.extend(group.topics),
            RelatedTopic::Flat(entry) => flat.push(entry),
        }
    }
    flat
}

/// Normalize descriptive text: drop `[...]` citation markers, collapse
/// whitespace runs to single spaces, and trim the ends.
///
/// Bracketed spans are removed first; the whitespace pass then collapses any
/// gap their removal leaves behind.
pub fn clean_snippet(text: &str) -> String {
    let stripped = strip_citations(text);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every `[...]` span. An opening bracket without a matching close is
/// kept as-is.
fn strip_citations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('[') {
        match rest[start..].find(']') {
            Some(offset) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + offset + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Title is the cleaned text before the first `" - "` separator; when no
/// separator exists the whole text becomes the title.
pub fn extract_title(text: &str) -> String {
    let head = match text.split_once(" - ") {
        Some((head, _)) => head,
        None => text,
    };
    clean_snippet(head)
}

/// Hostname of `raw` with a leading `www.` stripped.
fn source_host(raw: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw)?;
    let host = parsed.host_str().unwrap_or_default();
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Build an item from a usable topic. Fails when the topic URL does not
/// parse; callers skip such topics rather than aborting the batch.
fn build_item(topic: &FlatTopic) -> Result<ResearchItem, url::ParseError> {
    Ok(ResearchItem {
        title: extract_title(&topic.text),
        snippet: clean_snippet(&topic.text),
        url: topic.first_url.clone(),
        source: source_host(&topic.first_url)?,
    })
}

fn build_insights(candidates: &[FlatTopic]) -> Vec<String> {
    candidates
        .iter()
        .take(MAX_INSIGHTS)
        .map(|topic| clean_snippet(&topic.text))
        .filter(|insight| !insight.is_empty())
        .collect()
}

fn build_items(candidates: &[FlatTopic]) -> Vec<ResearchItem> {
    candidates
        .iter()
        .take(MAX_ITEMS)
        .filter_map(|topic| match build_item(topic) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::warn!(url = %topic.first_url, %error, "skipping topic with unparsable URL");
                None
            }
        })
        .collect()
}

/// Assemble the response for one query from a raw provider payload.
pub fn shape_payload(payload: InstantAnswer, query: &str) -> ResearchResponse {
    let candidates: Vec<FlatTopic> = flatten_topics(payload.related_topics)
        .into_iter()
        .filter(FlatTopic::is_usable)
        .collect();

    let cleaned_abstract = clean_snippet(&payload.abstract_text);
    let summary = if cleaned_abstract.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        cleaned_abstract
    };

    ResearchResponse {
        summary,
        insights: build_insights(&candidates),
        items: build_items(&candidates),
        query: query.to_string(),
    }
}

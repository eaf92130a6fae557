//! Types for the Instant Answer provider and the shaped research payload.

use serde::{Deserialize, Serialize};

/// Raw Instant Answer payload as returned by the provider.
///
/// Only the fields the pipeline consumes are modeled; everything else in the
/// provider payload is ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    pub abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    pub related_topics: Vec<RelatedTopic>,
}

/// A related-topic entry: either a direct topic or a named group of topics.
///
/// The `Group` variant must be tried first: a group object also carries no
/// `Text`/`FirstURL` keys and would otherwise fall through to an empty `Flat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelatedTopic {
    Group(TopicGroup),
    Flat(FlatTopic),
}

/// A named group wrapping a list of direct topics.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicGroup {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Topics")]
    pub topics: Vec<FlatTopic>,
}

/// A single candidate source entry from the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatTopic {
    #[serde(rename = "Text", default)]
    pub text: String,
    #[serde(rename = "FirstURL", default)]
    pub first_url: String,
}

impl FlatTopic {
    /// Whether this topic carries both descriptive text and a URL.
    pub fn is_usable(&self) -> bool {
        !self.text.is_empty() && !self.first_url.is_empty()
    }
}

/// A single shaped source item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchItem {
    pub title: String,
    pub snippet: String,
    pub url: String,
    /// URL hostname with a leading `www.` stripped.
    pub source: String,
}

/// The shaped response returned for one research query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub summary: String,
    pub insights: Vec<String>,
    pub items: Vec<ResearchItem>,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_variants_decode() {
        let payload = serde_json::json!([
            { "Text": "Rust - a language", "FirstURL": "https://www.rust-lang.org/" },
            {
                "Name": "Tools",
                "Topics": [
                    { "Text": "Cargo - build tool", "FirstURL": "https://doc.rust-lang.org/cargo/" }
                ]
            }
        ]);

        let topics: Vec<RelatedTopic> = serde_json::from_value(payload).unwrap();
        assert!(matches!(topics[0], RelatedTopic::Flat(_)));
        assert!(matches!(topics[1], RelatedTopic::Group(_)));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let payload = serde_json::json!({
            "AbstractText": "Some abstract",
            "Heading": "Some heading",
            "RelatedTopics": [
                {
                    "Text": "Entry",
                    "FirstURL": "https://example.com/",
                    "Icon": { "URL": "/i.png" },
                    "Result": "<a href=\"https://example.com/\">Entry</a>"
                }
            ]
        });

        let answer: InstantAnswer = serde_json::from_value(payload).unwrap();
        assert_eq!(answer.abstract_text, "Some abstract");
        assert_eq!(answer.related_topics.len(), 1);
    }

    #[test]
    fn test_missing_related_topics_defaults_empty() {
        let answer: InstantAnswer =
            serde_json::from_value(serde_json::json!({ "AbstractText": "" })).unwrap();
        assert!(answer.related_topics.is_empty());
    }

    #[test]
    fn test_usable_requires_text_and_url() {
        let both = FlatTopic {
            text: "t".into(),
            first_url: "https://example.com/".into(),
        };
        let no_url = FlatTopic {
            text: "t".into(),
            first_url: String::new(),
        };
        let no_text = FlatTopic {
            text: String::new(),
            first_url: "https://example.com/".into(),
        };
        assert!(both.is_usable());
        assert!(!no_url.is_usable());
        assert!(!no_text.is_usable());
    }
}

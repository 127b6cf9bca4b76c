//! Types for structured summarization results.

use serde::{Deserialize, Serialize};

/// Structured summary distilled from translated meeting notes.
///
/// `participants` and `decisions` are optional: many notes name neither, and
/// providers omit the fields rather than emitting empty lists. The whole
/// object is persisted as one JSON value on the cached translation and
/// re-parsed at export time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredSummary {
    /// One-paragraph overview of the meeting
    pub summary: String,

    /// Concrete tasks someone committed to
    #[serde(default)]
    pub action_items: Vec<String>,

    /// Important points discussed
    #[serde(default)]
    pub key_points: Vec<String>,

    /// People mentioned as attending, when identifiable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    /// Decisions that were made, when identifiable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decisions: Option<Vec<String>>,
}

impl StructuredSummary {
    /// Fallback used when a provider's structured response cannot be parsed:
    /// the raw text stands in as the summary and every list stays empty.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            summary: text.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_fields_absent() {
        let summary: StructuredSummary = serde_json::from_str(
            r#"{"summary": "Quarterly sync.", "action_items": ["Ship importer"], "key_points": ["Budget holds"]}"#,
        )
        .unwrap();

        assert_eq!(summary.summary, "Quarterly sync.");
        assert_eq!(summary.action_items, vec!["Ship importer"]);
        assert!(summary.participants.is_none());
        assert!(summary.decisions.is_none());
    }

    #[test]
    fn deserializes_with_all_fields_present() {
        let summary: StructuredSummary = serde_json::from_str(
            r#"{
                "summary": "Launch review.",
                "action_items": ["Write postmortem"],
                "key_points": ["Traffic doubled"],
                "participants": ["Ana", "Bert"],
                "decisions": ["Keep the feature flag on"]
            }"#,
        )
        .unwrap();

        assert_eq!(summary.participants.unwrap(), vec!["Ana", "Bert"]);
        assert_eq!(summary.decisions.unwrap(), vec!["Keep the feature flag on"]);
    }

    #[test]
    fn absent_optional_fields_are_not_serialized() {
        let summary = StructuredSummary::from_raw_text("unparsed model output");
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["summary"], "unparsed model output");
        assert!(value.get("participants").is_none());
        assert!(value.get("decisions").is_none());
    }

    #[test]
    fn from_raw_text_leaves_lists_empty() {
        let summary = StructuredSummary::from_raw_text("plain text");

        assert!(summary.action_items.is_empty());
        assert!(summary.key_points.is_empty());
    }
}

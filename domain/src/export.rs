//! Export workflow: renders a cached translation into a fixed-section
//! document.
//!
//! Export is read-only over already-cached data; it never triggers a
//! translation. The heading text and section order are a compatibility
//! surface consumed by downstream tooling and must not drift.

use crate::error::Error;
use crate::meeting;
use crate::Id;
use chrono::{DateTime, Utc};
use entity::{meetings, translations};
use entity_api::translation;
use log::*;
use notes_ai::StructuredSummary;
use sea_orm::DatabaseConnection;

/// Loads the meeting and its cached translation for the pair and renders
/// the export document. Fails when either is absent.
pub async fn export(
    db: &DatabaseConnection,
    meeting_id: Id,
    target_language: &str,
) -> Result<String, Error> {
    let meeting = meeting::find_by_id(db, meeting_id).await?;
    let translation = translation::find_by_meeting_and_language(db, meeting_id, target_language)
        .await?
        .ok_or_else(|| Error::not_found("Translation"))?;

    debug!("Exporting meeting {meeting_id} translation into {target_language}");

    render(&meeting, &translation, Utc::now())
}

/// Renders the export document. Section order: title block, Overview,
/// Participants, Action Items, Key Points, Decisions Made, Original
/// Content, Translated Content. Optional sections are omitted when empty.
pub fn render(
    meeting: &meetings::Model,
    translation: &translations::Model,
    generated_at: DateTime<Utc>,
) -> Result<String, Error> {
    let summary: StructuredSummary =
        serde_json::from_value(translation.structured_summary.clone()).map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: crate::error::DomainErrorKind::Internal(
                crate::error::InternalErrorKind::Other(
                    "Stored structured summary is unreadable".to_string(),
                ),
            ),
        })?;

    let source_language = meeting.detected_language.as_deref().unwrap_or("Unknown");

    let mut doc = String::new();
    doc.push_str("# Meeting Summary\n\n");
    doc.push_str(&format!(
        "**Language:** {} → {}\n",
        source_language, translation.target_language
    ));
    doc.push_str(&format!(
        "**Generated:** {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    doc.push_str("## Overview\n\n");
    doc.push_str(&summary.summary);
    doc.push_str("\n\n");

    if let Some(participants) = summary
        .participants
        .as_ref()
        .filter(|participants| !participants.is_empty())
    {
        doc.push_str("## Participants\n\n");
        for participant in participants {
            doc.push_str(&format!("- {participant}\n"));
        }
        doc.push('\n');
    }

    if !summary.action_items.is_empty() {
        doc.push_str("## Action Items\n\n");
        for (index, item) in summary.action_items.iter().enumerate() {
            doc.push_str(&format!("{}. {item}\n", index + 1));
        }
        doc.push('\n');
    }

    if !summary.key_points.is_empty() {
        doc.push_str("## Key Points\n\n");
        for point in &summary.key_points {
            doc.push_str(&format!("- {point}\n"));
        }
        doc.push('\n');
    }

    if let Some(decisions) = summary
        .decisions
        .as_ref()
        .filter(|decisions| !decisions.is_empty())
    {
        doc.push_str("## Decisions Made\n\n");
        for decision in decisions {
            doc.push_str(&format!("- {decision}\n"));
        }
        doc.push('\n');
    }

    doc.push_str("## Original Content\n\n```\n");
    doc.push_str(&meeting.original_content);
    doc.push_str("\n```\n\n");

    doc.push_str("## Translated Content\n\n```\n");
    doc.push_str(&translation.translated_content);
    doc.push_str("\n```\n");

    Ok(doc)
}

use domain::translations;
use serde::Serialize;
use utoipa::ToSchema;

/// A cached translation as the API presents it. The stored artifact holds
/// one structured summary value; the `summary` string here is a projection
/// of its overview field, and `action_items` is the full structured payload
/// for clients that render the itemized sections.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TranslationView {
    pub(crate) id: domain::Id,
    pub(crate) meeting_id: domain::Id,
    pub(crate) target_language: String,
    pub(crate) translated_content: String,
    pub(crate) summary: String,
    #[schema(value_type = Object)]
    pub(crate) action_items: serde_json::Value,
}

impl From<translations::Model> for TranslationView {
    fn from(model: translations::Model) -> Self {
        let summary = model
            .structured_summary
            .get("summary")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string();

        Self {
            id: model.id,
            meeting_id: model.meeting_id,
            target_language: model.target_language,
            translated_content: model.translated_content,
            summary,
            action_items: model.structured_summary,
        }
    }
}

/// The rendered export document.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ExportedDocument {
    pub(crate) content: String,
}

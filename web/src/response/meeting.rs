use domain::meetings;
use serde::Serialize;
use utoipa::ToSchema;

/// Response for a text submission: the new meeting's id and what language
/// detection made of its content.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedMeeting {
    pub(crate) id: domain::Id,
    pub(crate) detected_language: Option<String>,
}

impl From<meetings::Model> for CreatedMeeting {
    fn from(model: meetings::Model) -> Self {
        Self {
            id: model.id,
            detected_language: model.detected_language,
        }
    }
}

/// Response for an image submission; includes the OCR output so the
/// front-end can show what was read off the photo.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedImageMeeting {
    pub(crate) id: domain::Id,
    pub(crate) detected_language: Option<String>,
    pub(crate) extracted_text: String,
    pub(crate) image_url: Option<String>,
}

impl From<meetings::Model> for CreatedImageMeeting {
    fn from(model: meetings::Model) -> Self {
        Self {
            id: model.id,
            detected_language: model.detected_language,
            extracted_text: model.original_content,
            image_url: model.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct Deleted {
    pub(crate) success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting_model() -> meetings::Model {
        let now = chrono::Utc::now();
        meetings::Model {
            id: 3,
            user_id: 7,
            title: "Notes".to_string(),
            original_content: "Budget meeting notes".to_string(),
            detected_language: Some("en".to_string()),
            image_url: Some("https://cdn.example.com/meeting-images/7/photo.png".to_string()),
            image_storage_key: Some("7/photo.png".to_string()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn image_response_carries_the_ocr_text_as_extracted_text() {
        let response = CreatedImageMeeting::from(meeting_model());

        assert_eq!(response.extracted_text, "Budget meeting notes");
        assert_eq!(
            response.image_url.as_deref(),
            Some("https://cdn.example.com/meeting-images/7/photo.png")
        );
    }
}

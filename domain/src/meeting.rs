//! Meeting workflow: creating meetings from typed text or photographed
//! notes, and the list/get/delete operations over them.

use crate::error::Error;
use crate::gateway::blob_store::BlobStoreClient;
use crate::Id;
use entity::meetings::Model;
use entity_api::meeting;
use log::*;
use notes_ai::traits::language::Provider as _;
use notes_ai::traits::vision::Provider as _;
use notes_ai::traits::{language, vision};
use sea_orm::DatabaseConnection;

/// Hard ceiling for uploaded note photos. A payload of exactly this many
/// bytes is accepted; one more is rejected before any remote call.
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

/// MIME types accepted for note photos, with the file extension the blob
/// store key uses for each.
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, ext)| *ext)
}

/// Creates a meeting from typed notes. Language detection runs before the
/// row is written; a detection failure stores the meeting without a
/// detected language rather than failing the submission.
pub async fn create_from_text(
    db: &DatabaseConnection,
    language_provider: &dyn language::Provider,
    user_id: Id,
    title: &str,
    content: &str,
) -> Result<Model, Error> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() {
        return Err(Error::validation("Title must not be empty"));
    }
    if content.is_empty() {
        return Err(Error::validation("Content must not be empty"));
    }

    let detected_language = match language_provider.detect_language(content).await {
        Ok(code) => Some(code),
        Err(err) => {
            warn!("Language detection failed; storing meeting without a detected language: {err}");
            None
        }
    };

    let now = chrono::Utc::now();
    let meeting = meeting::create(
        db,
        Model {
            id: 0, // assigned by the store
            user_id,
            title: title.to_string(),
            original_content: content.to_string(),
            detected_language,
            image_url: None,
            image_storage_key: None,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    info!(
        "Created meeting {} (detected language: {:?})",
        meeting.id, meeting.detected_language
    );

    Ok(meeting)
}

/// Creates a meeting from a photographed page of notes: validate, store the
/// image, OCR it, and persist the extracted text as the meeting content.
///
/// Validation is fail-fast; no blob store or OCR call is made for an
/// oversized or unsupported payload. An image from which no text can be
/// extracted is a terminal user-input error and leaves no meeting behind.
pub async fn create_from_image(
    db: &DatabaseConnection,
    ocr_provider: &dyn vision::Provider,
    blob_store: &BlobStoreClient,
    user_id: Id,
    title: &str,
    image_data: &str,
    mime_type: &str,
    file_size: u64,
) -> Result<Model, Error> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::validation("Title must not be empty"));
    }
    if file_size > MAX_IMAGE_BYTES {
        return Err(Error::validation("Image exceeds the 16 MiB size limit"));
    }
    let extension = extension_for_mime(mime_type).ok_or_else(|| {
        Error::validation("Unsupported image type; use JPEG, PNG, WebP or GIF")
    })?;

    use base64::{engine::general_purpose::STANDARD, Engine as _};
    let bytes = STANDARD
        .decode(image_data)
        .map_err(|_| Error::validation("Image data is not valid base64"))?;
    if bytes.is_empty() {
        return Err(Error::validation("Image data must not be empty"));
    }
    if bytes.len() as u64 > MAX_IMAGE_BYTES {
        return Err(Error::validation("Image exceeds the 16 MiB size limit"));
    }

    // One globally-unique token per upload; collisions are not handled
    // beyond this.
    let key = format!("{user_id}/{}.{extension}", uuid::Uuid::new_v4());
    let stored = blob_store.put(&key, bytes, mime_type).await?;

    let extraction = ocr_provider.extract_text_and_language(&stored.url).await?;
    let extracted_text = extraction.extracted_text.trim().to_string();
    if extracted_text.is_empty() {
        return Err(Error::validation(
            "No text could be extracted from the image",
        ));
    }

    let now = chrono::Utc::now();
    let meeting = meeting::create(
        db,
        Model {
            id: 0,
            user_id,
            title: title.to_string(),
            original_content: extracted_text,
            detected_language: extraction.detected_language,
            image_url: Some(stored.url),
            image_storage_key: Some(stored.key),
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    info!(
        "Created meeting {} from image (detected language: {:?})",
        meeting.id, meeting.detected_language
    );

    Ok(meeting)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    meeting::find_by_id(db, id).await.map_err(|err| {
        if err.error_kind == entity_api::error::EntityApiErrorKind::RecordNotFound {
            Error::not_found("Meeting")
        } else {
            err.into()
        }
    })
}

/// All meetings owned by the caller, newest first. When the store is
/// unreachable this read degrades to an empty list; writes never degrade.
pub async fn list_by_user(db: &DatabaseConnection, user_id: Id) -> Result<Vec<Model>, Error> {
    match meeting::find_by_user(db, user_id).await {
        Ok(meetings) => Ok(meetings),
        Err(err) if err.is_system_error() => {
            warn!("Meeting store unavailable; degrading list to empty: {err}");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Deletes a meeting. The store's cascade removes every cached translation
/// owned by it.
pub async fn delete(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    // Surface a not-found before issuing the delete so the caller can tell
    // "gone" from "never existed".
    find_by_id(db, id).await?;
    meeting::delete(db, id).await?;
    info!("Deleted meeting {id} and its cached translations");
    Ok(())
}

//! Translation workflow: the cache-critical path.
//!
//! A translation for a (meeting, target language) pair is computed at most
//! once. Repeated requests for the same pair are served from the store with
//! zero remote calls; that is the central cost contract of the system.

use crate::error::Error;
use crate::meeting;
use crate::Id;
use entity::translations::Model;
use entity_api::translation;
use log::*;
use notes_ai::traits::language::Provider as _;
use notes_ai::traits::summarization::Provider as _;
use notes_ai::traits::{language, summarization};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-(meeting, target language) async mutexes. Concurrent translate calls
/// that miss the cache for the same pair serialize here, so exactly one of
/// them performs the remote calls and the write; the rest observe a cache
/// hit once they acquire the lock. Owned by the application state and
/// injected into the workflow.
#[derive(Default)]
pub struct TranslationLocks {
    locks: Mutex<HashMap<(Id, String), Arc<Mutex<()>>>>,
}

impl TranslationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn acquire(&self, meeting_id: Id, target_language: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.locks.lock().await;
            map.entry((meeting_id, target_language.to_string()))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        slot.lock_owned().await
    }
}

/// Returns the cached translation for the pair, or computes and caches it.
///
/// On a cache miss: load the meeting, translate its original content with
/// the detected language as a source hint, summarize the *translated* text,
/// and write through. The original content is never mutated. The write goes
/// through the store's insert-if-absent primitive, so even racing writers
/// that slipped past the keyed lock (e.g. separate processes) cannot
/// produce a second row for the pair.
pub async fn translate(
    db: &DatabaseConnection,
    language_provider: &dyn language::Provider,
    summarizer: &dyn summarization::Provider,
    locks: &TranslationLocks,
    meeting_id: Id,
    target_language: &str,
) -> Result<Model, Error> {
    let target_language = target_language.trim();
    if target_language.is_empty() {
        return Err(Error::validation("Target language must not be empty"));
    }

    let _guard = locks.acquire(meeting_id, target_language).await;

    if let Some(existing) =
        translation::find_by_meeting_and_language(db, meeting_id, target_language).await?
    {
        debug!("Cache hit for meeting {meeting_id} into {target_language}; no remote calls");
        return Ok(existing);
    }

    let meeting = meeting::find_by_id(db, meeting_id).await?;

    info!(
        "Cache miss for meeting {meeting_id} into {target_language}; calling {} provider",
        language_provider.provider_id()
    );

    let translated_content = language_provider
        .translate(
            &meeting.original_content,
            target_language,
            meeting.detected_language.as_deref(),
        )
        .await?;

    // The summary is computed over the target-language text, not the source.
    let structured = summarizer.summarize(&translated_content).await?;
    let structured_summary = serde_json::to_value(&structured).map_err(|err| Error {
        source: Some(Box::new(err)),
        error_kind: crate::error::DomainErrorKind::Internal(
            crate::error::InternalErrorKind::Other("Failed to serialize summary".to_string()),
        ),
    })?;

    let now = chrono::Utc::now();
    let translation = translation::create_if_absent(
        db,
        Model {
            id: 0, // assigned by the store
            meeting_id,
            target_language: target_language.to_string(),
            translated_content,
            structured_summary,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    Ok(translation)
}

/// Cache lookup only; never triggers computation. When the store is
/// unreachable this read degrades to absent rather than failing.
pub async fn find_cached(
    db: &DatabaseConnection,
    meeting_id: Id,
    target_language: &str,
) -> Result<Option<Model>, Error> {
    match translation::find_by_meeting_and_language(db, meeting_id, target_language).await {
        Ok(found) => Ok(found),
        Err(err) if err.is_system_error() => {
            warn!("Translation store unavailable; degrading lookup to absent: {err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

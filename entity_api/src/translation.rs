//! CRUD operations for the translations table.
//!
//! The (meeting_id, target_language) pair is the cache key for translated
//! artifacts. Insertion goes through `create_if_absent` so that two racing
//! writers can never produce a second row for the same pair: the insert is
//! ON CONFLICT DO NOTHING against the pair's unique index, followed by a
//! re-read of whichever row won.

use super::error::{EntityApiErrorKind, Error};
use entity::translations::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::prelude::*, DbErr, Set};

/// Cache lookup for one (meeting, target language) pair.
pub async fn find_by_meeting_and_language(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    target_language: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingId.eq(meeting_id))
        .filter(Column::TargetLanguage.eq(target_language))
        .one(db)
        .await?)
}

/// Inserts a new translation unless one already exists for the pair, and
/// returns the row that is in the store afterwards. A lost insert race is
/// not an error: the existing row is read back and returned unchanged.
pub async fn create_if_absent(
    db: &impl ConnectionTrait,
    translation_model: Model,
) -> Result<Model, Error> {
    debug!(
        "New Translation to be inserted for meeting {} into {}",
        translation_model.meeting_id, translation_model.target_language
    );

    let meeting_id = translation_model.meeting_id;
    let target_language = translation_model.target_language.clone();

    let now = chrono::Utc::now();

    let translation_active_model: ActiveModel = ActiveModel {
        meeting_id: Set(translation_model.meeting_id),
        target_language: Set(translation_model.target_language),
        translated_content: Set(translation_model.translated_content),
        structured_summary: Set(translation_model.structured_summary),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    let insert_result = Entity::insert(translation_active_model)
        .on_conflict(
            OnConflict::columns([Column::MeetingId, Column::TargetLanguage])
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match insert_result {
        Ok(_) => {}
        // The pair already exists; fall through to read the winning row.
        Err(DbErr::RecordNotInserted) => {
            debug!(
                "Translation for meeting {meeting_id} into {target_language} already cached; \
                 returning existing row"
            );
        }
        Err(err) => return Err(err.into()),
    }

    find_by_meeting_and_language(db, meeting_id, &target_language)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    fn translation_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            meeting_id: 3,
            target_language: "Spanish".to_string(),
            translated_content: "Hola, este es un mensaje de prueba.".to_string(),
            structured_summary: serde_json::json!({
                "summary": "A short test message.",
                "action_items": [],
                "key_points": []
            }),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_meeting_and_language_filters_on_the_cache_key() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let _ = find_by_meeting_and_language(&db, 3, "Spanish").await;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "translations"."id", "translations"."meeting_id", "translations"."target_language", "translations"."translated_content", "translations"."structured_summary", "translations"."created_at", "translations"."updated_at" FROM "polyglot_minutes"."translations" WHERE "translations"."meeting_id" = $1 AND "translations"."target_language" = $2 LIMIT $3"#,
                [
                    sea_orm::Value::BigInt(Some(3)),
                    sea_orm::Value::String(Some(Box::new("Spanish".to_string()))),
                    sea_orm::Value::BigUnsigned(Some(1))
                ]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_if_absent_inserts_and_returns_the_row() -> Result<(), Error> {
        let translation_model = translation_model();

        // First result set answers the INSERT .. RETURNING, the second the
        // follow-up read of the stored row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![
                vec![translation_model.clone()],
                vec![translation_model.clone()],
            ])
            .into_connection();

        let translation = create_if_absent(&db, translation_model.clone()).await?;

        assert_eq!(translation.id, translation_model.id);
        assert_eq!(translation.target_language, "Spanish");

        Ok(())
    }

    #[tokio::test]
    async fn create_if_absent_returns_existing_row_when_pair_already_cached() -> Result<(), Error> {
        let existing = translation_model();

        // An empty INSERT .. RETURNING result set models ON CONFLICT DO
        // NOTHING hitting the existing pair; the follow-up read returns the
        // cached row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new(), vec![existing.clone()]])
            .into_connection();

        let mut second_attempt = existing.clone();
        second_attempt.translated_content = "a different rendering".to_string();

        let translation = create_if_absent(&db, second_attempt).await?;

        // The cached row wins; the racing payload is discarded.
        assert_eq!(translation.translated_content, existing.translated_content);

        Ok(())
    }
}

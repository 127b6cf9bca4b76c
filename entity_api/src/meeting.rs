//! CRUD operations for the meetings table.

use super::error::{EntityApiErrorKind, Error};
use entity::meetings::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, QueryOrder, Set, TryIntoModel};

pub async fn create(db: &impl ConnectionTrait, meeting_model: Model) -> Result<Model, Error> {
    debug!("New Meeting Model to be inserted: {meeting_model:?}");

    let now = chrono::Utc::now();

    let meeting_active_model: ActiveModel = ActiveModel {
        user_id: Set(meeting_model.user_id),
        title: Set(meeting_model.title),
        original_content: Set(meeting_model.original_content),
        detected_language: Set(meeting_model.detected_language),
        image_url: Set(meeting_model.image_url),
        image_storage_key: Set(meeting_model.image_storage_key),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(meeting_active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// All meetings owned by the user, most recently created first.
pub async fn find_by_user(db: &impl ConnectionTrait, user_id: Id) -> Result<Vec<Model>, Error> {
    let meetings = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;

    Ok(meetings)
}

pub async fn delete(db: &impl ConnectionTrait, meeting_id: Id) -> Result<(), Error> {
    Entity::delete_by_id(meeting_id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    fn meeting_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            user_id: 7,
            title: "Sprint planning".to_string(),
            original_content: "We agreed to ship the importer next week.".to_string(),
            detected_language: Some("en".to_string()),
            image_url: None,
            image_storage_key: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_meeting_model() -> Result<(), Error> {
        let meeting_model = meeting_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![meeting_model.clone()]])
            .into_connection();

        let meeting = create(&db, meeting_model.clone()).await?;

        assert_eq!(meeting.id, meeting_model.id);
        assert_eq!(meeting.original_content, meeting_model.original_content);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_a_single_record() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let meeting_id: Id = 3;
        let _ = find_by_id(&db, meeting_id).await;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "meetings"."id", "meetings"."user_id", "meetings"."title", "meetings"."original_content", "meetings"."detected_language", "meetings"."image_url", "meetings"."image_storage_key", "meetings"."created_at", "meetings"."updated_at" FROM "polyglot_minutes"."meetings" WHERE "meetings"."id" = $1 LIMIT $2"#,
                [
                    sea_orm::Value::BigInt(Some(meeting_id)),
                    sea_orm::Value::BigUnsigned(Some(1))
                ]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_record_not_found_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = find_by_id(&db, 99).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_by_user_orders_newest_first() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let user_id: Id = 7;
        let _ = find_by_user(&db, user_id).await;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "meetings"."id", "meetings"."user_id", "meetings"."title", "meetings"."original_content", "meetings"."detected_language", "meetings"."image_url", "meetings"."image_storage_key", "meetings"."created_at", "meetings"."updated_at" FROM "polyglot_minutes"."meetings" WHERE "meetings"."user_id" = $1 ORDER BY "meetings"."created_at" DESC"#,
                [sea_orm::Value::BigInt(Some(user_id))]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_deletes_a_single_record() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let meeting_id: Id = 3;
        let _ = delete(&db, meeting_id).await;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "polyglot_minutes"."meetings" WHERE "meetings"."id" = $1"#,
                [sea_orm::Value::BigInt(Some(meeting_id))]
            )]
        );

        Ok(())
    }
}

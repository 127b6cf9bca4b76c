//! CRUD operations for the users table.

use super::error::Error;
use entity::users::{ActiveModel, Column, Entity, Model};
use log::*;
use sea_orm::{entity::prelude::*, Set, TryIntoModel};

/// Resolves the identity asserted by the upstream OAuth proxy to a local
/// user row, creating one on first sight.
pub async fn find_or_create_by_external_id(
    db: &impl ConnectionTrait,
    external_id: &str,
    display_name: Option<String>,
) -> Result<Model, Error> {
    if let Some(user) = Entity::find()
        .filter(Column::ExternalId.eq(external_id))
        .one(db)
        .await?
    {
        return Ok(user);
    }

    debug!("First request from identity {external_id}; creating user row");

    let now = chrono::Utc::now();

    let user_active_model: ActiveModel = ActiveModel {
        external_id: Set(external_id.to_string()),
        display_name: Set(display_name),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(user_active_model.save(db).await?.try_into_model()?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 7,
            external_id: "auth0|abc123".to_string(),
            display_name: Some("Ada".to_string()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_or_create_returns_existing_user_without_insert() -> Result<(), Error> {
        let existing = user_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing.clone()]])
            .into_connection();

        let user = find_or_create_by_external_id(&db, "auth0|abc123", None).await?;

        assert_eq!(user.id, existing.id);

        // Only the lookup ran; no INSERT was issued.
        assert_eq!(db.into_transaction_log().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn find_or_create_inserts_on_first_sight() -> Result<(), Error> {
        let created = user_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new(), vec![created.clone()]])
            .into_connection();

        let user =
            find_or_create_by_external_id(&db, "auth0|abc123", Some("Ada".to_string())).await?;

        assert_eq!(user.external_id, created.external_id);

        Ok(())
    }
}

//! User resolution at the authenticated boundary.
//!
//! Authentication itself lives with the external OAuth identity provider;
//! by the time a request reaches this layer an upstream proxy has already
//! asserted who the caller is. This module only anchors that identity to a
//! local row so meetings have an owner.

use crate::error::Error;
use entity::users::Model;
use sea_orm::DatabaseConnection;

pub async fn find_or_create(
    db: &DatabaseConnection,
    external_id: &str,
    display_name: Option<String>,
) -> Result<Model, Error> {
    Ok(entity_api::user::find_or_create_by_external_id(db, external_id, display_name).await?)
}

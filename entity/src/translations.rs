//! SeaORM Entity for the translations table.
//! A translation is the cached derived artifact for one
//! (meeting, target language) pair: translated text plus structured summary.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::translations::Model)]
#[sea_orm(schema_name = "polyglot_minutes", table_name = "translations")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    pub meeting_id: Id,

    /// Target language label as requested by the caller (e.g. "Spanish").
    /// Together with meeting_id this is the cache key; at most one row
    /// exists per pair.
    pub target_language: String,

    #[sea_orm(column_type = "Text")]
    pub translated_content: String,

    /// The structured summary as one typed JSON value:
    /// {summary, action_items, key_points, participants?, decisions?}
    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Object)]
    pub structured_summary: Json,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meetings::Entity",
        from = "Column::MeetingId",
        to = "super::meetings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Meetings,
}

impl Related<super::meetings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meetings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

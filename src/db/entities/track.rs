use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub artist: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub duration: String,
    #[sea_orm(column_type = "Text")]
    pub file_url: String,
    #[sea_orm(column_type = "Text")]
    pub file_name: String,
    pub file_size: i32,
    pub created_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The columns the listing reads; file name and size stay in storage.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct TrackSummary {
    pub id: i32,
    pub title: String,
    pub artist: Option<String>,
    pub duration: String,
    pub file_url: String,
    pub created_at: Option<DateTime>,
}

impl From<Model> for TrackSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            artist: model.artist,
            duration: model.duration,
            file_url: model.file_url,
            created_at: model.created_at,
        }
    }
}

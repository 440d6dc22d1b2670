use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_releases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub site_code: String,
    pub title: String,
    pub version: String,
    /// 0=PREVIEW, 1=FREEZE, 2=LIVE, 3=ARCHIVED (spec §4.2).
    pub status: i32,
    pub is_live: bool,
    pub publish_datetime: Option<DateTimeWithTimeZone>,
    pub base_release: Option<Uuid>,
    pub use_current_live_as_base_release: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::release_document::Entity")]
    Documents,
    #[sea_orm(has_many = "super::release_parameter::Entity")]
    Parameters,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BaseRelease",
        to = "Column::Id"
    )]
    BaseRelease,
}

impl Related<super::release_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::release_parameter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parameters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

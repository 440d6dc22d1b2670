use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A key/value parameter attached to a single release document (spec §3).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_parameters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub release_document_id: Uuid,
    pub key: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::release_document::Entity",
        from = "Column::ReleaseDocumentId",
        to = "super::release_document::Column::Id",
        on_delete = "Cascade"
    )]
    ReleaseDocument,
}

impl Related<super::release_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReleaseDocument.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

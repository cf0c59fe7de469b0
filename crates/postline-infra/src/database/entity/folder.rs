//! Folder entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "folders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Folder.
impl From<Model> for postline_core::domain::Folder {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            color: model.color,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from the domain Folder to a SeaORM ActiveModel.
impl From<postline_core::domain::Folder> for ActiveModel {
    fn from(folder: postline_core::domain::Folder) -> Self {
        Self {
            id: Set(folder.id),
            user_id: Set(folder.user_id),
            name: Set(folder.name),
            description: Set(folder.description),
            color: Set(folder.color),
            created_at: Set(folder.created_at.into()),
            updated_at: Set(folder.updated_at.into()),
        }
    }
}

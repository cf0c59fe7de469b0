//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use postline_core::domain::{Platform, PostStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    pub hashtags: Option<String>,
    pub platform: String,
    pub folder_id: Option<Uuid>,
    pub image_prompt: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::folder::Entity",
        from = "Column::FolderId",
        to = "super::folder::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Folder,
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Post.
impl From<Model> for postline_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            caption: model.caption,
            hashtags: model.hashtags,
            platform: Platform::parse(&model.platform),
            folder_id: model.folder_id,
            image_prompt: model.image_prompt,
            image_url: model.image_url,
            status: PostStatus::parse(&model.status).unwrap_or_default(),
            scheduled_at: model.scheduled_at.map(Into::into),
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from the domain Post to a SeaORM ActiveModel.
impl From<postline_core::domain::Post> for ActiveModel {
    fn from(post: postline_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            caption: Set(post.caption),
            hashtags: Set(post.hashtags),
            platform: Set(post.platform.as_str().to_string()),
            folder_id: Set(post.folder_id),
            image_prompt: Set(post.image_prompt),
            image_url: Set(post.image_url),
            status: Set(post.status.as_str().to_string()),
            scheduled_at: Set(post.scheduled_at.map(Into::into)),
            published_at: Set(post.published_at.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

//! PostgreSQL repository implementations.
//!
//! Every query carries the owning user's id in its predicate, so a record
//! belonging to someone else is indistinguishable from a missing one.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use postline_core::domain::{Folder, Post};
use postline_core::error::RepoError;
use postline_core::ports::{
    FolderChanges, FolderRepository, PostChanges, PostFilters, PostRepository,
};

use super::entity::folder::{self, Entity as FolderEntity};
use super::entity::post::{self, Entity as PostEntity};

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.into())
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, RepoError> {
        if posts.is_empty() {
            return Ok(posts);
        }

        let models: Vec<post::ActiveModel> =
            posts.iter().cloned().map(post::ActiveModel::from).collect();
        PostEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(posts)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(post::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        filters: &PostFilters,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt);

        if let Some(folder_id) = filters.folder_id {
            query = query.filter(post::Column::FolderId.eq(folder_id));
        }
        if let Some(status) = filters.status {
            query = query.filter(post::Column::Status.eq(status.as_str()));
        }
        if let Some(platform) = filters.platform {
            query = query.filter(post::Column::Platform.eq(platform.as_str()));
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query
                .filter(Expr::expr(Func::lower(Expr::col(post::Column::Caption))).like(pattern));
        }
        if let Some(offset) = filters.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = filters.limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await.map_err(query_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .filter(post::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(caption) = changes.caption {
            active.caption = Set(caption);
        }
        if let Some(hashtags) = changes.hashtags {
            active.hashtags = Set(Some(hashtags));
        }
        if let Some(platform) = changes.platform {
            active.platform = Set(platform.as_str().to_string());
        }
        if let Some(folder_id) = changes.folder_id {
            active.folder_id = Set(folder_id);
        }
        if let Some(image_prompt) = changes.image_prompt {
            active.image_prompt = Set(Some(image_prompt));
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            active.scheduled_at = Set(scheduled_at.map(Into::into));
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(query_err)?;
        Ok(model.into())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// PostgreSQL folder repository.
pub struct PostgresFolderRepository {
    db: DbConn,
}

impl PostgresFolderRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FolderRepository for PostgresFolderRepository {
    async fn insert(&self, folder: Folder) -> Result<Folder, RepoError> {
        let model = folder::ActiveModel::from(folder)
            .insert(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                // The (user_id, lower(name)) unique index backs up the
                // service-level uniqueness check under concurrent creates.
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    RepoError::Constraint("A folder with this name already exists".to_string())
                } else {
                    RepoError::Query(err_str)
                }
            })?;
        Ok(model.into())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>, RepoError> {
        let result = FolderEntity::find_by_id(id)
            .filter(folder::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Folder>, RepoError> {
        let rows = FolderEntity::find()
            .filter(folder::Column::UserId.eq(user_id))
            .order_by_desc(folder::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: FolderChanges,
    ) -> Result<Folder, RepoError> {
        let model = FolderEntity::find_by_id(id)
            .filter(folder::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(color) = changes.color {
            active.color = Set(color);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(query_err)?;
        Ok(model.into())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = FolderEntity::delete_many()
            .filter(folder::Column::Id.eq(id))
            .filter(folder::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

//! Folder service - CRUD with per-user name uniqueness and deletion that
//! preserves the folder's posts.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Folder, Post};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    Cache, FolderChanges, FolderRepository, PostChanges, PostFilters, PostRepository,
};

use super::post_list_key;

/// A folder together with its current posts. Convenience aggregate, not a
/// stored relation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderWithPosts {
    #[serde(flatten)]
    pub folder: Folder,
    pub posts: Vec<Post>,
}

/// Folder service. Every operation is scoped to the calling user.
pub struct FolderService {
    folders: Arc<dyn FolderRepository>,
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn Cache>,
}

impl FolderService {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        posts: Arc<dyn PostRepository>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            folders,
            posts,
            cache,
        }
    }

    /// Create a folder. The name must be unique among the caller's folders,
    /// compared case-insensitively.
    pub async fn create_folder(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
        color: Option<String>,
    ) -> Result<Folder, DomainError> {
        self.ensure_name_free(user_id, &name, None).await?;

        let folder = self
            .folders
            .insert(Folder::new(user_id, name, description, color))
            .await?;

        tracing::info!(%user_id, folder_id = %folder.id, "folder created");
        Ok(folder)
    }

    /// Apply a sparse update. A rename re-checks uniqueness against every
    /// folder but the one being renamed.
    pub async fn update_folder(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: FolderChanges,
    ) -> Result<Folder, DomainError> {
        self.require_folder(user_id, id).await?;

        if let Some(name) = &changes.name {
            self.ensure_name_free(user_id, name, Some(id)).await?;
        }

        let folder = match self.folders.update(user_id, id, changes).await {
            Ok(folder) => folder,
            Err(RepoError::NotFound) => return Err(DomainError::folder_not_found(id)),
            Err(other) => return Err(other.into()),
        };

        tracing::info!(%user_id, folder_id = %id, "folder updated");
        Ok(folder)
    }

    /// Delete a folder. Posts inside it are first reassigned to
    /// `move_to_folder_id` (which must exist and belong to the caller) or
    /// detached when no destination is given; only then is the folder row
    /// removed. The per-post updates are independent statements - a failure
    /// mid-way leaves the folder in place and the operation retryable.
    pub async fn delete_folder(
        &self,
        user_id: Uuid,
        id: Uuid,
        move_to_folder_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        self.require_folder(user_id, id).await?;

        if let Some(dest) = move_to_folder_id {
            if dest == id {
                return Err(DomainError::Validation(
                    "Destination folder cannot be the folder being deleted".to_string(),
                ));
            }
            self.require_folder(user_id, dest).await?;
        }

        let contained = self
            .posts
            .find_for_user(user_id, &PostFilters::in_folder(id))
            .await?;

        for post in &contained {
            match self
                .posts
                .update(user_id, post.id, PostChanges::move_to(move_to_folder_id))
                .await
            {
                Ok(_) => {}
                // Deleted concurrently; nothing left to migrate.
                Err(RepoError::NotFound) => {}
                Err(other) => return Err(other.into()),
            }
        }

        match self.folders.delete(user_id, id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => return Err(DomainError::folder_not_found(id)),
            Err(other) => return Err(other.into()),
        }

        if !contained.is_empty() {
            self.invalidate_post_list(user_id).await;
        }

        tracing::info!(
            %user_id,
            folder_id = %id,
            migrated = contained.len(),
            destination = ?move_to_folder_id,
            "folder deleted"
        );
        Ok(())
    }

    pub async fn get_folder(&self, user_id: Uuid, id: Uuid) -> Result<Folder, DomainError> {
        self.require_folder(user_id, id).await
    }

    /// The caller's folders, newest-created first.
    pub async fn get_folders(&self, user_id: Uuid) -> Result<Vec<Folder>, DomainError> {
        Ok(self.folders.find_for_user(user_id).await?)
    }

    /// Folder plus its current posts; the two lookups run concurrently.
    pub async fn get_folder_with_posts(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<FolderWithPosts, DomainError> {
        let folder_filters = PostFilters::in_folder(id);
        let (folder, posts) = tokio::try_join!(
            self.folders.find_by_id(user_id, id),
            self.posts.find_for_user(user_id, &folder_filters),
        )?;

        let folder = folder.ok_or_else(|| DomainError::folder_not_found(id))?;
        Ok(FolderWithPosts { folder, posts })
    }

    async fn require_folder(&self, user_id: Uuid, id: Uuid) -> Result<Folder, DomainError> {
        self.folders
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::folder_not_found(id))
    }

    async fn ensure_name_free(
        &self,
        user_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let existing = self.folders.find_for_user(user_id).await?;
        let taken = existing.iter().any(|folder| {
            exclude != Some(folder.id) && folder.name.eq_ignore_ascii_case(name)
        });

        if taken {
            return Err(DomainError::Duplicate(
                "A folder with this name already exists".to_string(),
            ));
        }
        Ok(())
    }

    async fn invalidate_post_list(&self, user_id: Uuid) {
        let key = post_list_key(user_id);
        if let Err(err) = self.cache.delete(&key).await {
            tracing::warn!(%user_id, error = %err, "post list cache invalidation failed");
        }
    }
}

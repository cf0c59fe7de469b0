use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Folder, Platform, Post, PostStatus};
use crate::error::RepoError;

/// Filters for querying a user's posts. All fields optional; an entirely
/// empty filter means "the user's whole list".
#[derive(Debug, Clone, Default)]
pub struct PostFilters {
    pub folder_id: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub platform: Option<Platform>,
    /// Case-insensitive substring match on the caption.
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PostFilters {
    /// True when no narrowing is requested. Only this shape may be served
    /// from the cached list snapshot.
    pub fn is_unfiltered(&self) -> bool {
        self.folder_id.is_none()
            && self.status.is_none()
            && self.platform.is_none()
            && self.search.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    pub fn in_folder(folder_id: Uuid) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Default::default()
        }
    }

    pub fn with_status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Sparse update for a post. `None` leaves a field untouched; the nested
/// option on `folder_id` and `scheduled_at` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub caption: Option<String>,
    pub hashtags: Option<String>,
    pub platform: Option<Platform>,
    pub folder_id: Option<Option<Uuid>>,
    pub image_prompt: Option<String>,
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
}

impl PostChanges {
    /// Changes applied by a schedule operation.
    pub fn schedule(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(PostStatus::Scheduled),
            scheduled_at: Some(Some(at)),
            ..Default::default()
        }
    }

    /// Changes applied by an unschedule operation.
    pub fn unschedule() -> Self {
        Self {
            status: Some(PostStatus::Draft),
            scheduled_at: Some(None),
            ..Default::default()
        }
    }

    /// Changes that move a post into a folder (or out of all folders).
    pub fn move_to(folder_id: Option<Uuid>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Default::default()
        }
    }
}

/// Sparse update for a folder.
#[derive(Debug, Clone, Default)]
pub struct FolderChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Post repository. Every operation is scoped to the owning user; a post
/// belonging to someone else behaves exactly like a missing one.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Persist a batch of posts in one call (bulk generation).
    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// The user's posts, newest-created first, narrowed by `filters`.
    async fn find_for_user(
        &self,
        user_id: Uuid,
        filters: &PostFilters,
    ) -> Result<Vec<Post>, RepoError>;

    /// Apply `changes` and refresh `updated_at`. `RepoError::NotFound` when
    /// the post does not exist for this user.
    async fn update(&self, user_id: Uuid, id: Uuid, changes: PostChanges)
    -> Result<Post, RepoError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError>;
}

/// Folder repository, scoped to the owning user like [`PostRepository`].
#[async_trait]
pub trait FolderRepository: Send + Sync {
    async fn insert(&self, folder: Folder) -> Result<Folder, RepoError>;

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>, RepoError>;

    /// The user's folders, newest-created first.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Folder>, RepoError>;

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: FolderChanges,
    ) -> Result<Folder, RepoError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError>;
}

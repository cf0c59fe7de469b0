//! In-memory repositories - used when no database is configured, and by
//! tests that need a live store without PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use postline_core::domain::{Folder, Post};
use postline_core::error::RepoError;
use postline_core::ports::{
    FolderChanges, FolderRepository, PostChanges, PostFilters, PostRepository,
};

/// Map-backed post store. Data is lost on restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filters(post: &Post, filters: &PostFilters) -> bool {
    filters.folder_id.is_none_or(|f| post.folder_id == Some(f))
        && filters.status.is_none_or(|s| post.status == s)
        && filters.platform.is_none_or(|p| post.platform == p)
        && filters.search.as_ref().is_none_or(|needle| {
            post.caption.to_lowercase().contains(&needle.to_lowercase())
        })
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, RepoError> {
        let mut rows = self.rows.write().await;
        for post in &posts {
            rows.insert(post.id, post.clone());
        }
        Ok(posts)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&id)
            .filter(|p| p.user_id == user_id)
            .cloned())
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        filters: &PostFilters,
    ) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        let mut matches: Vec<Post> = rows
            .values()
            .filter(|p| p.user_id == user_id && matches_filters(p, filters))
            .cloned()
            .collect();
        // Newest first; ids break creation-timestamp ties deterministically.
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        if let Some(offset) = filters.offset {
            matches = matches.split_off((offset as usize).min(matches.len()));
        }
        if let Some(limit) = filters.limit {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let post = rows
            .get_mut(&id)
            .filter(|p| p.user_id == user_id)
            .ok_or(RepoError::NotFound)?;

        if let Some(caption) = changes.caption {
            post.caption = caption;
        }
        if let Some(hashtags) = changes.hashtags {
            post.hashtags = Some(hashtags);
        }
        if let Some(platform) = changes.platform {
            post.platform = platform;
        }
        if let Some(folder_id) = changes.folder_id {
            post.folder_id = folder_id;
        }
        if let Some(image_prompt) = changes.image_prompt {
            post.image_prompt = Some(image_prompt);
        }
        if let Some(status) = changes.status {
            post.status = status;
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            post.scheduled_at = scheduled_at;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get(&id) {
            Some(post) if post.user_id == user_id => {
                rows.remove(&id);
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }
}

/// Map-backed folder store mirroring [`InMemoryPostRepository`].
#[derive(Default)]
pub struct InMemoryFolderRepository {
    rows: RwLock<HashMap<Uuid, Folder>>,
}

impl InMemoryFolderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderRepository for InMemoryFolderRepository {
    async fn insert(&self, folder: Folder) -> Result<Folder, RepoError> {
        self.rows.write().await.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&id)
            .filter(|f| f.user_id == user_id)
            .cloned())
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Folder>, RepoError> {
        let rows = self.rows.read().await;
        let mut matches: Vec<Folder> = rows
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matches)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: FolderChanges,
    ) -> Result<Folder, RepoError> {
        let mut rows = self.rows.write().await;
        let folder = rows
            .get_mut(&id)
            .filter(|f| f.user_id == user_id)
            .ok_or(RepoError::NotFound)?;

        if let Some(name) = changes.name {
            folder.name = name;
        }
        if let Some(description) = changes.description {
            folder.description = Some(description);
        }
        if let Some(color) = changes.color {
            folder.color = color;
        }
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get(&id) {
            Some(folder) if folder.user_id == user_id => {
                rows.remove(&id);
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postline_core::domain::{NewPost, PostStatus};

    fn post_for(user: Uuid, caption: &str) -> Post {
        Post::new(
            user,
            NewPost {
                caption: caption.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn ownership_filter_hides_foreign_rows() {
        let repo = InMemoryPostRepository::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let post = repo.insert(post_for(owner, "mine")).await.unwrap();

        assert!(repo.find_by_id(stranger, post.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(stranger, post.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(repo.find_by_id(owner, post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_applies_sparse_changes() {
        let repo = InMemoryPostRepository::new();
        let user = Uuid::new_v4();
        let post = repo.insert(post_for(user, "before")).await.unwrap();

        let updated = repo
            .update(
                user,
                post.id,
                PostChanges {
                    caption: Some("after".to_string()),
                    status: Some(PostStatus::Scheduled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.caption, "after");
        assert_eq!(updated.status, PostStatus::Scheduled);
        assert_eq!(updated.hashtags, post.hashtags);
    }

    #[tokio::test]
    async fn list_filters_compose() {
        let repo = InMemoryPostRepository::new();
        let user = Uuid::new_v4();

        let mut scheduled = post_for(user, "big reveal");
        scheduled.status = PostStatus::Scheduled;
        repo.insert(scheduled).await.unwrap();
        repo.insert(post_for(user, "little teaser")).await.unwrap();

        let filters = PostFilters {
            status: Some(PostStatus::Scheduled),
            search: Some("REVEAL".to_string()),
            ..Default::default()
        };
        let hits = repo.find_for_user(user, &filters).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].caption, "big reveal");
    }
}

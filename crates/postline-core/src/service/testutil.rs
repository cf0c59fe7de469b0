//! In-memory port implementations for service tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Folder, Post};
use crate::error::RepoError;
use crate::ports::{
    Cache, CacheError, ContentGenerator, FolderChanges, FolderRepository, GenerationError,
    PostChanges, PostFilters, PostRepository,
};

/// Vec-backed post store. Insertion order doubles as creation order, so
/// "newest first" is the reversed scan.
#[derive(Default)]
pub struct MemoryPosts {
    rows: RwLock<Vec<Post>>,
}

impl MemoryPosts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.write().await.push(post.clone());
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<Vec<Post>, RepoError> {
        self.rows.write().await.extend(posts.iter().cloned());
        Ok(posts)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|p| p.id == id && p.user_id == user_id)
            .cloned())
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        filters: &PostFilters,
    ) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        let mut matches: Vec<Post> = rows
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .filter(|p| filters.folder_id.is_none_or(|f| p.folder_id == Some(f)))
            .filter(|p| filters.status.is_none_or(|s| p.status == s))
            .filter(|p| filters.platform.is_none_or(|pl| p.platform == pl))
            .filter(|p| {
                filters.search.as_ref().is_none_or(|needle| {
                    p.caption
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                })
            })
            .cloned()
            .collect();

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
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
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
        let before = rows.len();
        rows.retain(|p| !(p.id == id && p.user_id == user_id));
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Vec-backed folder store mirroring [`MemoryPosts`].
#[derive(Default)]
pub struct MemoryFolders {
    rows: RwLock<Vec<Folder>>,
}

impl MemoryFolders {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderRepository for MemoryFolders {
    async fn insert(&self, folder: Folder) -> Result<Folder, RepoError> {
        self.rows.write().await.push(folder.clone());
        Ok(folder)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|f| f.id == id && f.user_id == user_id)
            .cloned())
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Folder>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: FolderChanges,
    ) -> Result<Folder, RepoError> {
        let mut rows = self.rows.write().await;
        let folder = rows
            .iter_mut()
            .find(|f| f.id == id && f.user_id == user_id)
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
        let before = rows.len();
        rows.retain(|f| !(f.id == id && f.user_id == user_id));
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Map-backed cache. TTLs are accepted and ignored; tests inspect entries
/// directly through the trait.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        _ttl: Option<std::time::Duration>,
    ) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Canned generation endpoint.
pub struct StubGenerator {
    response: Result<String, ()>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { response: Err(()) }
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(GenerationError::Request("stubbed failure".to_string())),
        }
    }
}

//! Post service - lifecycle, scheduling transitions, the read-through list
//! cache, and AI-assisted bulk drafting.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Folder, NewPost, Platform, Post, PostStatus};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    Cache, ContentGenerator, FolderRepository, PostChanges, PostFilters, PostRepository,
};

use super::{build_generation_prompt, post_list_key};

/// How long a cached post-list snapshot may serve before it self-heals,
/// even if an invalidation was missed.
pub const DEFAULT_LIST_CACHE_TTL: Duration = Duration::from_secs(60);

/// Bulk-generation request: what to write about and how many posts.
#[derive(Debug, Clone)]
pub struct GenerationBrief {
    pub brand_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub number_of_posts: u8,
}

/// Aggregated dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_posts: usize,
    pub scheduled_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_folders: usize,
}

/// One item of the generation endpoint's JSON array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedPost {
    caption: String,
    #[serde(default)]
    hashtags: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    image_prompt: Option<String>,
    #[serde(default)]
    scheduled_at: Option<DateTime<Utc>>,
}

/// Post service. Every operation is scoped to the calling user.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    folders: Arc<dyn FolderRepository>,
    cache: Arc<dyn Cache>,
    generator: Arc<dyn ContentGenerator>,
    list_cache_ttl: Duration,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        folders: Arc<dyn FolderRepository>,
        cache: Arc<dyn Cache>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            posts,
            folders,
            cache,
            generator,
            list_cache_ttl: DEFAULT_LIST_CACHE_TTL,
        }
    }

    pub fn with_list_cache_ttl(mut self, ttl: Duration) -> Self {
        self.list_cache_ttl = ttl;
        self
    }

    /// Create a post. A supplied folder must belong to the caller; a
    /// supplied schedule makes the post start out `Scheduled`.
    pub async fn create_post(&self, user_id: Uuid, input: NewPost) -> Result<Post, DomainError> {
        if let Some(folder_id) = input.folder_id {
            self.require_folder(user_id, folder_id).await?;
        }

        let post = self.posts.insert(Post::new(user_id, input)).await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %post.id, status = post.status.as_str(), "post created");
        Ok(post)
    }

    /// Apply a sparse update. A non-null incoming folder reference is
    /// re-validated against the caller's folders.
    pub async fn update_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        self.require_post(user_id, id).await?;

        if let Some(Some(folder_id)) = changes.folder_id {
            self.require_folder(user_id, folder_id).await?;
        }

        let post = self.apply_post_changes(user_id, id, changes).await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %id, "post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.require_post(user_id, id).await?;
        match self.posts.delete(user_id, id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => return Err(DomainError::post_not_found(id)),
            Err(other) => return Err(other.into()),
        }
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %id, "post deleted");
        Ok(())
    }

    pub async fn get_post(&self, user_id: Uuid, id: Uuid) -> Result<Post, DomainError> {
        self.require_post(user_id, id).await
    }

    /// The caller's posts, newest first. Only the completely unfiltered
    /// query is served through the cache; any narrowing goes straight to
    /// the repository and never touches the snapshot key.
    pub async fn get_posts(
        &self,
        user_id: Uuid,
        filters: &PostFilters,
    ) -> Result<Vec<Post>, DomainError> {
        if let Some(folder_id) = filters.folder_id {
            self.require_folder(user_id, folder_id).await?;
        }

        if !filters.is_unfiltered() {
            return Ok(self.posts.find_for_user(user_id, filters).await?);
        }

        let key = post_list_key(user_id);
        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_str::<Vec<Post>>(&cached) {
                Ok(posts) => {
                    tracing::debug!(%user_id, "post list cache hit");
                    return Ok(posts);
                }
                Err(err) => {
                    tracing::warn!(%user_id, error = %err, "discarding undecodable post list snapshot");
                }
            }
        }

        let posts = self.posts.find_for_user(user_id, filters).await?;
        match serde_json::to_string(&posts) {
            Ok(snapshot) => {
                if let Err(err) = self
                    .cache
                    .set(&key, &snapshot, Some(self.list_cache_ttl))
                    .await
                {
                    tracing::warn!(%user_id, error = %err, "post list cache write failed");
                }
            }
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "post list snapshot serialization failed");
            }
        }
        Ok(posts)
    }

    /// Record a future publish intent. Rejects timestamps that are not
    /// strictly in the future at call time.
    pub async fn schedule_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        if scheduled_at <= Utc::now() {
            return Err(DomainError::Validation(
                "Scheduled time must be in the future".to_string(),
            ));
        }

        self.require_post(user_id, id).await?;
        let post = self
            .apply_post_changes(user_id, id, PostChanges::schedule(scheduled_at))
            .await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %id, scheduled_at = %scheduled_at, "post scheduled");
        Ok(post)
    }

    /// Drop the publish intent and return the post to a draft. Idempotent.
    pub async fn unschedule_post(&self, user_id: Uuid, id: Uuid) -> Result<Post, DomainError> {
        self.require_post(user_id, id).await?;
        let post = self
            .apply_post_changes(user_id, id, PostChanges::unschedule())
            .await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %id, "post unscheduled");
        Ok(post)
    }

    pub async fn move_post_to_folder(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        folder_id: Uuid,
    ) -> Result<Post, DomainError> {
        self.require_post(user_id, post_id).await?;
        self.require_folder(user_id, folder_id).await?;

        let post = self
            .apply_post_changes(user_id, post_id, PostChanges::move_to(Some(folder_id)))
            .await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %post_id, %folder_id, "post moved");
        Ok(post)
    }

    /// Ask the generation endpoint for `number_of_posts` posts and persist
    /// them as one batch. Generated items default to drafts on `All`;
    /// an item carrying a future schedule comes in already scheduled.
    pub async fn generate_content(
        &self,
        user_id: Uuid,
        brief: GenerationBrief,
    ) -> Result<Vec<Post>, DomainError> {
        if brief.number_of_posts == 0 || brief.number_of_posts > 10 {
            return Err(DomainError::Validation(
                "numberOfPosts must be between 1 and 10".to_string(),
            ));
        }

        let prompt = build_generation_prompt(&brief);
        let raw = self
            .generator
            .complete(&prompt)
            .await
            .map_err(|e| DomainError::Generation(e.to_string()))?;

        let items = parse_generated_posts(&raw)?;
        if items.is_empty() {
            return Err(DomainError::Generation(
                "endpoint returned no posts".to_string(),
            ));
        }

        let now = Utc::now();
        let posts: Vec<Post> = items
            .into_iter()
            .map(|item| {
                let scheduled_at = item.scheduled_at.filter(|at| *at > now);
                Post::new(
                    user_id,
                    NewPost {
                        caption: item.caption,
                        hashtags: item.hashtags,
                        platform: item
                            .platform
                            .as_deref()
                            .map(Platform::parse)
                            .unwrap_or_default(),
                        folder_id: None,
                        image_prompt: item.image_prompt,
                        scheduled_at,
                    },
                )
            })
            .collect();

        let inserted = self.posts.insert_many(posts).await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, count = inserted.len(), "generated posts persisted");
        Ok(inserted)
    }

    /// Counters for the dashboard header, aggregated from full fetches of
    /// both collections.
    pub async fn get_dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, DomainError> {
        let default_filters = PostFilters::default();
        let (posts, folders) = tokio::try_join!(
            self.posts.find_for_user(user_id, &default_filters),
            self.folders.find_for_user(user_id),
        )?;

        let count_status =
            |status: PostStatus| posts.iter().filter(|p| p.status == status).count();

        Ok(DashboardStats {
            total_posts: posts.len(),
            scheduled_posts: count_status(PostStatus::Scheduled),
            published_posts: count_status(PostStatus::Published),
            draft_posts: count_status(PostStatus::Draft),
            total_folders: folders.len(),
        })
    }

    /// Scheduled posts, optionally windowed by their scheduled timestamp.
    /// The windowing happens in the service after a status-filtered fetch.
    pub async fn get_scheduled_posts(
        &self,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Post>, DomainError> {
        let mut posts = self
            .posts
            .find_for_user(user_id, &PostFilters::with_status(PostStatus::Scheduled))
            .await?;

        if start.is_some() || end.is_some() {
            posts.retain(|post| {
                let Some(at) = post.scheduled_at else {
                    return false;
                };
                start.is_none_or(|s| at >= s) && end.is_none_or(|e| at <= e)
            });
        }
        Ok(posts)
    }

    /// Clone a post as a fresh draft. The schedule is never copied.
    pub async fn duplicate_post(&self, user_id: Uuid, id: Uuid) -> Result<Post, DomainError> {
        let original = self.require_post(user_id, id).await?;
        let copy = self
            .posts
            .insert(Post::new(user_id, original.duplicate()))
            .await?;
        self.invalidate_list(user_id).await;

        tracing::info!(%user_id, post_id = %id, copy_id = %copy.id, "post duplicated");
        Ok(copy)
    }

    async fn require_post(&self, user_id: Uuid, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn require_folder(&self, user_id: Uuid, id: Uuid) -> Result<Folder, DomainError> {
        self.folders
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| DomainError::folder_not_found(id))
    }

    async fn apply_post_changes(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        match self.posts.update(user_id, id, changes).await {
            Ok(post) => Ok(post),
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(id)),
            Err(other) => Err(other.into()),
        }
    }

    async fn invalidate_list(&self, user_id: Uuid) {
        let key = post_list_key(user_id);
        if let Err(err) = self.cache.delete(&key).await {
            tracing::warn!(%user_id, error = %err, "post list cache invalidation failed");
        }
    }
}

/// Parse the generation endpoint's reply into post items.
///
/// Tolerates a fenced code block and a double-encoded payload (a JSON
/// string whose contents are the array) on top of the plain array the
/// prompt asks for.
fn parse_generated_posts(raw: &str) -> Result<Vec<GeneratedPost>, DomainError> {
    let trimmed = strip_code_fence(raw.trim());
    if trimmed.is_empty() {
        return Err(DomainError::Generation(
            "endpoint returned an empty body".to_string(),
        ));
    }

    let mut value: serde_json::Value = serde_json::from_str(trimmed)
        .map_err(|e| DomainError::Generation(format!("response is not JSON: {e}")))?;

    if let serde_json::Value::String(inner) = value {
        value = serde_json::from_str(&inner)
            .map_err(|e| DomainError::Generation(format!("encoded response is not JSON: {e}")))?;
    }

    serde_json::from_value(value)
        .map_err(|e| DomainError::Generation(format!("unexpected response shape: {e}")))
}

fn strip_code_fence(s: &str) -> &str {
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    s.strip_suffix("```").unwrap_or(s).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{MemoryCache, MemoryFolders, MemoryPosts, StubGenerator};
    use chrono::TimeDelta;

    fn service_with(generator: StubGenerator) -> (PostService, Arc<MemoryFolders>) {
        let folders = Arc::new(MemoryFolders::new());
        let service = PostService::new(
            Arc::new(MemoryPosts::new()),
            folders.clone(),
            Arc::new(MemoryCache::new()),
            Arc::new(generator),
        );
        (service, folders)
    }

    fn service() -> (PostService, Arc<MemoryFolders>) {
        service_with(StubGenerator::replying("[]"))
    }

    fn draft(caption: &str) -> NewPost {
        NewPost {
            caption: caption.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        let created = service
            .create_post(
                user,
                NewPost {
                    caption: "Launch day!".to_string(),
                    hashtags: Some("#launch".to_string()),
                    platform: Platform::Twitter,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let fetched = service.get_post(user, created.id).await.unwrap();
        assert_eq!(fetched.caption, "Launch day!");
        assert_eq!(fetched.hashtags.as_deref(), Some("#launch"));
        assert_eq!(fetched.platform, Platform::Twitter);
        assert_eq!(fetched.status, PostStatus::Draft);
        assert_eq!(fetched.folder_id, None);
    }

    #[tokio::test]
    async fn create_rejects_foreign_folder() {
        let (service, folders) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let folder = folders
            .insert(Folder::new(owner, "Campaign".to_string(), None, None))
            .await
            .unwrap();

        let result = service
            .create_post(
                stranger,
                NewPost {
                    caption: "sneaky".to_string(),
                    folder_id: Some(folder.id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn cross_user_access_looks_like_absence() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let post = service.create_post(owner, draft("mine")).await.unwrap();

        assert!(matches!(
            service.get_post(stranger, post.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_post(stranger, post.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .update_post(stranger, post.id, PostChanges::default())
                .await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn schedule_rejects_past_timestamps() {
        let (service, _) = service();
        let user = Uuid::new_v4();
        let post = service.create_post(user, draft("soon")).await.unwrap();

        let result = service
            .schedule_post(user, post.id, Utc::now() - TimeDelta::minutes(5))
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        // Still a draft.
        let fetched = service.get_post(user, post.id).await.unwrap();
        assert_eq!(fetched.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn schedule_then_unschedule_is_idempotent() {
        let (service, _) = service();
        let user = Uuid::new_v4();
        let post = service.create_post(user, draft("soon")).await.unwrap();
        let at = Utc::now() + TimeDelta::hours(3);

        let scheduled = service.schedule_post(user, post.id, at).await.unwrap();
        assert_eq!(scheduled.status, PostStatus::Scheduled);
        assert_eq!(scheduled.scheduled_at, Some(at));

        let first = service.unschedule_post(user, post.id).await.unwrap();
        let second = service.unschedule_post(user, post.id).await.unwrap();
        for post in [first, second] {
            assert_eq!(post.status, PostStatus::Draft);
            assert_eq!(post.scheduled_at, None);
        }
    }

    #[tokio::test]
    async fn unfiltered_list_is_cached_and_mutations_invalidate() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        service.create_post(user, draft("first")).await.unwrap();
        let listed = service
            .get_posts(user, &PostFilters::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        // Second unfiltered read is served from the snapshot.
        let again = service
            .get_posts(user, &PostFilters::default())
            .await
            .unwrap();
        assert_eq!(again.len(), 1);

        // A mutation invalidates; the next read sees the new post.
        service.create_post(user, draft("second")).await.unwrap();
        let refreshed = service
            .get_posts(user, &PostFilters::default())
            .await
            .unwrap();
        assert_eq!(refreshed.len(), 2);
        assert_eq!(refreshed[0].caption, "second");
    }

    #[tokio::test]
    async fn filtered_queries_bypass_the_snapshot() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        service.create_post(user, draft("alpha")).await.unwrap();
        // Warm the snapshot with the one-post list.
        service
            .get_posts(user, &PostFilters::default())
            .await
            .unwrap();

        let post = service.create_post(user, draft("beta")).await.unwrap();
        service
            .schedule_post(user, post.id, Utc::now() + TimeDelta::hours(1))
            .await
            .unwrap();

        // A status filter must reflect the live store, not the snapshot.
        let scheduled = service
            .get_posts(user, &PostFilters::with_status(PostStatus::Scheduled))
            .await
            .unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].caption, "beta");
    }

    #[tokio::test]
    async fn search_and_pagination_narrow_the_list() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        for caption in ["Spring sale", "Summer SALE", "Autumn launch"] {
            service.create_post(user, draft(caption)).await.unwrap();
        }

        let hits = service
            .get_posts(
                user,
                &PostFilters {
                    search: Some("sale".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);

        let page = service
            .get_posts(
                user,
                &PostFilters {
                    limit: Some(1),
                    offset: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].caption, "Summer SALE");
    }

    #[tokio::test]
    async fn generate_inserts_requested_drafts() {
        let reply = r##"[
            {"caption": "Post one", "hashtags": "#a", "platform": "instagram", "imagePrompt": "sunrise"},
            {"caption": "Post two", "hashtags": "#b", "platform": "unknown-net", "imagePrompt": "sunset"}
        ]"##;
        let (service, _) = service_with(StubGenerator::replying(reply));
        let user = Uuid::new_v4();

        let inserted = service
            .generate_content(
                user,
                GenerationBrief {
                    brand_name: "Acme".to_string(),
                    product_description: "rocket skates".to_string(),
                    target_audience: "coyotes".to_string(),
                    number_of_posts: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert!(inserted.iter().all(|p| p.status == PostStatus::Draft));
        assert_eq!(inserted[0].platform, Platform::Instagram);
        // Unknown platforms fall back to the cross-posting default.
        assert_eq!(inserted[1].platform, Platform::All);

        let listed = service
            .get_posts(user, &PostFilters::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn generate_accepts_fenced_and_double_encoded_output() {
        let fenced = "```json\n[{\"caption\": \"Fenced\"}]\n```";
        let (service, _) = service_with(StubGenerator::replying(fenced));
        let user = Uuid::new_v4();
        let brief = GenerationBrief {
            brand_name: "Acme".to_string(),
            product_description: "anvils".to_string(),
            target_audience: "roadrunners".to_string(),
            number_of_posts: 1,
        };

        let inserted = service.generate_content(user, brief.clone()).await.unwrap();
        assert_eq!(inserted[0].caption, "Fenced");

        let encoded = r#""[{\"caption\": \"Encoded\"}]""#;
        let (service, _) = service_with(StubGenerator::replying(encoded));
        let inserted = service.generate_content(user, brief).await.unwrap();
        assert_eq!(inserted[0].caption, "Encoded");
    }

    #[tokio::test]
    async fn generate_surfaces_upstream_and_parse_failures() {
        let user = Uuid::new_v4();
        let brief = GenerationBrief {
            brand_name: "Acme".to_string(),
            product_description: "anvils".to_string(),
            target_audience: "roadrunners".to_string(),
            number_of_posts: 1,
        };

        let (service, _) = service_with(StubGenerator::failing());
        assert!(matches!(
            service.generate_content(user, brief.clone()).await,
            Err(DomainError::Generation(_))
        ));

        let (service, _) = service_with(StubGenerator::replying("here you go: posts!"));
        assert!(matches!(
            service.generate_content(user, brief.clone()).await,
            Err(DomainError::Generation(_))
        ));

        let (service, _) = service_with(StubGenerator::replying("[]"));
        assert!(matches!(
            service.generate_content(user, brief).await,
            Err(DomainError::Generation(_))
        ));
    }

    #[tokio::test]
    async fn generate_rejects_out_of_range_counts() {
        let (service, _) = service();
        let brief = GenerationBrief {
            brand_name: "Acme".to_string(),
            product_description: "anvils".to_string(),
            target_audience: "roadrunners".to_string(),
            number_of_posts: 11,
        };
        assert!(matches!(
            service.generate_content(Uuid::new_v4(), brief).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn dashboard_stats_count_by_status() {
        let (service, folders) = service();
        let user = Uuid::new_v4();

        folders
            .insert(Folder::new(user, "Campaign".to_string(), None, None))
            .await
            .unwrap();

        service.create_post(user, draft("one")).await.unwrap();
        let second = service.create_post(user, draft("two")).await.unwrap();
        service
            .schedule_post(user, second.id, Utc::now() + TimeDelta::days(1))
            .await
            .unwrap();

        let stats = service.get_dashboard_stats(user).await.unwrap();
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.draft_posts, 1);
        assert_eq!(stats.scheduled_posts, 1);
        assert_eq!(stats.published_posts, 0);
        assert_eq!(stats.total_folders, 1);
    }

    #[tokio::test]
    async fn scheduled_window_filters_by_timestamp() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        let near = service.create_post(user, draft("near")).await.unwrap();
        let far = service.create_post(user, draft("far")).await.unwrap();
        service
            .schedule_post(user, near.id, Utc::now() + TimeDelta::hours(2))
            .await
            .unwrap();
        service
            .schedule_post(user, far.id, Utc::now() + TimeDelta::days(30))
            .await
            .unwrap();

        let this_week = service
            .get_scheduled_posts(
                user,
                Some(Utc::now()),
                Some(Utc::now() + TimeDelta::days(7)),
            )
            .await
            .unwrap();
        assert_eq!(this_week.len(), 1);
        assert_eq!(this_week[0].caption, "near");

        let all = service.get_scheduled_posts(user, None, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_creates_fresh_draft_copy() {
        let (service, folders) = service();
        let user = Uuid::new_v4();

        let folder = folders
            .insert(Folder::new(user, "Campaign".to_string(), None, None))
            .await
            .unwrap();
        let post = service
            .create_post(
                user,
                NewPost {
                    caption: "Original".to_string(),
                    folder_id: Some(folder.id),
                    scheduled_at: Some(Utc::now() + TimeDelta::days(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let copy = service.duplicate_post(user, post.id).await.unwrap();
        assert_ne!(copy.id, post.id);
        assert_eq!(copy.caption, "Original (Copy)");
        assert_eq!(copy.folder_id, Some(folder.id));
        assert_eq!(copy.status, PostStatus::Draft);
        assert_eq!(copy.scheduled_at, None);
    }

    #[tokio::test]
    async fn move_requires_destination_ownership() {
        let (service, folders) = service();
        let user = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let post = service.create_post(user, draft("homeless")).await.unwrap();
        let foreign = folders
            .insert(Folder::new(stranger, "Theirs".to_string(), None, None))
            .await
            .unwrap();

        assert!(matches!(
            service.move_post_to_folder(user, post.id, foreign.id).await,
            Err(DomainError::NotFound { .. })
        ));

        let mine = folders
            .insert(Folder::new(user, "Mine".to_string(), None, None))
            .await
            .unwrap();
        let moved = service
            .move_post_to_folder(user, post.id, mine.id)
            .await
            .unwrap();
        assert_eq!(moved.folder_id, Some(mine.id));
    }
}

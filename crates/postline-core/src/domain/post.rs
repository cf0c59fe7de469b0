use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target network for a post. `All` is the cross-posting default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    All,
    Instagram,
    Twitter,
    Facebook,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::All => "all",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Parse a wire/storage value. Unknown values fall back to `All`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "twitter" => Platform::Twitter,
            "facebook" => Platform::Facebook,
            "linkedin" => Platform::Linkedin,
            _ => Platform::All,
        }
    }
}

/// Lifecycle state of a post.
///
/// Only `Draft` and `Scheduled` are reachable from operations in this
/// service; `Published` is owned by the external publishing integration and
/// is never set here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Some(PostStatus::Draft),
            "scheduled" => Some(PostStatus::Scheduled),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

/// Post entity - a unit of schedulable social-media content owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: String,
    pub hashtags: Option<String>,
    pub platform: Platform,
    pub folder_id: Option<Uuid>,
    pub image_prompt: Option<String>,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post. Status is derived, never supplied.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub caption: String,
    pub hashtags: Option<String>,
    pub platform: Platform,
    pub folder_id: Option<Uuid>,
    pub image_prompt: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post. A supplied schedule makes it `Scheduled`,
    /// otherwise it starts as a `Draft`.
    pub fn new(user_id: Uuid, input: NewPost) -> Self {
        let now = Utc::now();
        let status = if input.scheduled_at.is_some() {
            PostStatus::Scheduled
        } else {
            PostStatus::Draft
        };

        Self {
            id: Uuid::new_v4(),
            user_id,
            caption: input.caption,
            hashtags: input.hashtags,
            platform: input.platform,
            folder_id: input.folder_id,
            image_prompt: input.image_prompt,
            image_url: None,
            status,
            scheduled_at: input.scheduled_at,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Input for a fresh draft copy of this post. The schedule is
    /// intentionally not carried over.
    pub fn duplicate(&self) -> NewPost {
        NewPost {
            caption: format!("{} (Copy)", self.caption),
            hashtags: self.hashtags.clone(),
            platform: self.platform,
            folder_id: self.folder_id,
            image_prompt: self.image_prompt.clone(),
            scheduled_at: None,
        }
    }
}

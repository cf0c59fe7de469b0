//! Data Transfer Objects - request types for the API, with their
//! validation rules. Wire names are camelCase throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use postline_core::domain::{NewPost, Platform, PostStatus};
use postline_core::ports::{FolderChanges, PostChanges, PostFilters};
use postline_core::service::GenerationBrief;

/// Distinguish an absent field from an explicit `null`: absent stays `None`,
/// a present value (null included) becomes `Some(..)`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let rest = color
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::new("hex_color"))?;
    if rest.len() == 6 && rest.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 2200, message = "caption must be 1-2200 characters"))]
    pub caption: String,
    #[validate(length(max = 280, message = "hashtags too long"))]
    pub hashtags: Option<String>,
    pub platform: Option<Platform>,
    pub folder_id: Option<Uuid>,
    #[validate(length(max = 500, message = "image prompt too long"))]
    pub image_prompt: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl CreatePostRequest {
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            caption: self.caption,
            hashtags: self.hashtags,
            platform: self.platform.unwrap_or_default(),
            folder_id: self.folder_id,
            image_prompt: self.image_prompt,
            scheduled_at: self.scheduled_at,
        }
    }
}

/// Sparse update to a post. `folderId` may be set to `null` to detach.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 2200, message = "caption must be 1-2200 characters"))]
    pub caption: Option<String>,
    #[validate(length(max = 280, message = "hashtags too long"))]
    pub hashtags: Option<String>,
    pub platform: Option<Platform>,
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
    #[validate(length(max = 500, message = "image prompt too long"))]
    pub image_prompt: Option<String>,
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl UpdatePostRequest {
    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            caption: self.caption,
            hashtags: self.hashtags,
            platform: self.platform,
            folder_id: self.folder_id,
            image_prompt: self.image_prompt,
            status: self.status,
            scheduled_at: self.scheduled_at.map(Some),
        }
    }
}

/// Query parameters for listing posts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub folder_id: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub platform: Option<Platform>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PostQuery {
    pub fn into_filters(self) -> PostFilters {
        PostFilters {
            folder_id: self.folder_id,
            status: self.status,
            platform: self.platform,
            search: self.search.filter(|s| !s.is_empty()),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Body for the schedule operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePostRequest {
    pub scheduled_at: DateTime<Utc>,
}

/// Body for moving a post into a folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePostRequest {
    pub folder_id: Uuid,
}

/// Request for AI-assisted bulk drafting.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[validate(length(min = 1, message = "brand name is required"))]
    pub brand_name: String,
    #[validate(length(min = 1, message = "product description is required"))]
    pub product_description: String,
    #[validate(length(min = 1, message = "target audience is required"))]
    pub target_audience: String,
    #[validate(range(min = 1, max = 10, message = "numberOfPosts must be between 1 and 10"))]
    pub number_of_posts: u8,
}

impl GenerateContentRequest {
    pub fn into_brief(self) -> GenerationBrief {
        GenerationBrief {
            brand_name: self.brand_name,
            product_description: self.product_description,
            target_audience: self.target_audience,
            number_of_posts: self.number_of_posts,
        }
    }
}

/// Request to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description too long"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

/// Sparse update to a folder.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description too long"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

impl UpdateFolderRequest {
    pub fn into_changes(self) -> FolderChanges {
        FolderChanges {
            name: self.name,
            description: self.description,
            color: self.color,
        }
    }
}

/// Query parameters for folder deletion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderQuery {
    /// Destination for the folder's posts; omitted means detach.
    pub move_to_folder_id: Option<Uuid>,
}

/// Query parameters for the schedule calendar window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWindowQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

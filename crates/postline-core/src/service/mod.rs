//! Application services - the business rules over the ports.

mod folders;
mod posts;
mod prompt;

pub use folders::{FolderService, FolderWithPosts};
pub use posts::{DEFAULT_LIST_CACHE_TTL, DashboardStats, GenerationBrief, PostService};
pub use prompt::build_generation_prompt;

use uuid::Uuid;

/// Cache key for a user's unfiltered post list snapshot.
pub(crate) fn post_list_key(user_id: Uuid) -> String {
    format!("posts:{user_id}")
}

#[cfg(test)]
pub(crate) mod testutil;

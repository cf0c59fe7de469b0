use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color assigned to folders created without one.
pub const DEFAULT_FOLDER_COLOR: &str = "#3B82F6";

/// Folder entity - a named per-user grouping of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new folder with generated id and timestamps.
    pub fn new(
        user_id: Uuid,
        name: String,
        description: Option<String>,
        color: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            color: color.unwrap_or_else(|| DEFAULT_FOLDER_COLOR.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_folder_defaults_color() {
        let folder = Folder::new(Uuid::new_v4(), "Campaign A".to_string(), None, None);
        assert_eq!(folder.color, DEFAULT_FOLDER_COLOR);
    }

    #[test]
    fn new_folder_keeps_supplied_color() {
        let folder = Folder::new(
            Uuid::new_v4(),
            "Campaign A".to_string(),
            Some("spring push".to_string()),
            Some("#FF0000".to_string()),
        );
        assert_eq!(folder.color, "#FF0000");
        assert_eq!(folder.description.as_deref(), Some("spring push"));
    }
}

//! User profile models.

use serde::{Deserialize, Serialize};

/// A user's profile document. Profiles are created implicitly by merge
/// writes, so every field other than the id may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub current_goal_id: Option<String>,
    #[serde(default)]
    pub current_group_id: Option<String>,
    /// One push token per device.
    #[serde(default)]
    pub push_tokens: Vec<String>,
    #[serde(default)]
    pub last_active_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Partial profile update; only present fields touch the document.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub current_goal_id: Option<String>,
    pub current_group_id: Option<String>,
}

use std::collections::HashMap;

use crate::errors::Result;
use crate::users::users_model::{UserProfile, UserProfileUpdate};
use async_trait::async_trait;

/// Trait for user profile repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Merge-writes the update into the profile, creating it if needed.
    async fn merge_profile(&self, user_id: &str, update: &UserProfileUpdate) -> Result<()>;
    /// Adds a device push token (set semantics) and refreshes last-active.
    async fn add_push_token(&self, user_id: &str, token: &str) -> Result<()>;
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn update_push_token(&self, user_id: &str, token: &str);
    async fn update_user_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<()>;
    async fn get_user(&self, user_id: &str) -> Option<UserProfile>;
    async fn get_users(&self, user_ids: &[String]) -> HashMap<String, UserProfile>;
}

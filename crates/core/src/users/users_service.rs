use futures::future::join_all;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use super::users_model::{UserProfile, UserProfileUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;

/// Service for user profile reads and merge updates.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    /// Registers a device push token. Non-blocking for callers: failures
    /// are logged and dropped.
    async fn update_push_token(&self, user_id: &str, token: &str) {
        if let Err(err) = self.repository.add_push_token(user_id, token).await {
            warn!("failed to update push token for {user_id}: {err}");
        }
    }

    async fn update_user_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<()> {
        self.repository.merge_profile(user_id, &update).await
    }

    async fn get_user(&self, user_id: &str) -> Option<UserProfile> {
        match self.repository.get_user(user_id).await {
            Ok(user) => user,
            Err(err) => {
                warn!("failed to fetch user {user_id}: {err}");
                None
            }
        }
    }

    /// Bulk profile fetch, one parallel lookup per id. Absent users are
    /// skipped; any failure degrades to an empty map.
    async fn get_users(&self, user_ids: &[String]) -> HashMap<String, UserProfile> {
        if user_ids.is_empty() {
            return HashMap::new();
        }

        let fetches = user_ids.iter().map(|id| self.repository.get_user(id));
        let mut users = HashMap::new();
        for result in join_all(fetches).await {
            match result {
                Ok(Some(user)) => {
                    users.insert(user.id.clone(), user);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("failed to fetch users: {err}");
                    return HashMap::new();
                }
            }
        }
        users
    }
}

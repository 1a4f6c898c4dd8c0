use async_trait::async_trait;
use serde_json::Value;

use crate::collections;
use crate::db::{field, MemoryStore, WriteField};
use crate::utils::decode;
use instep_core::errors::Result;
use instep_core::users::{UserProfile, UserProfileUpdate, UserRepositoryTrait};

/// Repository for user profile documents.
pub struct UserRepository {
    store: MemoryStore,
}

impl UserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn merge_profile(&self, user_id: &str, update: &UserProfileUpdate) -> Result<()> {
        let mut fields = Vec::new();
        if let Some(name) = &update.name {
            fields.push(field("name", WriteField::value(name.as_str())));
        }
        if let Some(bio) = &update.bio {
            fields.push(field("bio", WriteField::value(bio.as_str())));
        }
        if let Some(goal_id) = &update.current_goal_id {
            fields.push(field("currentGoalId", WriteField::value(goal_id.as_str())));
        }
        if let Some(group_id) = &update.current_group_id {
            fields.push(field("currentGroupId", WriteField::value(group_id.as_str())));
        }
        fields.push(field("updatedAt", WriteField::ServerTimestamp));

        self.store.set(collections::USERS, user_id, fields, true);
        Ok(())
    }

    async fn add_push_token(&self, user_id: &str, token: &str) -> Result<()> {
        self.store.set(
            collections::USERS,
            user_id,
            vec![
                field(
                    "pushTokens",
                    WriteField::array_union(vec![Value::String(token.to_string())]),
                ),
                field("lastActiveAt", WriteField::ServerTimestamp),
            ],
            true,
        );
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        match self.store.get(collections::USERS, user_id) {
            Some(doc) => decode(user_id, doc).map(Some),
            None => Ok(None),
        }
    }
}

use async_trait::async_trait;
use serde_json::Value;

use crate::collections;
use crate::db::{field, Filter, MemoryStore, OrderBy, WriteField};
use crate::utils::{decode, decode_all};
use instep_core::errors::Result;
use instep_core::goals::{
    user_goal_key, Affirmation, CheckIn, GoalDefinition, GoalRepositoryTrait, NewCheckIn,
    NewGoalRequest, TimelineEntry, UserGoalProgress,
};
use instep_core::utils::time_utils::now_millis;

/// Repository for goal catalog, progress, and check-in documents.
pub struct GoalRepository {
    store: MemoryStore,
}

impl GoalRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn get_goal_definition(&self, goal_id: &str) -> Result<Option<GoalDefinition>> {
        match self.store.get(collections::GOALS, goal_id) {
            Some(doc) => decode(goal_id, doc).map(Some),
            None => Ok(None),
        }
    }

    async fn list_live_goals(&self) -> Result<Vec<GoalDefinition>> {
        let rows = self
            .store
            .query(collections::GOALS, &[Filter::eq("status", "live")], None, None);
        decode_all(rows)
    }

    async fn get_user_goal(&self, user_goal_id: &str) -> Result<Option<UserGoalProgress>> {
        match self.store.get(collections::USER_GOALS, user_goal_id) {
            Some(doc) => decode(user_goal_id, doc).map(Some),
            None => Ok(None),
        }
    }

    async fn insert_user_goal(&self, record: &UserGoalProgress) -> Result<()> {
        let key = user_goal_key(&record.user_id, &record.goal_id);
        self.store.set(
            collections::USER_GOALS,
            &key,
            vec![
                field("userId", WriteField::value(record.user_id.as_str())),
                field("goalId", WriteField::value(record.goal_id.as_str())),
                field("startDate", WriteField::ServerTimestamp),
                field(
                    "currentMilestoneId",
                    WriteField::value(record.current_milestone_id.as_str()),
                ),
                field("progressPercent", WriteField::value(record.progress_percent)),
                field("timeline", WriteField::value(encode_timeline(&record.timeline)?)),
                field("createdAt", WriteField::ServerTimestamp),
                field("updatedAt", WriteField::ServerTimestamp),
            ],
            false,
        );
        Ok(())
    }

    async fn apply_milestone_completion(
        &self,
        user_goal_id: &str,
        timeline: &[TimelineEntry],
        progress_percent: i32,
        current_milestone_id: &str,
    ) -> Result<()> {
        self.store
            .update(
                collections::USER_GOALS,
                user_goal_id,
                vec![
                    field("timeline", WriteField::value(encode_timeline(timeline)?)),
                    field("progressPercent", WriteField::value(progress_percent)),
                    field("currentMilestoneId", WriteField::value(current_milestone_id)),
                    field("updatedAt", WriteField::ServerTimestamp),
                ],
            )
            .map_err(Into::into)
    }

    async fn insert_check_in(&self, check_in: NewCheckIn) -> Result<String> {
        let id = self.store.add(
            collections::CHECK_INS,
            vec![
                field("userId", WriteField::value(check_in.user_id)),
                field("goalId", WriteField::value(check_in.goal_id)),
                field("note", WriteField::value(check_in.note)),
                field("createdAt", WriteField::ServerTimestamp),
                field("milestoneId", WriteField::value(check_in.milestone_id)),
                field("groupId", WriteField::value(check_in.group_id)),
                field("photoUrl", WriteField::value(check_in.photo_url)),
            ],
        );
        Ok(id)
    }

    async fn list_check_ins(&self, user_id: &str, goal_id: &str) -> Result<Vec<CheckIn>> {
        let rows = self.store.query(
            collections::CHECK_INS,
            &[Filter::eq("userId", user_id), Filter::eq("goalId", goal_id)],
            Some(OrderBy::desc("createdAt")),
            None,
        );
        decode_all(rows)
    }

    async fn insert_affirmation(&self, user_id: &str, text: &str) -> Result<Affirmation> {
        let id = self.store.add(
            collections::AFFIRMATIONS,
            vec![
                field("userId", WriteField::value(user_id)),
                field("text", WriteField::value(text)),
                field("createdAt", WriteField::ServerTimestamp),
            ],
        );
        // Local stamp; the stored timestamp is server-resolved.
        Ok(Affirmation {
            id,
            user_id: user_id.to_string(),
            text: text.to_string(),
            created_at: now_millis(),
        })
    }

    async fn list_affirmations(&self, user_id: &str) -> Result<Vec<Affirmation>> {
        let rows = self.store.query(
            collections::AFFIRMATIONS,
            &[Filter::eq("userId", user_id)],
            Some(OrderBy::desc("createdAt")),
            None,
        );
        decode_all(rows)
    }

    async fn insert_goal_request(&self, request: NewGoalRequest) -> Result<String> {
        let id = self.store.add(
            collections::GOAL_REQUESTS,
            vec![
                field("userId", WriteField::value(request.user_id)),
                field(
                    "requestedGoalText",
                    WriteField::value(request.requested_goal_text),
                ),
                field("type", WriteField::value(request.kind.as_str())),
                field("goalId", WriteField::value(request.goal_id)),
                field("status", WriteField::value("open")),
                field("createdAt", WriteField::ServerTimestamp),
                field("meta", WriteField::value(serde_json::json!({ "source": "app" }))),
            ],
        );
        Ok(id)
    }

    async fn insert_waitlist_entry(&self, user_id: &str, goal_id: &str) -> Result<String> {
        let id = self.store.add(
            collections::WAITLIST_ENTRIES,
            vec![
                field("userId", WriteField::value(user_id)),
                field("goalId", WriteField::value(goal_id)),
                field("status", WriteField::value("waiting")),
                field("createdAt", WriteField::ServerTimestamp),
            ],
        );
        Ok(id)
    }
}

fn encode_timeline(timeline: &[TimelineEntry]) -> Result<Value> {
    serde_json::to_value(timeline).map_err(|err| crate::errors::StorageError::from(err).into())
}

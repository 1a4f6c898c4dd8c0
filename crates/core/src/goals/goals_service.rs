use log::warn;
use std::sync::Arc;

use super::goals_model::{
    user_goal_key, Affirmation, CheckIn, CheckInOutcome, CheckInSubmission, GoalDefinition,
    NewCheckIn, NewGoalRequest, TimelineEntry, UserGoalProgress,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use super::progress_cache::ProgressCache;
use crate::constants::UNKNOWN_GROUP_ID;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::now_millis;

/// Service for goal catalog lookups and per-user progress tracking.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    progress_cache: Arc<dyn ProgressCache>,
}

impl GoalService {
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        progress_cache: Arc<dyn ProgressCache>,
    ) -> Self {
        GoalService {
            repository,
            progress_cache,
        }
    }

    async fn try_get_or_create(&self, user_id: &str, goal_id: &str) -> Result<UserGoalProgress> {
        if goal_id.is_empty() {
            return Err(ValidationError::MissingField("goalId".to_string()).into());
        }

        let key = user_goal_key(user_id, goal_id);
        if let Some(existing) = self.repository.get_user_goal(&key).await? {
            return Ok(existing);
        }

        let definition = self
            .repository
            .get_goal_definition(goal_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("goal definition {goal_id}")))?;
        let first_milestone = definition.first_milestone().ok_or_else(|| {
            ValidationError::InvalidInput(format!("goal {goal_id} has no milestones"))
        })?;

        // The repository stamps server-resolved times; the returned copy
        // carries local stamps so the caller can use it immediately.
        let now = now_millis();
        let record = UserGoalProgress {
            user_id: user_id.to_string(),
            goal_id: goal_id.to_string(),
            start_date: now,
            current_milestone_id: first_milestone.id.clone(),
            progress_percent: 0,
            timeline: definition
                .milestones
                .iter()
                .map(|m| TimelineEntry {
                    milestone_id: m.id.clone(),
                    completed_at: None,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_user_goal(&record).await?;

        Ok(record)
    }

    /// Persists the check-in and, when a milestone was completed, advances
    /// the progress record. Returns the completed milestone's title.
    async fn persist_check_in(&self, submission: &CheckInSubmission) -> Result<Option<String>> {
        self.repository
            .insert_check_in(NewCheckIn {
                user_id: submission.user_id.clone(),
                goal_id: submission.goal_id.clone(),
                note: submission.note.clone(),
                milestone_id: submission.completed_milestone_id.clone(),
                group_id: submission
                    .group_id
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_GROUP_ID.to_string()),
                photo_url: submission.photo_url.clone(),
            })
            .await?;

        let Some(milestone_id) = submission.completed_milestone_id.as_deref() else {
            return Ok(None);
        };

        let key = user_goal_key(&submission.user_id, &submission.goal_id);
        let current = self
            .repository
            .get_user_goal(&key)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user goal {key}")))?;
        let definition = self
            .repository
            .get_goal_definition(&submission.goal_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("goal definition {}", submission.goal_id)))?;

        // An unknown milestone id leaves the record untouched; the check-in
        // itself already went through.
        let Some(milestone) = definition.milestone(milestone_id) else {
            return Ok(None);
        };

        let timeline = stamp_timeline(&current.timeline, milestone_id, now_millis());
        let next_milestone_id = definition
            .milestone_after(milestone_id)
            .map(|m| m.id.as_str())
            .unwrap_or(&current.current_milestone_id);

        self.repository
            .apply_milestone_completion(&key, &timeline, milestone.percentage, next_milestone_id)
            .await?;

        Ok(Some(milestone.title.clone()))
    }

    /// Degraded path: stamp the cached record so the local timeline still
    /// reflects the check-in. The milestone title cannot be resolved here.
    fn apply_cached_fallback(&self, submission: &CheckInSubmission) {
        let Some(milestone_id) = submission.completed_milestone_id.as_deref() else {
            return;
        };
        let key = user_goal_key(&submission.user_id, &submission.goal_id);
        let Some(mut record) = self.progress_cache.get(&key) else {
            return;
        };

        let now = now_millis();
        record.timeline = stamp_timeline(&record.timeline, milestone_id, now);
        record.updated_at = now;
        self.progress_cache.set(&key, record);
    }
}

fn stamp_timeline(
    timeline: &[TimelineEntry],
    milestone_id: &str,
    completed_at: i64,
) -> Vec<TimelineEntry> {
    timeline
        .iter()
        .map(|entry| TimelineEntry {
            milestone_id: entry.milestone_id.clone(),
            completed_at: if entry.milestone_id == milestone_id {
                Some(completed_at)
            } else {
                entry.completed_at
            },
        })
        .collect()
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    /// Fetches a goal definition from the catalog.
    async fn get_goal_definition(&self, goal_id: &str) -> Result<Option<GoalDefinition>> {
        self.repository.get_goal_definition(goal_id).await
    }

    /// Lists the goals currently open for enrollment.
    async fn get_available_goals(&self) -> Vec<GoalDefinition> {
        match self.repository.list_live_goals().await {
            Ok(goals) => goals,
            Err(err) => {
                warn!("failed to fetch available goals: {err}");
                Vec::new()
            }
        }
    }

    /// Fetches the user's progress record for a goal, creating it from the
    /// goal definition on first access. `None` means the goal is
    /// unavailable, not that the user has no progress.
    async fn get_or_create_user_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Option<UserGoalProgress> {
        match self.try_get_or_create(user_id, goal_id).await {
            Ok(record) => {
                self.progress_cache
                    .set(&user_goal_key(user_id, goal_id), record.clone());
                Some(record)
            }
            Err(err) => {
                warn!("failed to get or create user goal for {user_id}/{goal_id}: {err}");
                None
            }
        }
    }

    /// Records a check-in and advances progress when a milestone was
    /// completed. Never fails: a progress-update failure degrades to the
    /// cached record rather than blocking the check-in.
    async fn submit_check_in(&self, submission: CheckInSubmission) -> CheckInOutcome {
        match self.persist_check_in(&submission).await {
            Ok(milestone_completed_name) => CheckInOutcome {
                success: true,
                milestone_completed_name,
            },
            Err(err) => {
                warn!(
                    "check-in persistence failed for {}/{}: {err}",
                    submission.user_id, submission.goal_id
                );
                self.apply_cached_fallback(&submission);
                CheckInOutcome {
                    success: true,
                    milestone_completed_name: None,
                }
            }
        }
    }

    /// The user's check-in history for a goal, newest first.
    async fn get_check_ins(&self, user_id: &str, goal_id: &str) -> Vec<CheckIn> {
        match self.repository.list_check_ins(user_id, goal_id).await {
            Ok(check_ins) => check_ins,
            Err(err) => {
                warn!("failed to fetch check-ins for {user_id}/{goal_id}: {err}");
                Vec::new()
            }
        }
    }

    async fn add_affirmation(&self, user_id: &str, text: &str) -> Option<Affirmation> {
        match self.repository.insert_affirmation(user_id, text).await {
            Ok(affirmation) => Some(affirmation),
            Err(err) => {
                warn!("failed to add affirmation for {user_id}: {err}");
                None
            }
        }
    }

    async fn get_affirmations(&self, user_id: &str) -> Vec<Affirmation> {
        match self.repository.list_affirmations(user_id).await {
            Ok(affirmations) => affirmations,
            Err(err) => {
                warn!("failed to fetch affirmations for {user_id}: {err}");
                Vec::new()
            }
        }
    }

    /// Files a request for a goal that is not in the catalog yet, or a
    /// request to join an existing one.
    async fn create_goal_request(&self, request: NewGoalRequest) -> Option<String> {
        let user_id = request.user_id.clone();
        match self.repository.insert_goal_request(request).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!("failed to create goal request for {user_id}: {err}");
                None
            }
        }
    }

    async fn join_waitlist(&self, user_id: &str, goal_id: &str) -> Option<String> {
        match self.repository.insert_waitlist_entry(user_id, goal_id).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!("failed to join waitlist for {user_id}/{goal_id}: {err}");
                None
            }
        }
    }
}

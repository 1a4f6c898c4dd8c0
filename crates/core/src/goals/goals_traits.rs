use crate::errors::Result;
use crate::goals::goals_model::{
    Affirmation, CheckIn, CheckInOutcome, CheckInSubmission, GoalDefinition, NewCheckIn,
    NewGoalRequest, TimelineEntry, UserGoalProgress,
};
use async_trait::async_trait;

/// Trait for goal repository operations.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn get_goal_definition(&self, goal_id: &str) -> Result<Option<GoalDefinition>>;
    async fn list_live_goals(&self) -> Result<Vec<GoalDefinition>>;
    async fn get_user_goal(&self, user_goal_id: &str) -> Result<Option<UserGoalProgress>>;
    async fn insert_user_goal(&self, record: &UserGoalProgress) -> Result<()>;
    async fn apply_milestone_completion(
        &self,
        user_goal_id: &str,
        timeline: &[TimelineEntry],
        progress_percent: i32,
        current_milestone_id: &str,
    ) -> Result<()>;
    async fn insert_check_in(&self, check_in: NewCheckIn) -> Result<String>;
    async fn list_check_ins(&self, user_id: &str, goal_id: &str) -> Result<Vec<CheckIn>>;
    async fn insert_affirmation(&self, user_id: &str, text: &str) -> Result<Affirmation>;
    async fn list_affirmations(&self, user_id: &str) -> Result<Vec<Affirmation>>;
    async fn insert_goal_request(&self, request: NewGoalRequest) -> Result<String>;
    async fn insert_waitlist_entry(&self, user_id: &str, goal_id: &str) -> Result<String>;
}

/// Trait for goal service operations.
///
/// Return types encode the error policy: operations that degrade return
/// their benign value directly (`Option`, `Vec`, outcome structs) and log,
/// operations that halt the caller return `Result`.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goal_definition(&self, goal_id: &str) -> Result<Option<GoalDefinition>>;
    async fn get_available_goals(&self) -> Vec<GoalDefinition>;
    async fn get_or_create_user_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Option<UserGoalProgress>;
    async fn submit_check_in(&self, submission: CheckInSubmission) -> CheckInOutcome;
    async fn get_check_ins(&self, user_id: &str, goal_id: &str) -> Vec<CheckIn>;
    async fn add_affirmation(&self, user_id: &str, text: &str) -> Option<Affirmation>;
    async fn get_affirmations(&self, user_id: &str) -> Vec<Affirmation>;
    async fn create_goal_request(&self, request: NewGoalRequest) -> Option<String>;
    async fn join_waitlist(&self, user_id: &str, goal_id: &str) -> Option<String>;
}

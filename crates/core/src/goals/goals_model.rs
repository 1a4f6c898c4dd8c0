//! Goals domain models.

use serde::{Deserialize, Serialize};

/// Document key of a user's progress record for a goal.
///
/// The key is derived, not random: every reader and writer must build it
/// through this function so the two sides cannot drift apart.
pub fn user_goal_key(user_id: &str, goal_id: &str) -> String {
    format!("{user_id}_{goal_id}")
}

/// A named checkpoint within a goal, with its completion percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub percentage: i32,
}

/// Publication state of a catalog goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Draft,
    Live,
    Paused,
    Archived,
}

/// Immutable catalog entry describing a goal and its ordered milestones.
///
/// Seeded and administered externally; read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl GoalDefinition {
    /// Looks up a milestone by id, in definition order.
    pub fn milestone(&self, milestone_id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == milestone_id)
    }

    /// The milestone following `milestone_id` in definition order, if any.
    pub fn milestone_after(&self, milestone_id: &str) -> Option<&Milestone> {
        let index = self.milestones.iter().position(|m| m.id == milestone_id)?;
        self.milestones.get(index + 1)
    }

    pub fn first_milestone(&self) -> Option<&Milestone> {
        self.milestones.first()
    }
}

/// One timeline slot per milestone of the goal definition; `completed_at`
/// stays `None` until a check-in completes the milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub milestone_id: String,
    pub completed_at: Option<i64>,
}

/// Mutable per-(user, goal) progress record, keyed by [`user_goal_key`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserGoalProgress {
    pub user_id: String,
    pub goal_id: String,
    pub start_date: i64,
    pub current_milestone_id: String,
    pub progress_percent: i32,
    pub timeline: Vec<TimelineEntry>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A stored check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub note: String,
    #[serde(default)]
    pub milestone_id: Option<String>,
    pub group_id: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: i64,
}

/// Input model for persisting a check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub user_id: String,
    pub goal_id: String,
    pub note: String,
    pub milestone_id: Option<String>,
    pub group_id: String,
    pub photo_url: Option<String>,
}

/// A user-submitted check-in, before persistence.
#[derive(Debug, Clone)]
pub struct CheckInSubmission {
    pub user_id: String,
    pub goal_id: String,
    pub group_id: Option<String>,
    pub note: String,
    pub completed_milestone_id: Option<String>,
    pub photo_url: Option<String>,
}

/// Result of a check-in submission. `success` is true even when the
/// progress update degraded; the check-in itself is what the user cares
/// about and must not be blocked on bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInOutcome {
    pub success: bool,
    pub milestone_completed_name: Option<String>,
}

/// A short self-affirmation note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Affirmation {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: i64,
}

/// What kind of goal request the user is filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalRequestKind {
    NewGoal,
    JoinGoal,
}

impl GoalRequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalRequestKind::NewGoal => "new_goal",
            GoalRequestKind::JoinGoal => "join_goal",
        }
    }
}

/// Input model for a goal request (new goal suggestion or join request).
#[derive(Debug, Clone)]
pub struct NewGoalRequest {
    pub user_id: String,
    pub requested_goal_text: String,
    pub kind: GoalRequestKind,
    pub goal_id: Option<String>,
}

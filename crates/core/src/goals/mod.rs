//! Goals module - domain models, services, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;
mod progress_cache;

#[cfg(test)]
mod goals_service_tests;

pub use goals_model::{
    user_goal_key, Affirmation, CheckIn, CheckInOutcome, CheckInSubmission, GoalDefinition,
    GoalRequestKind, GoalStatus, Milestone, NewCheckIn, NewGoalRequest, TimelineEntry,
    UserGoalProgress,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
pub use progress_cache::{InMemoryProgressCache, ProgressCache};

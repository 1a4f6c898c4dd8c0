//! Tests for GoalService contracts and the check-in error policy.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::{Error, Result, StoreError};
use crate::goals::goals_model::{
    user_goal_key, Affirmation, CheckIn, CheckInSubmission, GoalDefinition, GoalStatus, Milestone,
    NewCheckIn, NewGoalRequest, TimelineEntry, UserGoalProgress,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::goals::progress_cache::InMemoryProgressCache;
use crate::goals::GoalService;
use crate::utils::time_utils::now_millis;

// =========================================================================
// Mock GoalRepository
// =========================================================================

#[derive(Default)]
struct MockGoalRepository {
    definitions: Mutex<HashMap<String, GoalDefinition>>,
    user_goals: Mutex<HashMap<String, UserGoalProgress>>,
    check_ins: Mutex<Vec<NewCheckIn>>,
    insert_count: Mutex<usize>,
    fail_all: Mutex<bool>,
}

impl MockGoalRepository {
    fn new() -> Self {
        Self::default()
    }

    fn with_definition(self, definition: GoalDefinition) -> Self {
        self.definitions
            .lock()
            .unwrap()
            .insert(definition.id.clone(), definition);
        self
    }

    fn set_fail_all(&self, fail: bool) {
        *self.fail_all.lock().unwrap() = fail;
    }

    fn check_failure(&self) -> Result<()> {
        if *self.fail_all.lock().unwrap() {
            return Err(Error::Store(StoreError::QueryFailed(
                "intentional failure".to_string(),
            )));
        }
        Ok(())
    }

    fn stored_user_goal(&self, key: &str) -> Option<UserGoalProgress> {
        self.user_goals.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl GoalRepositoryTrait for MockGoalRepository {
    async fn get_goal_definition(&self, goal_id: &str) -> Result<Option<GoalDefinition>> {
        self.check_failure()?;
        Ok(self.definitions.lock().unwrap().get(goal_id).cloned())
    }

    async fn list_live_goals(&self) -> Result<Vec<GoalDefinition>> {
        self.check_failure()?;
        Ok(self
            .definitions
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.status == GoalStatus::Live)
            .cloned()
            .collect())
    }

    async fn get_user_goal(&self, user_goal_id: &str) -> Result<Option<UserGoalProgress>> {
        self.check_failure()?;
        Ok(self.user_goals.lock().unwrap().get(user_goal_id).cloned())
    }

    async fn insert_user_goal(&self, record: &UserGoalProgress) -> Result<()> {
        self.check_failure()?;
        *self.insert_count.lock().unwrap() += 1;
        self.user_goals.lock().unwrap().insert(
            user_goal_key(&record.user_id, &record.goal_id),
            record.clone(),
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
        self.check_failure()?;
        let mut user_goals = self.user_goals.lock().unwrap();
        let record = user_goals
            .get_mut(user_goal_id)
            .ok_or_else(|| Error::NotFound(user_goal_id.to_string()))?;
        record.timeline = timeline.to_vec();
        record.progress_percent = progress_percent;
        record.current_milestone_id = current_milestone_id.to_string();
        record.updated_at = now_millis();
        Ok(())
    }

    async fn insert_check_in(&self, check_in: NewCheckIn) -> Result<String> {
        self.check_failure()?;
        let mut check_ins = self.check_ins.lock().unwrap();
        check_ins.push(check_in);
        Ok(format!("checkin-{}", check_ins.len()))
    }

    async fn list_check_ins(&self, user_id: &str, goal_id: &str) -> Result<Vec<CheckIn>> {
        self.check_failure()?;
        Ok(self
            .check_ins
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id && c.goal_id == goal_id)
            .enumerate()
            .map(|(i, c)| CheckIn {
                id: format!("checkin-{i}"),
                user_id: c.user_id.clone(),
                goal_id: c.goal_id.clone(),
                note: c.note.clone(),
                milestone_id: c.milestone_id.clone(),
                group_id: c.group_id.clone(),
                photo_url: c.photo_url.clone(),
                created_at: now_millis(),
            })
            .collect())
    }

    async fn insert_affirmation(&self, user_id: &str, text: &str) -> Result<Affirmation> {
        self.check_failure()?;
        Ok(Affirmation {
            id: "aff-1".to_string(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            created_at: now_millis(),
        })
    }

    async fn list_affirmations(&self, _user_id: &str) -> Result<Vec<Affirmation>> {
        self.check_failure()?;
        Ok(Vec::new())
    }

    async fn insert_goal_request(&self, _request: NewGoalRequest) -> Result<String> {
        self.check_failure()?;
        Ok("request-1".to_string())
    }

    async fn insert_waitlist_entry(&self, _user_id: &str, _goal_id: &str) -> Result<String> {
        self.check_failure()?;
        Ok("waitlist-1".to_string())
    }
}

// =========================================================================
// Fixtures
// =========================================================================

fn run_5k() -> GoalDefinition {
    GoalDefinition {
        id: "run-5k".to_string(),
        name: "Run 5K".to_string(),
        description: None,
        status: GoalStatus::Live,
        milestones: vec![
            Milestone {
                id: "m1".to_string(),
                title: "Walk 1km".to_string(),
                percentage: 10,
            },
            Milestone {
                id: "m2".to_string(),
                title: "Run 1km".to_string(),
                percentage: 25,
            },
        ],
    }
}

fn service_with(repository: Arc<MockGoalRepository>) -> GoalService {
    GoalService::new(repository, Arc::new(InMemoryProgressCache::new()))
}

fn submission(milestone: Option<&str>) -> CheckInSubmission {
    CheckInSubmission {
        user_id: "u1".to_string(),
        goal_id: "run-5k".to_string(),
        group_id: Some("g1".to_string()),
        note: "I did it!".to_string(),
        completed_milestone_id: milestone.map(|m| m.to_string()),
        photo_url: None,
    }
}

// =========================================================================
// get_or_create_user_goal
// =========================================================================

#[tokio::test]
async fn get_or_create_builds_record_from_definition() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());

    let record = service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    assert_eq!(record.current_milestone_id, "m1");
    assert_eq!(record.progress_percent, 0);
    assert_eq!(record.timeline.len(), 2);
    assert!(record.timeline.iter().all(|t| t.completed_at.is_none()));
    assert!(repository.stored_user_goal("u1_run-5k").is_some());
}

#[tokio::test]
async fn get_or_create_is_stable_across_calls() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());

    let first = service.get_or_create_user_goal("u1", "run-5k").await.unwrap();
    let second = service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    assert_eq!(first.current_milestone_id, second.current_milestone_id);
    assert_eq!(first.progress_percent, second.progress_percent);
    assert_eq!(*repository.insert_count.lock().unwrap(), 1);
}

#[tokio::test]
async fn get_or_create_returns_none_for_unknown_goal() {
    let service = service_with(Arc::new(MockGoalRepository::new()));
    assert!(service.get_or_create_user_goal("u1", "missing").await.is_none());
}

#[tokio::test]
async fn get_or_create_swallows_backend_failure() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    repository.set_fail_all(true);
    let service = service_with(repository);

    assert!(service.get_or_create_user_goal("u1", "run-5k").await.is_none());
}

// =========================================================================
// submit_check_in
// =========================================================================

#[tokio::test]
async fn check_in_completing_milestone_advances_progress() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    let outcome = service.submit_check_in(submission(Some("m1"))).await;

    assert!(outcome.success);
    assert_eq!(outcome.milestone_completed_name.as_deref(), Some("Walk 1km"));

    let stored = repository.stored_user_goal("u1_run-5k").unwrap();
    assert_eq!(stored.progress_percent, 10);
    assert_eq!(stored.current_milestone_id, "m2");
    assert!(stored.timeline[0].completed_at.is_some());
    assert!(stored.timeline[1].completed_at.is_none());
}

#[tokio::test]
async fn check_in_on_last_milestone_keeps_current_pointer() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();
    service.submit_check_in(submission(Some("m1"))).await;

    let outcome = service.submit_check_in(submission(Some("m2"))).await;

    assert_eq!(outcome.milestone_completed_name.as_deref(), Some("Run 1km"));
    let stored = repository.stored_user_goal("u1_run-5k").unwrap();
    assert_eq!(stored.current_milestone_id, "m2");
    assert_eq!(stored.progress_percent, 25);
}

#[tokio::test]
async fn note_only_check_in_leaves_progress_untouched() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    let outcome = service.submit_check_in(submission(None)).await;

    assert!(outcome.success);
    assert!(outcome.milestone_completed_name.is_none());
    assert_eq!(repository.check_ins.lock().unwrap().len(), 1);
    let stored = repository.stored_user_goal("u1_run-5k").unwrap();
    assert_eq!(stored.progress_percent, 0);
    assert_eq!(stored.current_milestone_id, "m1");
}

#[tokio::test]
async fn check_in_without_group_records_unknown_group() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());

    let mut no_group = submission(None);
    no_group.group_id = None;
    service.submit_check_in(no_group).await;

    assert_eq!(repository.check_ins.lock().unwrap()[0].group_id, "unknown");
}

#[tokio::test]
async fn check_in_with_unknown_milestone_skips_progress_update() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    let outcome = service.submit_check_in(submission(Some("bogus"))).await;

    assert!(outcome.success);
    assert!(outcome.milestone_completed_name.is_none());
    let stored = repository.stored_user_goal("u1_run-5k").unwrap();
    assert_eq!(stored.progress_percent, 0);
}

#[tokio::test]
async fn progress_percent_follows_latest_completed_milestone() {
    // Percent is a direct assignment, so an out-of-order completion
    // regresses it. The normal flow only offers the current milestone.
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let service = service_with(repository.clone());
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();

    service.submit_check_in(submission(Some("m2"))).await;
    assert_eq!(repository.stored_user_goal("u1_run-5k").unwrap().progress_percent, 25);

    service.submit_check_in(submission(Some("m1"))).await;
    assert_eq!(repository.stored_user_goal("u1_run-5k").unwrap().progress_percent, 10);
}

#[tokio::test]
async fn failed_check_in_degrades_to_cached_record() {
    let repository = Arc::new(MockGoalRepository::new().with_definition(run_5k()));
    let cache = Arc::new(InMemoryProgressCache::new());
    let service = GoalService::new(repository.clone(), cache.clone());

    // Populate the cache through a successful get-or-create, then fail the
    // backend for the check-in itself.
    service.get_or_create_user_goal("u1", "run-5k").await.unwrap();
    repository.set_fail_all(true);

    let outcome = service.submit_check_in(submission(Some("m1"))).await;

    assert!(outcome.success);
    assert!(outcome.milestone_completed_name.is_none());

    use crate::goals::progress_cache::ProgressCache;
    let cached = cache.get("u1_run-5k").unwrap();
    assert!(cached.timeline[0].completed_at.is_some());
}

// =========================================================================
// Degrading reads
// =========================================================================

#[tokio::test]
async fn get_check_ins_swallows_backend_failure() {
    let repository = Arc::new(MockGoalRepository::new());
    repository.set_fail_all(true);
    let service = service_with(repository);

    assert!(service.get_check_ins("u1", "run-5k").await.is_empty());
}

#[tokio::test]
async fn get_available_goals_swallows_backend_failure() {
    let repository = Arc::new(MockGoalRepository::new());
    repository.set_fail_all(true);
    let service = service_with(repository);

    assert!(service.get_available_goals().await.is_empty());
}

#[tokio::test]
async fn goal_request_and_waitlist_swallow_to_none() {
    let repository = Arc::new(MockGoalRepository::new());
    repository.set_fail_all(true);
    let service = service_with(repository);

    let request = NewGoalRequest {
        user_id: "u1".to_string(),
        requested_goal_text: "Learn to juggle".to_string(),
        kind: crate::goals::goals_model::GoalRequestKind::NewGoal,
        goal_id: None,
    };
    assert!(service.create_goal_request(request).await.is_none());
    assert!(service.join_waitlist("u1", "run-5k").await.is_none());
    assert!(service.add_affirmation("u1", "I keep showing up").await.is_none());
}

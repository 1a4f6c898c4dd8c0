use std::collections::HashMap;
use std::sync::RwLock;

use crate::goals::goals_model::UserGoalProgress;

/// Process-local cache of progress records, keyed by the user-goal
/// document key.
///
/// The check-in path consults this when the backend is unreachable, so a
/// degraded check-in can still stamp the user's local timeline. Construct
/// one per process and pass it to [`GoalService`](super::GoalService).
pub trait ProgressCache: Send + Sync {
    fn get(&self, key: &str) -> Option<UserGoalProgress>;
    fn set(&self, key: &str, record: UserGoalProgress);
}

/// Default [`ProgressCache`] backed by a lock-guarded map.
#[derive(Default)]
pub struct InMemoryProgressCache {
    records: RwLock<HashMap<String, UserGoalProgress>>,
}

impl InMemoryProgressCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressCache for InMemoryProgressCache {
    fn get(&self, key: &str) -> Option<UserGoalProgress> {
        self.records.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, record: UserGoalProgress) {
        self.records.write().unwrap().insert(key.to_string(), record);
    }
}

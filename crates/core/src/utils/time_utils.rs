use chrono::{Duration, Utc};

/// Current instant as epoch milliseconds.
///
/// Every persisted timestamp in this workspace is an epoch-millisecond
/// integer. This is the single source of truth for producing them; use it
/// whenever a locally-stamped time needs to be comparable to a stored one.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Epoch milliseconds `days` days from now.
pub fn millis_days_from_now(days: i64) -> i64 {
    (Utc::now() + Duration::days(days)).timestamp_millis()
}

/// Member capacity of a newly created group
pub const DEFAULT_GROUP_CAPACITY: i32 = 10;

/// How many open groups an assignment scan inspects before creating a new one
pub const OPEN_GROUP_SCAN_LIMIT: usize = 5;

/// Prefix of every shareable invite code
pub const INVITE_CODE_PREFIX: &str = "TG-";

/// Number of random characters after the prefix
pub const INVITE_CODE_LENGTH: usize = 5;

/// Invite code alphabet; excludes I, O, 0 and 1 to reduce transcription ambiguity
pub const INVITE_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Days an invite stays redeemable after creation
pub const INVITE_TTL_DAYS: i64 = 7;

/// Redemption limit for a member-issued invite
pub const MEMBER_INVITE_MAX_USES: i32 = 5;

/// Redemption limit for a guide-issued invite
pub const GUIDE_INVITE_MAX_USES: i32 = 10;

/// Group id recorded on a check-in submitted without a known group
pub const UNKNOWN_GROUP_ID: &str = "unknown";

/// Placeholder group id screens fall back to when assignment is unavailable
pub const DEFAULT_GROUP_ID: &str = "group-run-5k-30min-01";

/// Group name shown when an invite's group document cannot be resolved
pub const FALLBACK_GROUP_NAME: &str = "Support Group";

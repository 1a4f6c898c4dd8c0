//! Collection names, kept in one place so readers and writers cannot
//! drift apart.

pub const GOALS: &str = "goals";
pub const USER_GOALS: &str = "userGoals";
pub const GROUPS: &str = "groups";
pub const USER_GROUPS: &str = "userGroups";
pub const GROUP_INVITES: &str = "groupInvites";
pub const CHECK_INS: &str = "checkIns";
pub const INVITE_REDEMPTIONS: &str = "inviteRedemptions";
pub const AFFIRMATIONS: &str = "affirmations";
pub const GOAL_REQUESTS: &str = "goalRequests";
pub const WAITLIST_ENTRIES: &str = "waitlistEntries";
pub const INVITES: &str = "invites";
pub const USERS: &str = "users";

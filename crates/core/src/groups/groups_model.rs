//! Group domain models.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GROUP_CAPACITY;

/// Role a user holds within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Guide,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Guide => "guide",
        }
    }
}

/// A capacity-bounded cohort of users pursuing the same goal.
///
/// `member_count` is a cached counter, not a derived value; capacity
/// defaults mirror what readers assume when the fields are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub goal_id: String,
    pub name: String,
    #[serde(default = "default_max_members")]
    pub max_members: i32,
    #[serde(default)]
    pub member_count: i32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

impl Group {
    pub fn has_capacity(&self) -> bool {
        self.member_count < self.max_members
    }
}

fn default_max_members() -> i32 {
    DEFAULT_GROUP_CAPACITY
}

fn default_is_active() -> bool {
    true
}

/// Input model for creating a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub goal_id: String,
    pub name: String,
    pub max_members: i32,
    pub member_count: i32,
    pub is_active: bool,
}

/// The relation between a user and a group, carrying a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembership {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
    pub goal_id: String,
    pub role: MemberRole,
    pub joined_at: i64,
}

/// Input model for creating a membership.
#[derive(Debug, Clone)]
pub struct NewMembership {
    pub user_id: String,
    pub group_id: String,
    pub goal_id: String,
    pub role: MemberRole,
}

/// Who issued a direct (per-user) invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviterType {
    Admin,
    Member,
    Guide,
}

/// State of a direct invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectInviteStatus {
    Pending,
    Accepted,
    Declined,
}

/// A direct invitation addressed to a specific user, accepted or declined
/// in-app (distinct from shareable code invites).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectInvite {
    pub id: String,
    pub goal_id: String,
    pub group_id: String,
    pub user_id: String,
    pub inviter_type: InviterType,
    pub status: DirectInviteStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: i64,
}

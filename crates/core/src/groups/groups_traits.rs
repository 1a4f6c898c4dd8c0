use crate::errors::Result;
use crate::groups::groups_model::{
    DirectInvite, Group, GroupMembership, MemberRole, NewGroup, NewMembership,
};
use async_trait::async_trait;

/// Trait for group and membership repository operations.
#[async_trait]
pub trait GroupRepositoryTrait: Send + Sync {
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>>;
    /// Active groups for a goal, newest first, at most `limit`.
    async fn find_open_groups(&self, goal_id: &str, limit: usize) -> Result<Vec<Group>>;
    async fn insert_group(&self, new_group: NewGroup) -> Result<String>;
    /// Atomic +1 on the group's member counter.
    async fn increment_member_count(&self, group_id: &str) -> Result<()>;

    async fn find_membership(&self, user_id: &str, goal_id: &str)
        -> Result<Option<GroupMembership>>;
    async fn find_membership_in_group(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> Result<Option<GroupMembership>>;
    async fn insert_membership(&self, new_membership: NewMembership) -> Result<String>;
    async fn set_membership_role(&self, membership_id: &str, role: MemberRole) -> Result<()>;
    async fn find_guide(&self, group_id: &str) -> Result<Option<GroupMembership>>;
    async fn is_guide(&self, user_id: &str, group_id: &str) -> Result<bool>;
    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMembership>>;

    async fn list_pending_invites(&self, user_id: &str) -> Result<Vec<DirectInvite>>;
    async fn get_direct_invite(&self, invite_id: &str) -> Result<Option<DirectInvite>>;
    async fn mark_invite_accepted(&self, invite_id: &str) -> Result<()>;
    async fn mark_invite_declined(&self, invite_id: &str) -> Result<()>;
}

/// Trait for group service operations.
///
/// Return types encode the error policy: degrading reads return their
/// benign value directly, assignment and role changes return `Result`.
#[async_trait]
pub trait GroupServiceTrait: Send + Sync {
    async fn assign_user_to_group(&self, user_id: &str, goal_id: &str) -> Result<String>;
    async fn get_group(&self, group_id: &str) -> Option<Group>;
    async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>>;
    async fn update_user_role_to_guide(
        &self,
        user_id: &str,
        group_id: &str,
        goal_id: &str,
    ) -> Result<()>;
    async fn get_group_guide(&self, group_id: &str) -> Option<GroupMembership>;
    async fn is_user_guide(&self, user_id: &str, group_id: &str) -> bool;
    async fn get_group_members(&self, group_id: &str) -> Vec<String>;
    async fn get_user_pending_invites(&self, user_id: &str) -> Vec<DirectInvite>;
    async fn respond_to_invite(&self, invite_id: &str, accept: bool) -> Result<Option<String>>;
}

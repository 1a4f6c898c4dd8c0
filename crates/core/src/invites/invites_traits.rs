use crate::errors::Result;
use crate::groups::MemberRole;
use crate::invites::invites_model::{
    GroupInvite, InviteValidation, NewGroupInvite, NewRedemptionRecord, RedemptionOutcome,
};
use async_trait::async_trait;

/// Trait for invite repository operations.
#[async_trait]
pub trait GroupInviteRepositoryTrait: Send + Sync {
    async fn insert_invite(&self, new_invite: &NewGroupInvite) -> Result<String>;
    /// Exact-match lookup by code; at most one invite is returned.
    async fn find_by_code(&self, invite_code: &str) -> Result<Option<GroupInvite>>;
    /// Atomic +1 on the invite's use counter.
    async fn increment_uses(&self, invite_id: &str) -> Result<()>;
    async fn insert_redemption(&self, record: NewRedemptionRecord) -> Result<String>;
}

/// Trait for invite service operations.
#[async_trait]
pub trait GroupInviteServiceTrait: Send + Sync {
    async fn create_group_invite(
        &self,
        user_id: &str,
        group_id: &str,
        goal_id: &str,
        role: MemberRole,
    ) -> Result<GroupInvite>;
    async fn validate_group_invite(&self, invite_code: &str) -> InviteValidation;
    async fn redeem_group_invite(&self, user_id: &str, invite_code: &str) -> RedemptionOutcome;
}

use log::{debug, error};
use std::sync::Arc;

use super::invites_model::{
    generate_invite_code, GroupInvite, InviteStatus, InviteValidation, NewGroupInvite,
    NewRedemptionRecord, RedemptionOutcome, RedemptionStatus,
};
use super::invites_traits::{GroupInviteRepositoryTrait, GroupInviteServiceTrait};
use crate::constants::{
    FALLBACK_GROUP_NAME, GUIDE_INVITE_MAX_USES, INVITE_TTL_DAYS, MEMBER_INVITE_MAX_USES,
};
use crate::errors::Result;
use crate::groups::{GroupRepositoryTrait, MemberRole, NewMembership};
use crate::utils::time_utils::{millis_days_from_now, now_millis};

/// Service for issuing and redeeming shareable group invites.
///
/// Redemption builds on the group repository's membership primitive; the
/// capacity check before the join is a plain read, so concurrent
/// redemptions racing on the same group can over-admit (the counters
/// themselves increment atomically).
pub struct GroupInviteService {
    repository: Arc<dyn GroupInviteRepositoryTrait>,
    group_repository: Arc<dyn GroupRepositoryTrait>,
}

impl GroupInviteService {
    pub fn new(
        repository: Arc<dyn GroupInviteRepositoryTrait>,
        group_repository: Arc<dyn GroupRepositoryTrait>,
    ) -> Self {
        GroupInviteService {
            repository,
            group_repository,
        }
    }

    async fn try_validate(&self, invite_code: &str) -> Result<InviteValidation> {
        let Some(invite) = self.repository.find_by_code(invite_code).await? else {
            return Ok(InviteValidation::invalid(
                "That code doesn't look active. Check it and try again.",
            ));
        };

        if invite.status != InviteStatus::Active {
            return Ok(InviteValidation::invalid("This invite is no longer active."));
        }
        if invite.expires_at < now_millis() {
            return Ok(InviteValidation::invalid("This invite has expired."));
        }
        if invite.uses_count >= invite.max_uses {
            return Ok(InviteValidation::invalid(
                "This invite has reached its limit.",
            ));
        }

        let group_name = self
            .group_repository
            .get_group(&invite.group_id)
            .await?
            .map(|group| group.name)
            .unwrap_or_else(|| FALLBACK_GROUP_NAME.to_string());

        Ok(InviteValidation::Valid { invite, group_name })
    }

    // Mirrors try_validate's condition checks; the two must stay in step,
    // but redemption deliberately avoids a second code lookup round trip.
    async fn try_redeem(&self, user_id: &str, invite_code: &str) -> Result<RedemptionOutcome> {
        let Some(invite) = self.repository.find_by_code(invite_code).await? else {
            return Ok(RedemptionOutcome::error("Invalid invite code."));
        };

        if invite.status != InviteStatus::Active {
            return Ok(RedemptionOutcome::error("Invite is no longer active."));
        }
        if invite.expires_at < now_millis() {
            return Ok(RedemptionOutcome::error("Invite has expired."));
        }
        if invite.uses_count >= invite.max_uses {
            return Ok(RedemptionOutcome::error("Invite limit reached."));
        }

        let Some(group) = self.group_repository.get_group(&invite.group_id).await? else {
            return Ok(RedemptionOutcome::error("Group not found."));
        };

        if !group.has_capacity() {
            self.repository
                .insert_redemption(NewRedemptionRecord {
                    invite_id: invite.id.clone(),
                    group_id: invite.group_id.clone(),
                    goal_id: invite.goal_id.clone(),
                    inviter_user_id: invite.created_by_user_id.clone(),
                    redeemed_by_user_id: user_id.to_string(),
                    outcome: RedemptionStatus::Full,
                })
                .await?;
            return Ok(RedemptionOutcome::full("Group is full.", &invite.goal_id));
        }

        // The one place double-redemption is guarded: an existing member
        // re-entering the same code must not bump any counter.
        if self
            .group_repository
            .find_membership_in_group(user_id, &invite.group_id)
            .await?
            .is_some()
        {
            return Ok(RedemptionOutcome::joined(
                &invite.group_id,
                &invite.goal_id,
                Some("Already a member."),
            ));
        }

        self.group_repository
            .insert_membership(NewMembership {
                user_id: user_id.to_string(),
                group_id: invite.group_id.clone(),
                goal_id: invite.goal_id.clone(),
                role: MemberRole::Member,
            })
            .await?;
        self.repository.increment_uses(&invite.id).await?;
        self.group_repository
            .increment_member_count(&invite.group_id)
            .await?;
        self.repository
            .insert_redemption(NewRedemptionRecord {
                invite_id: invite.id.clone(),
                group_id: invite.group_id.clone(),
                goal_id: invite.goal_id.clone(),
                inviter_user_id: invite.created_by_user_id.clone(),
                redeemed_by_user_id: user_id.to_string(),
                outcome: RedemptionStatus::Joined,
            })
            .await?;

        debug!("user {user_id} redeemed invite {} into group {}", invite.id, invite.group_id);
        Ok(RedemptionOutcome::joined(
            &invite.group_id,
            &invite.goal_id,
            None,
        ))
    }
}

#[async_trait::async_trait]
impl GroupInviteServiceTrait for GroupInviteService {
    /// Issues a shareable invite for a group. The returned record carries
    /// a locally-stamped creation time so the UI can show it before the
    /// write settles.
    async fn create_group_invite(
        &self,
        user_id: &str,
        group_id: &str,
        goal_id: &str,
        role: MemberRole,
    ) -> Result<GroupInvite> {
        let invite_code = generate_invite_code();
        let expires_at = millis_days_from_now(INVITE_TTL_DAYS);
        let max_uses = match role {
            MemberRole::Guide => GUIDE_INVITE_MAX_USES,
            MemberRole::Member => MEMBER_INVITE_MAX_USES,
        };

        let new_invite = NewGroupInvite {
            group_id: group_id.to_string(),
            goal_id: goal_id.to_string(),
            created_by_user_id: user_id.to_string(),
            created_by_role: role,
            expires_at,
            max_uses,
            invite_code,
        };
        let id = self.repository.insert_invite(&new_invite).await?;

        Ok(GroupInvite {
            id,
            group_id: new_invite.group_id,
            goal_id: new_invite.goal_id,
            created_by_user_id: new_invite.created_by_user_id,
            created_by_role: new_invite.created_by_role,
            status: InviteStatus::Active,
            created_at: now_millis(),
            expires_at: new_invite.expires_at,
            max_uses: new_invite.max_uses,
            uses_count: 0,
            invite_code: new_invite.invite_code,
        })
    }

    /// Checks a code without side effects, returning a user-facing message
    /// when it cannot be redeemed.
    async fn validate_group_invite(&self, invite_code: &str) -> InviteValidation {
        match self.try_validate(invite_code).await {
            Ok(validation) => validation,
            Err(err) => {
                error!("invite validation failed for code {invite_code}: {err}");
                InviteValidation::invalid("Unable to validate code.")
            }
        }
    }

    /// Redeems a code into a membership. Always returns a structured
    /// outcome; unexpected failures are logged and mapped to an error
    /// outcome rather than raised.
    async fn redeem_group_invite(&self, user_id: &str, invite_code: &str) -> RedemptionOutcome {
        match self.try_redeem(user_id, invite_code).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("invite redemption failed for code {invite_code}: {err}");
                RedemptionOutcome::error("Redemption failed.")
            }
        }
    }
}

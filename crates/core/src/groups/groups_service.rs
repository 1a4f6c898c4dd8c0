use log::{debug, warn};
use std::sync::Arc;

use super::groups_model::{
    DirectInvite, DirectInviteStatus, Group, GroupMembership, MemberRole, NewGroup, NewMembership,
};
use super::groups_traits::{GroupRepositoryTrait, GroupServiceTrait};
use crate::constants::{DEFAULT_GROUP_CAPACITY, OPEN_GROUP_SCAN_LIMIT};
use crate::errors::{Error, Result, ValidationError};
use crate::goals::GoalRepositoryTrait;

/// Service for placing users into support groups and managing roles.
pub struct GroupService {
    repository: Arc<dyn GroupRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GroupService {
    pub fn new(
        repository: Arc<dyn GroupRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        GroupService {
            repository,
            goal_repository,
        }
    }

    async fn group_name_for_goal(&self, goal_id: &str) -> String {
        let goal_name = self
            .goal_repository
            .get_goal_definition(goal_id)
            .await
            .ok()
            .flatten()
            .map(|definition| definition.name)
            .unwrap_or_else(|| "Unknown Goal".to_string());
        format!("{goal_name} Group")
    }
}

#[async_trait::async_trait]
impl GroupServiceTrait for GroupService {
    /// Places a user into a group for a goal:
    /// 1. an existing membership wins (idempotent re-invocation),
    /// 2. otherwise the newest active group with spare capacity,
    /// 3. otherwise a freshly created group.
    ///
    /// The capacity check is a plain read; two concurrent assignments can
    /// both pass it and over-admit. Reusing an open group does not bump its
    /// member counter either; only creation and invite redemption write it.
    async fn assign_user_to_group(&self, user_id: &str, goal_id: &str) -> Result<String> {
        if user_id.is_empty() || goal_id.is_empty() {
            return Err(ValidationError::MissingField("userId or goalId".to_string()).into());
        }

        if let Some(existing) = self.repository.find_membership(user_id, goal_id).await? {
            debug!(
                "user {user_id} already in group {} for goal {goal_id}",
                existing.group_id
            );
            return Ok(existing.group_id);
        }

        let candidates = self
            .repository
            .find_open_groups(goal_id, OPEN_GROUP_SCAN_LIMIT)
            .await?;
        let open_group_id = candidates
            .into_iter()
            .find(Group::has_capacity)
            .map(|group| group.id);

        let group_id = match open_group_id {
            Some(id) => id,
            None => {
                let id = self
                    .repository
                    .insert_group(NewGroup {
                        goal_id: goal_id.to_string(),
                        name: self.group_name_for_goal(goal_id).await,
                        max_members: DEFAULT_GROUP_CAPACITY,
                        member_count: 1,
                        is_active: true,
                    })
                    .await?;
                debug!("created new group {id} for goal {goal_id}");
                id
            }
        };

        self.repository
            .insert_membership(NewMembership {
                user_id: user_id.to_string(),
                group_id: group_id.clone(),
                goal_id: goal_id.to_string(),
                role: MemberRole::Member,
            })
            .await?;

        Ok(group_id)
    }

    /// Fetches a group, treating any failure as "no group".
    async fn get_group(&self, group_id: &str) -> Option<Group> {
        if group_id.is_empty() {
            return None;
        }
        match self.repository.get_group(group_id).await {
            Ok(group) => group,
            Err(err) => {
                warn!("failed to fetch group {group_id}: {err}");
                None
            }
        }
    }

    async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>> {
        self.repository.get_group(group_id).await
    }

    /// Promotes the user's membership in a group to the guide role.
    /// A missing membership is logged and ignored.
    async fn update_user_role_to_guide(
        &self,
        user_id: &str,
        group_id: &str,
        goal_id: &str,
    ) -> Result<()> {
        let membership = self
            .repository
            .find_membership(user_id, goal_id)
            .await?
            .filter(|m| m.group_id == group_id);

        match membership {
            Some(membership) => {
                self.repository
                    .set_membership_role(&membership.id, MemberRole::Guide)
                    .await?;
                debug!("updated user {user_id} to guide role in group {group_id}");
                Ok(())
            }
            None => {
                warn!("no membership found for user {user_id} in group {group_id}");
                Ok(())
            }
        }
    }

    async fn get_group_guide(&self, group_id: &str) -> Option<GroupMembership> {
        match self.repository.find_guide(group_id).await {
            Ok(guide) => guide,
            Err(err) => {
                warn!("failed to fetch guide for group {group_id}: {err}");
                None
            }
        }
    }

    async fn is_user_guide(&self, user_id: &str, group_id: &str) -> bool {
        match self.repository.is_guide(user_id, group_id).await {
            Ok(is_guide) => is_guide,
            Err(err) => {
                warn!("failed to check guide role for {user_id} in {group_id}: {err}");
                false
            }
        }
    }

    /// User ids of every member of a group; empty on failure.
    async fn get_group_members(&self, group_id: &str) -> Vec<String> {
        match self.repository.list_members(group_id).await {
            Ok(members) => members.into_iter().map(|m| m.user_id).collect(),
            Err(err) => {
                warn!("failed to fetch members of group {group_id}: {err}");
                Vec::new()
            }
        }
    }

    /// Pending direct invites addressed to the user, newest first.
    /// Sorted in memory; the backend query carries no order key.
    async fn get_user_pending_invites(&self, user_id: &str) -> Vec<DirectInvite> {
        match self.repository.list_pending_invites(user_id).await {
            Ok(mut invites) => {
                invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                invites
            }
            Err(err) => {
                warn!("failed to fetch pending invites for {user_id}: {err}");
                Vec::new()
            }
        }
    }

    /// Accepts or declines a direct invite. Accepting joins the invited
    /// user to the group and returns the group id; declining returns None.
    async fn respond_to_invite(&self, invite_id: &str, accept: bool) -> Result<Option<String>> {
        let invite = self
            .repository
            .get_direct_invite(invite_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("invite {invite_id}")))?;

        if invite.status != DirectInviteStatus::Pending {
            return Err(
                ValidationError::InvalidInput(format!("invite {invite_id} is not pending")).into(),
            );
        }

        if !accept {
            self.repository.mark_invite_declined(invite_id).await?;
            return Ok(None);
        }

        self.repository.mark_invite_accepted(invite_id).await?;
        self.repository
            .insert_membership(NewMembership {
                user_id: invite.user_id.clone(),
                group_id: invite.group_id.clone(),
                goal_id: invite.goal_id.clone(),
                role: MemberRole::Member,
            })
            .await?;
        self.repository
            .increment_member_count(&invite.group_id)
            .await?;

        debug!(
            "user {} accepted invite {invite_id} and joined group {}",
            invite.user_id, invite.group_id
        );
        Ok(Some(invite.group_id))
    }
}

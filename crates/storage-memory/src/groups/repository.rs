use async_trait::async_trait;

use crate::collections;
use crate::db::{field, Filter, MemoryStore, OrderBy, WriteField};
use crate::utils::{decode, decode_all, decode_first};
use instep_core::errors::Result;
use instep_core::groups::{
    DirectInvite, Group, GroupMembership, GroupRepositoryTrait, MemberRole, NewGroup,
    NewMembership,
};

/// Repository for group, membership, and direct-invite documents.
pub struct GroupRepository {
    store: MemoryStore,
}

impl GroupRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupRepositoryTrait for GroupRepository {
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>> {
        match self.store.get(collections::GROUPS, group_id) {
            Some(doc) => decode(group_id, doc).map(Some),
            None => Ok(None),
        }
    }

    async fn find_open_groups(&self, goal_id: &str, limit: usize) -> Result<Vec<Group>> {
        let rows = self.store.query(
            collections::GROUPS,
            &[
                Filter::eq("goalId", goal_id),
                Filter::eq("isActive", true),
            ],
            Some(OrderBy::desc("createdAt")),
            Some(limit),
        );
        decode_all(rows)
    }

    async fn insert_group(&self, new_group: NewGroup) -> Result<String> {
        let id = self.store.add(
            collections::GROUPS,
            vec![
                field("goalId", WriteField::value(new_group.goal_id)),
                field("name", WriteField::value(new_group.name)),
                field("maxMembers", WriteField::value(new_group.max_members)),
                field("memberCount", WriteField::value(new_group.member_count)),
                field("isActive", WriteField::value(new_group.is_active)),
                field("createdAt", WriteField::ServerTimestamp),
            ],
        );
        // The document carries its own id for callers that read it raw.
        self.store.set(
            collections::GROUPS,
            &id,
            vec![field("id", WriteField::value(id.as_str()))],
            true,
        );
        Ok(id)
    }

    async fn increment_member_count(&self, group_id: &str) -> Result<()> {
        self.store
            .update(
                collections::GROUPS,
                group_id,
                vec![field("memberCount", WriteField::increment(1))],
            )
            .map_err(Into::into)
    }

    async fn find_membership(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<Option<GroupMembership>> {
        let rows = self.store.query(
            collections::USER_GROUPS,
            &[Filter::eq("userId", user_id), Filter::eq("goalId", goal_id)],
            None,
            Some(1),
        );
        decode_first(rows)
    }

    async fn find_membership_in_group(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> Result<Option<GroupMembership>> {
        let rows = self.store.query(
            collections::USER_GROUPS,
            &[Filter::eq("userId", user_id), Filter::eq("groupId", group_id)],
            None,
            Some(1),
        );
        decode_first(rows)
    }

    async fn insert_membership(&self, new_membership: NewMembership) -> Result<String> {
        let id = self.store.add(
            collections::USER_GROUPS,
            vec![
                field("userId", WriteField::value(new_membership.user_id)),
                field("groupId", WriteField::value(new_membership.group_id)),
                field("goalId", WriteField::value(new_membership.goal_id)),
                field("role", WriteField::value(new_membership.role.as_str())),
                field("joinedAt", WriteField::ServerTimestamp),
            ],
        );
        Ok(id)
    }

    async fn set_membership_role(&self, membership_id: &str, role: MemberRole) -> Result<()> {
        self.store.set(
            collections::USER_GROUPS,
            membership_id,
            vec![field("role", WriteField::value(role.as_str()))],
            true,
        );
        Ok(())
    }

    async fn find_guide(&self, group_id: &str) -> Result<Option<GroupMembership>> {
        let rows = self.store.query(
            collections::USER_GROUPS,
            &[
                Filter::eq("groupId", group_id),
                Filter::eq("role", MemberRole::Guide.as_str()),
            ],
            None,
            Some(1),
        );
        decode_first(rows)
    }

    async fn is_guide(&self, user_id: &str, group_id: &str) -> Result<bool> {
        let rows = self.store.query(
            collections::USER_GROUPS,
            &[
                Filter::eq("userId", user_id),
                Filter::eq("groupId", group_id),
                Filter::eq("role", MemberRole::Guide.as_str()),
            ],
            None,
            Some(1),
        );
        Ok(!rows.is_empty())
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMembership>> {
        let rows = self.store.query(
            collections::USER_GROUPS,
            &[Filter::eq("groupId", group_id)],
            None,
            None,
        );
        decode_all(rows)
    }

    async fn list_pending_invites(&self, user_id: &str) -> Result<Vec<DirectInvite>> {
        // No order key here; the service sorts in memory.
        let rows = self.store.query(
            collections::INVITES,
            &[Filter::eq("userId", user_id), Filter::eq("status", "pending")],
            None,
            None,
        );
        decode_all(rows)
    }

    async fn get_direct_invite(&self, invite_id: &str) -> Result<Option<DirectInvite>> {
        match self.store.get(collections::INVITES, invite_id) {
            Some(doc) => decode(invite_id, doc).map(Some),
            None => Ok(None),
        }
    }

    async fn mark_invite_accepted(&self, invite_id: &str) -> Result<()> {
        self.store
            .update(
                collections::INVITES,
                invite_id,
                vec![
                    field("status", WriteField::value("accepted")),
                    field("acceptedAt", WriteField::ServerTimestamp),
                ],
            )
            .map_err(Into::into)
    }

    async fn mark_invite_declined(&self, invite_id: &str) -> Result<()> {
        self.store
            .update(
                collections::INVITES,
                invite_id,
                vec![field("status", WriteField::value("declined"))],
            )
            .map_err(Into::into)
    }
}

use async_trait::async_trait;

use crate::collections;
use crate::db::{field, Filter, MemoryStore, WriteField};
use crate::utils::decode_first;
use instep_core::errors::Result;
use instep_core::invites::{
    GroupInvite, GroupInviteRepositoryTrait, NewGroupInvite, NewRedemptionRecord,
};

/// Repository for shareable invite and redemption-log documents.
pub struct GroupInviteRepository {
    store: MemoryStore,
}

impl GroupInviteRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupInviteRepositoryTrait for GroupInviteRepository {
    async fn insert_invite(&self, new_invite: &NewGroupInvite) -> Result<String> {
        let id = self.store.add(
            collections::GROUP_INVITES,
            vec![
                field("groupId", WriteField::value(new_invite.group_id.as_str())),
                field("goalId", WriteField::value(new_invite.goal_id.as_str())),
                field(
                    "createdByUserId",
                    WriteField::value(new_invite.created_by_user_id.as_str()),
                ),
                field(
                    "createdByRole",
                    WriteField::value(new_invite.created_by_role.as_str()),
                ),
                field("status", WriteField::value("active")),
                field("createdAt", WriteField::ServerTimestamp),
                field("expiresAt", WriteField::value(new_invite.expires_at)),
                field("maxUses", WriteField::value(new_invite.max_uses)),
                field("usesCount", WriteField::value(0)),
                field("inviteCode", WriteField::value(new_invite.invite_code.as_str())),
            ],
        );
        // The document carries its own id for callers that read it raw.
        self.store.set(
            collections::GROUP_INVITES,
            &id,
            vec![field("id", WriteField::value(id.as_str()))],
            true,
        );
        Ok(id)
    }

    async fn find_by_code(&self, invite_code: &str) -> Result<Option<GroupInvite>> {
        let rows = self.store.query(
            collections::GROUP_INVITES,
            &[Filter::eq("inviteCode", invite_code)],
            None,
            Some(1),
        );
        decode_first(rows)
    }

    async fn increment_uses(&self, invite_id: &str) -> Result<()> {
        self.store
            .update(
                collections::GROUP_INVITES,
                invite_id,
                vec![field("usesCount", WriteField::increment(1))],
            )
            .map_err(Into::into)
    }

    async fn insert_redemption(&self, record: NewRedemptionRecord) -> Result<String> {
        let id = self.store.add(
            collections::INVITE_REDEMPTIONS,
            vec![
                field("inviteId", WriteField::value(record.invite_id)),
                field("groupId", WriteField::value(record.group_id)),
                field("goalId", WriteField::value(record.goal_id)),
                field("inviterUserId", WriteField::value(record.inviter_user_id)),
                field("redeemedByUserId", WriteField::value(record.redeemed_by_user_id)),
                field("redeemedAt", WriteField::ServerTimestamp),
                field("outcome", WriteField::value(record.outcome.as_str())),
            ],
        );
        Ok(id)
    }
}

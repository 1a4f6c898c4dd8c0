//! Shareable invite domain models.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH, INVITE_CODE_PREFIX};
use crate::groups::MemberRole;

/// Generates a fresh invite code, e.g. `TG-8K2P9`.
///
/// Codes are not checked for uniqueness at creation; with a 32-symbol
/// alphabet and five positions, collisions among active invites are
/// accepted as negligible.
pub fn generate_invite_code() -> String {
    let alphabet = INVITE_CODE_ALPHABET.as_bytes();
    let mut rng = rand::thread_rng();

    let mut code = String::with_capacity(INVITE_CODE_PREFIX.len() + INVITE_CODE_LENGTH);
    code.push_str(INVITE_CODE_PREFIX);
    for _ in 0..INVITE_CODE_LENGTH {
        code.push(alphabet[rng.gen_range(0..alphabet.len())] as char);
    }
    code
}

/// Whether an invite can still be redeemed. Expiry and use limits are
/// checked at validation time, not reflected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Active,
    Disabled,
}

/// A shareable, expiring, use-limited invite to a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvite {
    pub id: String,
    pub group_id: String,
    pub goal_id: String,
    pub created_by_user_id: String,
    pub created_by_role: MemberRole,
    pub status: InviteStatus,
    pub created_at: i64,
    pub expires_at: i64,
    pub max_uses: i32,
    pub uses_count: i32,
    pub invite_code: String,
}

/// Input model for creating an invite. Status starts active and the use
/// counter at zero; the repository stamps the creation time.
#[derive(Debug, Clone)]
pub struct NewGroupInvite {
    pub group_id: String,
    pub goal_id: String,
    pub created_by_user_id: String,
    pub created_by_role: MemberRole,
    pub expires_at: i64,
    pub max_uses: i32,
    pub invite_code: String,
}

/// Result of validating an invite code. Side-effect free, safe to call
/// on every keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum InviteValidation {
    Valid {
        invite: GroupInvite,
        group_name: String,
    },
    Invalid {
        message: String,
    },
}

impl InviteValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, InviteValidation::Valid { .. })
    }

    pub fn invalid(message: &str) -> Self {
        InviteValidation::Invalid {
            message: message.to_string(),
        }
    }
}

/// Terminal state of a redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Joined,
    Full,
    Error,
}

impl RedemptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionStatus::Joined => "joined",
            RedemptionStatus::Full => "full",
            RedemptionStatus::Error => "error",
        }
    }
}

/// Structured result of a redemption. Never surfaced as an error: the
/// caller always receives one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionOutcome {
    pub success: bool,
    pub status: RedemptionStatus,
    pub message: Option<String>,
    pub group_id: Option<String>,
    pub goal_id: Option<String>,
}

impl RedemptionOutcome {
    pub fn error(message: &str) -> Self {
        RedemptionOutcome {
            success: false,
            status: RedemptionStatus::Error,
            message: Some(message.to_string()),
            group_id: None,
            goal_id: None,
        }
    }

    pub fn full(message: &str, goal_id: &str) -> Self {
        RedemptionOutcome {
            success: false,
            status: RedemptionStatus::Full,
            message: Some(message.to_string()),
            group_id: None,
            goal_id: Some(goal_id.to_string()),
        }
    }

    pub fn joined(group_id: &str, goal_id: &str, message: Option<&str>) -> Self {
        RedemptionOutcome {
            success: true,
            status: RedemptionStatus::Joined,
            message: message.map(|m| m.to_string()),
            group_id: Some(group_id.to_string()),
            goal_id: Some(goal_id.to_string()),
        }
    }
}

/// Append-only audit entry for a redemption attempt.
#[derive(Debug, Clone)]
pub struct NewRedemptionRecord {
    pub invite_id: String,
    pub group_id: String,
    pub goal_id: String,
    pub inviter_user_id: String,
    pub redeemed_by_user_id: String,
    pub outcome: RedemptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert_eq!(code.len(), INVITE_CODE_PREFIX.len() + INVITE_CODE_LENGTH);
            let suffix = code.strip_prefix(INVITE_CODE_PREFIX).unwrap();
            assert!(suffix.chars().all(|c| INVITE_CODE_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn redemption_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RedemptionStatus::Joined).unwrap(), "joined");
        assert_eq!(serde_json::to_value(RedemptionStatus::Full).unwrap(), "full");
    }

    #[test]
    fn invite_serializes_with_wire_field_names() {
        let invite = GroupInvite {
            id: "i1".to_string(),
            group_id: "g1".to_string(),
            goal_id: "run-5k".to_string(),
            created_by_user_id: "u1".to_string(),
            created_by_role: MemberRole::Guide,
            status: InviteStatus::Active,
            created_at: 1000,
            expires_at: 2000,
            max_uses: 10,
            uses_count: 0,
            invite_code: "TG-AAAAA".to_string(),
        };

        let value = serde_json::to_value(&invite).unwrap();
        assert_eq!(value["inviteCode"], "TG-AAAAA");
        assert_eq!(value["usesCount"], 0);
        assert_eq!(value["createdByRole"], "guide");
        assert_eq!(value["status"], "active");
    }
}

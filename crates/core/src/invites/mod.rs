//! Shareable group invites - domain models, services, and traits.

mod invites_model;
mod invites_service;
mod invites_traits;


pub use invites_model::{
    generate_invite_code, GroupInvite, InviteStatus, InviteValidation, NewGroupInvite,
    NewRedemptionRecord, RedemptionOutcome, RedemptionStatus,
};
pub use invites_service::GroupInviteService;
pub use invites_traits::{GroupInviteRepositoryTrait, GroupInviteServiceTrait};

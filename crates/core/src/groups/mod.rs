//! Groups module - domain models, services, and traits.

mod groups_model;
mod groups_service;
mod groups_traits;


pub use groups_model::{
    DirectInvite, DirectInviteStatus, Group, GroupMembership, InviterType, MemberRole, NewGroup,
    NewMembership,
};
pub use groups_service::GroupService;
pub use groups_traits::{GroupRepositoryTrait, GroupServiceTrait};

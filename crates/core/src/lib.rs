//! InStep Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for InStep: goal catalogs
//! and per-user progress, support-group assignment, shareable group
//! invites, and user profiles. It is backend-agnostic and defines
//! repository traits that are implemented by the `storage-memory` crate.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod groups;
pub mod invites;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! Deployment identity: role instance, slot identity, and node names.
//!
//! # Caching
//!
//! - The role instance is resolved once per process ([`RoleInstance`]).
//! - The slot identity is resolved once per record ([`SlotIdentity`]).
//! - Node names are cached per identity for the process lifetime
//!   ([`NodeNameCache`]).

pub mod node_name;
pub mod role_instance;
pub mod slot;

pub use node_name::NodeNameCache;
pub use role_instance::{resolve_role_instance, RoleInstance};
pub use slot::{resolve_slot_identity, SlotIdentity};

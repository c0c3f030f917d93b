//! `warden-core`: identifiers and storage primitives shared by every crate.
//!
//! This crate contains no authorization logic and no infrastructure concerns.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, TenantScoped};
pub use error::{StoreError, StoreResult};
pub use id::{AccountId, ApplicationId, MenuId, PermissionId, RoleId, TenantCode, UnitId};

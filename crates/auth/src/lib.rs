//! `warden-auth`: multi-tenant authorization resolution.
//!
//! Decides which permissions, menus, roles and applications an account may
//! reach inside a tenant. This crate is decoupled from HTTP and storage: it
//! reads through the traits in [`store`] and never writes.

mod application;
pub mod authorize;
pub mod error;
pub mod model;
pub mod permissions;
pub mod principal;
pub mod resolver;
pub mod roles;
pub mod settings;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use authorize::{AccessExplanation, AccountState, DecisionBasis};
pub use error::AuthorityError;
pub use model::{Account, Application, Menu, Permission, Tenant, TenantApplication};
pub use permissions::{PermissionRange, RangeMode};
pub use principal::{AccountKind, PrincipalRef, PrincipalType};
pub use resolver::AuthorizationResolver;
pub use roles::{Role, RolePermission, RolePrincipal, RoleRange};
pub use settings::{AdminSettings, OfficerSettings, RoleBinding, SettingsError, SupervisorSettings};
pub use store::{AccountStore, MenuStore, PermissionStore, RoleStore, Stores, SupervisorAware, TenantDirectory};

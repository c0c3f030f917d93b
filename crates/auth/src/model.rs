//! Read models the engine consumes from its collaborators.
//!
//! These mirror the rows owned by the external persistence layer; the engine
//! never mutates them.

use serde::{Deserialize, Serialize};

use warden_core::{
    AccountId, ApplicationId, Entity, MenuId, PermissionId, TenantCode, TenantScoped,
};

pub(crate) const fn enabled_by_default() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Tenant / Application directory
// ─────────────────────────────────────────────────────────────────────────────

/// A tenant and its application leases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub code: TenantCode,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub applications: Vec<TenantApplication>,
}

impl Tenant {
    /// The lease this tenant holds on `application_id`, if any.
    pub fn lease(&self, application_id: &ApplicationId) -> Option<&TenantApplication> {
        self.applications
            .iter()
            .find(|lease| &lease.application_id == application_id)
    }
}

/// Lease relationship between a tenant and an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantApplication {
    pub application_id: ApplicationId,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Whether this is the tenant's primary (landing) application.
    #[serde(default)]
    pub primary: bool,
}

/// An application registered in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub code: String,
    pub name: String,
    /// Never serialized back out.
    #[serde(default, skip_serializing)]
    pub secret: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub context_path: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account
// ─────────────────────────────────────────────────────────────────────────────

/// A tenant-scoped account.
///
/// `admin` marks the supervisor and officer accounts, whose rights come from
/// static settings rather than roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub deleted: bool,
    pub tenant_code: TenantCode,
}

impl Account {
    /// Enabled and not soft-deleted.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.deleted
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Account {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Menu / Permission
// ─────────────────────────────────────────────────────────────────────────────

/// A node of an application's menu forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    /// Absent or blank for roots.
    #[serde(default)]
    pub parent_id: Option<MenuId>,
    pub code: String,
    pub name: String,
    pub menu_type: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i32,
    pub application_id: ApplicationId,
    pub tenant_code: TenantCode,
}

impl Menu {
    /// Parent id, treating a blank marker as "no parent".
    pub fn parent(&self) -> Option<&MenuId> {
        self.parent_id
            .as_ref()
            .filter(|parent| !parent.as_str().trim().is_empty())
    }
}

impl Entity for Menu {
    type Id = MenuId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Menu {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

/// A permission, always attached to exactly one menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub code: String,
    pub name: String,
    pub menu_id: MenuId,
    pub application_id: ApplicationId,
    pub tenant_code: TenantCode,
}

impl Entity for Permission {
    type Id = PermissionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Permission {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

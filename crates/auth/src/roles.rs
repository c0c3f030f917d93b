use serde::{Deserialize, Serialize};

use warden_core::{ApplicationId, Entity, PermissionId, RoleId, TenantCode, TenantScoped, UnitId};

use crate::model::enabled_by_default;
use crate::principal::PrincipalType;

/// A role, scoped to one application within one tenant.
///
/// Roles are the only source of rights for ordinary accounts; administrative
/// accounts never hold roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub code: String,
    pub name: String,
    pub application_id: ApplicationId,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub tenant_code: TenantCode,
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TenantScoped for Role {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

/// Grants a permission to a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolePermission {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
    pub tenant_code: TenantCode,
}

impl TenantScoped for RolePermission {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

/// Assigns a role to a subject (account, unit, department, post).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolePrincipal {
    pub role_id: RoleId,
    pub principal_id: String,
    pub principal_type: PrincipalType,
    pub tenant_code: TenantCode,
}

impl TenantScoped for RolePrincipal {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

/// Data scope attached to a role: constrains which records its holders see.
///
/// Orthogonal to permissions; permission resolution never reads these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleRange {
    pub role_id: RoleId,
    pub category: String,
    pub range_type: String,
    pub data_id: String,
    pub tenant_code: TenantCode,
}

impl TenantScoped for RoleRange {
    fn tenant_code(&self) -> &TenantCode {
        &self.tenant_code
    }
}

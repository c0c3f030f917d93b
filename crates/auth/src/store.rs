//! Read contracts the engine needs from its storage collaborators.
//!
//! Every method that touches tenant-partitioned data takes the tenant in
//! scope. Implementations own the persistence; the engine only reads.

use std::sync::Arc;

use warden_core::{AccountId, ApplicationId, MenuId, RoleId, StoreResult, TenantCode};

use crate::model::{Account, Application, Menu, Permission, Tenant};
use crate::principal::PrincipalRef;
use crate::roles::{Role, RoleRange};
use crate::settings::SupervisorSettings;

pub trait AccountStore: Send + Sync {
    fn find_by_id(&self, id: &AccountId, tenant: &TenantCode) -> StoreResult<Option<Account>>;
}

pub trait RoleStore: Send + Sync {
    /// Enabled roles of the tenant, optionally restricted to one application.
    fn find_enabled_roles(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Role>>;

    /// Ids of the roles assigned to `principal`.
    fn find_role_ids_for_principal(
        &self,
        principal: &PrincipalRef,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleId>>;

    /// Permissions linked to any of `role_ids`.
    fn find_permissions_for_roles(
        &self,
        role_ids: &[RoleId],
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>>;

    fn find_ranges_for_roles(
        &self,
        role_ids: &[RoleId],
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleRange>>;
}

pub trait PermissionStore: Send + Sync {
    /// Every permission of the tenant, optionally restricted to one application.
    fn find_permissions(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>>;
}

pub trait MenuStore: Send + Sync {
    /// Menus whose id is in `ids`, optionally restricted to one menu type.
    fn find_by_ids(
        &self,
        ids: &[MenuId],
        menu_type: Option<&str>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Menu>>;
}

/// Tenant and application directory (not tenant-partitioned itself).
pub trait TenantDirectory: Send + Sync {
    fn tenant_by_code(&self, code: &TenantCode) -> StoreResult<Option<Tenant>>;
    fn application_by_id(&self, id: &ApplicationId) -> StoreResult<Option<Application>>;
    fn application_by_code(&self, code: &str) -> StoreResult<Option<Application>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared-pointer forwarding
// ─────────────────────────────────────────────────────────────────────────────

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn find_by_id(&self, id: &AccountId, tenant: &TenantCode) -> StoreResult<Option<Account>> {
        (**self).find_by_id(id, tenant)
    }
}

impl<S> RoleStore for Arc<S>
where
    S: RoleStore + ?Sized,
{
    fn find_enabled_roles(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Role>> {
        (**self).find_enabled_roles(application, tenant)
    }

    fn find_role_ids_for_principal(
        &self,
        principal: &PrincipalRef,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleId>> {
        (**self).find_role_ids_for_principal(principal, tenant)
    }

    fn find_permissions_for_roles(
        &self,
        role_ids: &[RoleId],
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        (**self).find_permissions_for_roles(role_ids, application, tenant)
    }

    fn find_ranges_for_roles(
        &self,
        role_ids: &[RoleId],
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleRange>> {
        (**self).find_ranges_for_roles(role_ids, tenant)
    }
}

impl<S> PermissionStore for Arc<S>
where
    S: PermissionStore + ?Sized,
{
    fn find_permissions(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        (**self).find_permissions(application, tenant)
    }
}

impl<S> MenuStore for Arc<S>
where
    S: MenuStore + ?Sized,
{
    fn find_by_ids(
        &self,
        ids: &[MenuId],
        menu_type: Option<&str>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Menu>> {
        (**self).find_by_ids(ids, menu_type, tenant)
    }
}

impl<S> TenantDirectory for Arc<S>
where
    S: TenantDirectory + ?Sized,
{
    fn tenant_by_code(&self, code: &TenantCode) -> StoreResult<Option<Tenant>> {
        (**self).tenant_by_code(code)
    }

    fn application_by_id(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        (**self).application_by_id(id)
    }

    fn application_by_code(&self, code: &str) -> StoreResult<Option<Application>> {
        (**self).application_by_code(code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Supervisor synthesis
// ─────────────────────────────────────────────────────────────────────────────

/// Account store decorator that answers for the configured supervisor.
///
/// The supervisor is never persisted: a lookup of its username returns a fresh
/// account materialised for the tenant in scope, and the wrapped store is not
/// consulted.
#[derive(Debug, Clone)]
pub struct SupervisorAware<S> {
    inner: S,
    supervisor: SupervisorSettings,
}

impl<S> SupervisorAware<S> {
    pub fn new(inner: S, supervisor: SupervisorSettings) -> Self {
        Self { inner, supervisor }
    }
}

impl<S> AccountStore for SupervisorAware<S>
where
    S: AccountStore,
{
    fn find_by_id(&self, id: &AccountId, tenant: &TenantCode) -> StoreResult<Option<Account>> {
        if self.supervisor.is(id) {
            return Ok(Some(self.supervisor.materialize(tenant)));
        }
        self.inner.find_by_id(id, tenant)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// The five collaborators a resolver reads from.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub roles: Arc<dyn RoleStore>,
    pub permissions: Arc<dyn PermissionStore>,
    pub menus: Arc<dyn MenuStore>,
    pub directory: Arc<dyn TenantDirectory>,
}

impl Stores {
    /// Use one backend for every collaborator.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: AccountStore + RoleStore + PermissionStore + MenuStore + TenantDirectory + 'static,
    {
        Self {
            accounts: store.clone(),
            roles: store.clone(),
            permissions: store.clone(),
            menus: store.clone(),
            directory: store,
        }
    }
}

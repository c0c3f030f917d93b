//! In-memory implementation of every collaborator the resolver reads from.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use warden_auth::{
    Account, AccountStore, Application, Menu, MenuStore, Permission, PermissionStore,
    PrincipalRef, Role, RolePermission, RolePrincipal, RoleRange, RoleStore, Tenant,
    TenantDirectory,
};
use warden_core::{
    AccountId, ApplicationId, MenuId, PermissionId, RoleId, StoreError, StoreResult, TenantCode,
};

use super::TenantTable;

type RangeKey = (RoleId, String, String, String);

/// Tenants and applications; not tenant-partitioned.
#[derive(Debug, Default)]
struct Directory {
    tenants: HashMap<TenantCode, Tenant>,
    applications: HashMap<ApplicationId, Application>,
}

/// Tenant-isolated, thread-safe store for tests, demos and the CLI.
#[derive(Debug)]
pub struct InMemoryAuthorityStore {
    directory: RwLock<Directory>,
    accounts: TenantTable<AccountId, Account>,
    roles: TenantTable<RoleId, Role>,
    role_permissions: TenantTable<(RoleId, PermissionId), RolePermission>,
    role_principals: TenantTable<(RoleId, PrincipalRef), RolePrincipal>,
    role_ranges: TenantTable<RangeKey, RoleRange>,
    menus: TenantTable<MenuId, Menu>,
    permissions: TenantTable<PermissionId, Permission>,
}

impl InMemoryAuthorityStore {
    pub fn new() -> Self {
        Self {
            directory: RwLock::new(Directory::default()),
            accounts: TenantTable::new("account"),
            roles: TenantTable::new("role"),
            role_permissions: TenantTable::new("role_permission"),
            role_principals: TenantTable::new("role_principal"),
            role_ranges: TenantTable::new("role_range"),
            menus: TenantTable::new("menu"),
            permissions: TenantTable::new("permission"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn upsert_tenant(&self, tenant: Tenant) -> StoreResult<()> {
        let mut dir = self.directory_mut()?;
        dir.tenants.insert(tenant.code.clone(), tenant);
        Ok(())
    }

    pub fn upsert_application(&self, application: Application) -> StoreResult<()> {
        let mut dir = self.directory_mut()?;
        dir.applications.insert(application.id.clone(), application);
        Ok(())
    }

    pub fn upsert_account(&self, account: Account) -> StoreResult<()> {
        self.accounts.put(account)
    }

    pub fn upsert_role(&self, role: Role) -> StoreResult<()> {
        self.roles.put(role)
    }

    pub fn link_permission(&self, link: RolePermission) -> StoreResult<()> {
        let tenant = link.tenant_code.clone();
        let key = (link.role_id.clone(), link.permission_id.clone());
        self.role_permissions.upsert(&tenant, key, link)
    }

    pub fn assign_role(&self, assignment: RolePrincipal) -> StoreResult<()> {
        let principal = PrincipalRef {
            principal_type: assignment.principal_type,
            principal_id: assignment.principal_id.clone(),
        };
        let tenant = assignment.tenant_code.clone();
        let key = (assignment.role_id.clone(), principal);
        self.role_principals.upsert(&tenant, key, assignment)
    }

    pub fn add_range(&self, range: RoleRange) -> StoreResult<()> {
        let tenant = range.tenant_code.clone();
        let key = (
            range.role_id.clone(),
            range.category.clone(),
            range.range_type.clone(),
            range.data_id.clone(),
        );
        self.role_ranges.upsert(&tenant, key, range)
    }

    pub fn upsert_menu(&self, menu: Menu) -> StoreResult<()> {
        self.menus.put(menu)
    }

    pub fn upsert_permission(&self, permission: Permission) -> StoreResult<()> {
        self.permissions.put(permission)
    }

    /// Remove every tenant-partitioned row of `tenant`. The directory entry stays.
    pub fn clear_tenant(&self, tenant: &TenantCode) -> StoreResult<()> {
        self.accounts.clear_tenant(tenant)?;
        self.roles.clear_tenant(tenant)?;
        self.role_permissions.clear_tenant(tenant)?;
        self.role_principals.clear_tenant(tenant)?;
        self.role_ranges.clear_tenant(tenant)?;
        self.menus.clear_tenant(tenant)?;
        self.permissions.clear_tenant(tenant)?;
        tracing::debug!(%tenant, "cleared tenant rows");
        Ok(())
    }

    fn directory(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Directory>> {
        self.directory
            .read()
            .map_err(|_| StoreError::backend("directory lock poisoned"))
    }

    fn directory_mut(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Directory>> {
        self.directory
            .write()
            .map_err(|_| StoreError::backend("directory lock poisoned"))
    }
}

impl Default for InMemoryAuthorityStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator traits
// ─────────────────────────────────────────────────────────────────────────────

impl AccountStore for InMemoryAuthorityStore {
    fn find_by_id(&self, id: &AccountId, tenant: &TenantCode) -> StoreResult<Option<Account>> {
        self.accounts.get(tenant, id)
    }
}

impl RoleStore for InMemoryAuthorityStore {
    fn find_enabled_roles(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Role>> {
        self.roles.filter(tenant, |r| {
            r.enabled && application.is_none_or(|a| &r.application_id == a)
        })
    }

    fn find_role_ids_for_principal(
        &self,
        principal: &PrincipalRef,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleId>> {
        let assignments = self.role_principals.filter(tenant, |p| {
            p.principal_type == principal.principal_type && p.principal_id == principal.principal_id
        })?;
        Ok(assignments.into_iter().map(|p| p.role_id).collect())
    }

    fn find_permissions_for_roles(
        &self,
        role_ids: &[RoleId],
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        let wanted: HashSet<&RoleId> = role_ids.iter().collect();
        let linked: HashSet<PermissionId> = self
            .role_permissions
            .filter(tenant, |l| wanted.contains(&l.role_id))?
            .into_iter()
            .map(|l| l.permission_id)
            .collect();

        let permissions = self.permissions.get_many(tenant, &linked)?;
        Ok(permissions
            .into_iter()
            .filter(|p| application.is_none_or(|a| &p.application_id == a))
            .collect())
    }

    fn find_ranges_for_roles(
        &self,
        role_ids: &[RoleId],
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleRange>> {
        let wanted: HashSet<&RoleId> = role_ids.iter().collect();
        self.role_ranges.filter(tenant, |r| wanted.contains(&r.role_id))
    }
}

impl PermissionStore for InMemoryAuthorityStore {
    fn find_permissions(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        self.permissions
            .filter(tenant, |p| application.is_none_or(|a| &p.application_id == a))
    }
}

impl MenuStore for InMemoryAuthorityStore {
    fn find_by_ids(
        &self,
        ids: &[MenuId],
        menu_type: Option<&str>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Menu>> {
        let menus = self.menus.get_many(tenant, ids)?;
        Ok(menus
            .into_iter()
            .filter(|m| menu_type.is_none_or(|t| m.menu_type == t))
            .collect())
    }
}

impl TenantDirectory for InMemoryAuthorityStore {
    fn tenant_by_code(&self, code: &TenantCode) -> StoreResult<Option<Tenant>> {
        Ok(self.directory()?.tenants.get(code).cloned())
    }

    fn application_by_id(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        Ok(self.directory()?.applications.get(id).cloned())
    }

    fn application_by_code(&self, code: &str) -> StoreResult<Option<Application>> {
        Ok(self
            .directory()?
            .applications
            .values()
            .find(|a| a.code == code)
            .cloned())
    }
}

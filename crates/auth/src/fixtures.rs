//! Vec-backed collaborator fakes for resolver unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use warden_core::{
    AccountId, ApplicationId, MenuId, PermissionId, RoleId, StoreError, StoreResult, TenantCode,
};

use crate::model::{Account, Application, Menu, Permission, Tenant};
use crate::principal::{PrincipalRef, PrincipalType};
use crate::resolver::AuthorizationResolver;
use crate::roles::{Role, RolePermission, RolePrincipal, RoleRange};
use crate::settings::AdminSettings;
use crate::store::{AccountStore, MenuStore, PermissionStore, RoleStore, Stores, TenantDirectory};

pub const APP: &str = "dashboard";

#[derive(Default)]
pub struct Fixture {
    pub tenants: Vec<Tenant>,
    pub applications: Vec<Application>,
    pub accounts: Vec<Account>,
    pub roles: Vec<Role>,
    pub role_permissions: Vec<RolePermission>,
    pub role_principals: Vec<RolePrincipal>,
    pub role_ranges: Vec<RoleRange>,
    pub menus: Vec<Menu>,
    pub permissions: Vec<Permission>,
    /// Ignore the tenant argument on menu reads (simulates a leaky backend).
    pub leak_menus: bool,
    pub fail_menus: bool,
    pub menu_reads: AtomicUsize,
}

impl Fixture {
    pub fn resolver(self, settings: AdminSettings) -> AuthorizationResolver {
        self.into_shared(settings).1
    }

    pub fn into_shared(self, settings: AdminSettings) -> (Arc<Self>, AuthorizationResolver) {
        let shared = Arc::new(self);
        let resolver = AuthorizationResolver::new(Stores::shared(shared.clone()), settings);
        (shared, resolver)
    }

    pub fn account(&mut self, id: &str, tenant: &str, admin: bool) -> &mut Self {
        self.accounts.push(Account {
            id: AccountId::from(id),
            username: id.to_string(),
            email: None,
            name: id.to_string(),
            admin,
            enabled: true,
            deleted: false,
            tenant_code: TenantCode::from(tenant),
        });
        self
    }

    pub fn menu(&mut self, id: &str, parent: Option<&str>, tenant: &str) -> &mut Self {
        self.menus.push(Menu {
            id: MenuId::from(id),
            parent_id: parent.map(MenuId::from),
            code: id.to_string(),
            name: id.to_string(),
            menu_type: "BACKEND".to_string(),
            enabled: true,
            order: 0,
            application_id: ApplicationId::from(APP),
            tenant_code: TenantCode::from(tenant),
        });
        self
    }

    pub fn permission(&mut self, code: &str, menu: &str, tenant: &str) -> &mut Self {
        self.permissions.push(Permission {
            id: PermissionId::from(format!("{tenant}:{code}")),
            code: code.to_string(),
            name: code.to_string(),
            menu_id: MenuId::from(menu),
            application_id: ApplicationId::from(APP),
            tenant_code: TenantCode::from(tenant),
        });
        self
    }

    /// A role granting `codes`, assigned to `holder`.
    pub fn role(&mut self, id: &str, tenant: &str, codes: &[&str], holder: Option<&str>) -> &mut Self {
        self.roles.push(Role {
            id: RoleId::from(id),
            code: id.to_string(),
            name: id.to_string(),
            application_id: ApplicationId::from(APP),
            unit_id: None,
            enabled: true,
            tenant_code: TenantCode::from(tenant),
        });
        for code in codes {
            self.role_permissions.push(RolePermission {
                role_id: RoleId::from(id),
                permission_id: PermissionId::from(format!("{tenant}:{code}")),
                tenant_code: TenantCode::from(tenant),
            });
        }
        if let Some(holder) = holder {
            self.role_principals.push(RolePrincipal {
                role_id: RoleId::from(id),
                principal_id: holder.to_string(),
                principal_type: PrincipalType::Account,
                tenant_code: TenantCode::from(tenant),
            });
        }
        self
    }
}

impl AccountStore for Fixture {
    fn find_by_id(&self, id: &AccountId, tenant: &TenantCode) -> StoreResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| &a.id == id && &a.tenant_code == tenant)
            .cloned())
    }
}

impl RoleStore for Fixture {
    fn find_enabled_roles(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|r| &r.tenant_code == tenant && r.enabled)
            .filter(|r| application.is_none_or(|a| &r.application_id == a))
            .cloned()
            .collect())
    }

    fn find_role_ids_for_principal(
        &self,
        principal: &PrincipalRef,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleId>> {
        Ok(self
            .role_principals
            .iter()
            .filter(|p| &p.tenant_code == tenant)
            .filter(|p| p.principal_type == principal.principal_type && p.principal_id == principal.principal_id)
            .map(|p| p.role_id.clone())
            .collect())
    }

    fn find_permissions_for_roles(
        &self,
        role_ids: &[RoleId],
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        let linked: Vec<&PermissionId> = self
            .role_permissions
            .iter()
            .filter(|l| &l.tenant_code == tenant && role_ids.contains(&l.role_id))
            .map(|l| &l.permission_id)
            .collect();
        Ok(self
            .permissions
            .iter()
            .filter(|p| &p.tenant_code == tenant && linked.contains(&&p.id))
            .filter(|p| application.is_none_or(|a| &p.application_id == a))
            .cloned()
            .collect())
    }

    fn find_ranges_for_roles(
        &self,
        role_ids: &[RoleId],
        tenant: &TenantCode,
    ) -> StoreResult<Vec<RoleRange>> {
        Ok(self
            .role_ranges
            .iter()
            .filter(|r| &r.tenant_code == tenant && role_ids.contains(&r.role_id))
            .cloned()
            .collect())
    }
}

impl PermissionStore for Fixture {
    fn find_permissions(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Permission>> {
        Ok(self
            .permissions
            .iter()
            .filter(|p| &p.tenant_code == tenant)
            .filter(|p| application.is_none_or(|a| &p.application_id == a))
            .cloned()
            .collect())
    }
}

impl MenuStore for Fixture {
    fn find_by_ids(
        &self,
        ids: &[MenuId],
        menu_type: Option<&str>,
        tenant: &TenantCode,
    ) -> StoreResult<Vec<Menu>> {
        self.menu_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_menus {
            return Err(StoreError::unavailable("menu table offline"));
        }
        Ok(self
            .menus
            .iter()
            .filter(|m| self.leak_menus || &m.tenant_code == tenant)
            .filter(|m| ids.contains(&m.id))
            .filter(|m| menu_type.is_none_or(|t| m.menu_type == t))
            .cloned()
            .collect())
    }
}

impl TenantDirectory for Fixture {
    fn tenant_by_code(&self, code: &TenantCode) -> StoreResult<Option<Tenant>> {
        Ok(self.tenants.iter().find(|t| &t.code == code).cloned())
    }

    fn application_by_id(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        Ok(self.applications.iter().find(|a| &a.id == id).cloned())
    }

    fn application_by_code(&self, code: &str) -> StoreResult<Option<Application>> {
        Ok(self.applications.iter().find(|a| a.code == code).cloned())
    }
}

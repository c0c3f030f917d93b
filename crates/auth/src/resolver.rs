//! Authorization resolution: which permissions, roles and menus an account
//! holds inside one tenant.
//!
//! Every call recomputes from the stores; nothing is cached between calls and
//! the resolver holds no mutable state, so one instance can be shared across
//! threads behind an `Arc`.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use warden_core::{AccountId, ApplicationId, MenuId, RoleId, StoreError, TenantCode, TenantScoped};

use crate::error::AuthorityError;
use crate::model::{Account, Menu, Permission};
use crate::principal::{AccountKind, PrincipalRef};
use crate::roles::{Role, RoleRange};
use crate::settings::{AdminSettings, OfficerSettings, RoleBinding};
use crate::store::{
    AccountStore, MenuStore, PermissionStore, RoleStore, Stores, SupervisorAware, TenantDirectory,
};

/// An account after lookup, classified by how it obtains rights.
#[derive(Debug, Clone)]
pub(crate) enum Subject {
    Absent,
    /// Disabled or deleted; `kind` is what the account would be if active.
    Inactive {
        account: Account,
        kind: AccountKind,
    },
    Supervisor(Account),
    Officer {
        account: Account,
        entry: Option<OfficerSettings>,
    },
    Member(Account),
}

impl Subject {
    pub(crate) fn account(&self) -> Option<&Account> {
        match self {
            Subject::Absent => None,
            Subject::Inactive { account, .. }
            | Subject::Supervisor(account)
            | Subject::Member(account)
            | Subject::Officer { account, .. } => Some(account),
        }
    }

    pub(crate) fn kind(&self) -> Option<AccountKind> {
        match self {
            Subject::Absent => None,
            Subject::Supervisor(_) => Some(AccountKind::Supervisor),
            Subject::Officer { .. } => Some(AccountKind::Officer),
            Subject::Member(_) => Some(AccountKind::Member),
            Subject::Inactive { kind, .. } => Some(*kind),
        }
    }
}

/// Resolves the rights of accounts against externally owned data.
pub struct AuthorizationResolver {
    pub(crate) accounts: SupervisorAware<Arc<dyn AccountStore>>,
    pub(crate) roles: Arc<dyn RoleStore>,
    pub(crate) permissions: Arc<dyn PermissionStore>,
    pub(crate) menus: Arc<dyn MenuStore>,
    pub(crate) directory: Arc<dyn TenantDirectory>,
    pub(crate) settings: Arc<AdminSettings>,
}

impl AuthorizationResolver {
    pub fn new(stores: Stores, settings: AdminSettings) -> Self {
        Self::with_shared_settings(stores, Arc::new(settings))
    }

    pub fn with_shared_settings(stores: Stores, settings: Arc<AdminSettings>) -> Self {
        Self {
            accounts: SupervisorAware::new(stores.accounts, settings.supervisor.clone()),
            roles: stores.roles,
            permissions: stores.permissions,
            menus: stores.menus,
            directory: stores.directory,
            settings,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Permissions granted to `account_id` in `tenant`.
    ///
    /// An unknown, disabled or deleted account resolves to an empty list, as
    /// does an admin account without a matching officer entry. Results carry no
    /// duplicate ids and are sorted by code.
    pub fn find_permissions(
        &self,
        account_id: &AccountId,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Permission>, AuthorityError> {
        let subject = self.resolve_subject(account_id, tenant)?;
        let roles = self.roles_for(&subject, application, tenant)?;
        self.permissions_for(&subject, &roles, application, tenant)
    }

    /// Roles held by `account_id`. Always empty for administrative accounts.
    pub fn find_roles(
        &self,
        account_id: &AccountId,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Role>, AuthorityError> {
        let subject = self.resolve_subject(account_id, tenant)?;
        self.roles_for(&subject, application, tenant)
    }

    /// Data ranges attached to the roles held by `account_id`.
    pub fn find_ranges(
        &self,
        account_id: &AccountId,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<RoleRange>, AuthorityError> {
        let subject = self.resolve_subject(account_id, tenant)?;
        let roles = self.roles_for(&subject, application, tenant)?;
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let ids = role_ids(&roles);
        let ranges = self.roles.find_ranges_for_roles(&ids, tenant)?;
        ensure_tenant(&ranges, tenant, "role range")?;

        let wanted: HashSet<&RoleId> = ids.iter().collect();
        let mut ranges: Vec<RoleRange> = ranges
            .into_iter()
            .filter(|r| wanted.contains(&r.role_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        ranges.sort_by(|a, b| {
            (&a.role_id, &a.category, &a.range_type, &a.data_id)
                .cmp(&(&b.role_id, &b.category, &b.range_type, &b.data_id))
        });
        Ok(ranges)
    }

    /// Menus visible to `account_id`: the owners of its permissions plus every
    /// ancestor up to the roots.
    ///
    /// A blank `menu_type` means "any type". When a type is given, an ancestor
    /// of another type ends the walk along that branch.
    pub fn find_menus(
        &self,
        account_id: &AccountId,
        menu_type: Option<&str>,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Menu>, AuthorityError> {
        let permissions = self.find_permissions(account_id, application, tenant)?;
        let menu_type = menu_type.map(str::trim).filter(|t| !t.is_empty());
        self.menu_closure(permissions.into_iter().map(|p| p.menu_id), menu_type, tenant)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn resolve_subject(
        &self,
        account_id: &AccountId,
        tenant: &TenantCode,
    ) -> Result<Subject, AuthorityError> {
        let Some(account) = self.accounts.find_by_id(account_id, tenant)? else {
            tracing::debug!(%tenant, account = %account_id, "account not found; no rights");
            return Ok(Subject::Absent);
        };
        ensure_tenant(std::slice::from_ref(&account), tenant, "account")?;

        let kind = if !account.admin {
            AccountKind::Member
        } else if self.settings.is_supervisor(&account.id) {
            AccountKind::Supervisor
        } else {
            AccountKind::Officer
        };

        if !account.is_active() {
            tracing::debug!(%tenant, account = %account_id, ?kind, "account inactive; no rights");
            return Ok(Subject::Inactive { account, kind });
        }

        Ok(match kind {
            AccountKind::Member => Subject::Member(account),
            AccountKind::Supervisor => Subject::Supervisor(account),
            AccountKind::Officer => {
                let entry = self.settings.officer(&account.username).cloned();
                Subject::Officer { account, entry }
            }
        })
    }

    pub(crate) fn roles_for(
        &self,
        subject: &Subject,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Role>, AuthorityError> {
        let Subject::Member(account) = subject else {
            return Ok(Vec::new());
        };

        let mut roles = self.roles.find_enabled_roles(application, tenant)?;
        ensure_tenant(&roles, tenant, "role")?;
        roles.retain(|r| r.enabled && in_application(&r.application_id, application));

        if self.settings.role_binding == RoleBinding::Principal {
            let principal = PrincipalRef::account(&account.id);
            let assigned: HashSet<RoleId> = self
                .roles
                .find_role_ids_for_principal(&principal, tenant)?
                .into_iter()
                .collect();
            roles.retain(|r| assigned.contains(&r.id));
        }

        let mut seen = HashSet::new();
        roles.retain(|r| seen.insert(r.id.clone()));
        roles.sort_by(|a, b| (&a.code, &a.id).cmp(&(&b.code, &b.id)));

        tracing::debug!(
            %tenant,
            account = %account.id,
            binding = ?self.settings.role_binding,
            roles = roles.len(),
            "resolved roles"
        );
        Ok(roles)
    }

    pub(crate) fn permissions_for(
        &self,
        subject: &Subject,
        roles: &[Role],
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Permission>, AuthorityError> {
        let permissions = match subject {
            Subject::Absent | Subject::Inactive { .. } => Vec::new(),
            Subject::Supervisor(_) => self.scoped_permissions(application, tenant)?,
            Subject::Officer { account, entry: None } => {
                tracing::warn!(
                    %tenant,
                    username = %account.username,
                    "admin account has no officer entry; granting nothing"
                );
                Vec::new()
            }
            Subject::Officer {
                account,
                entry: Some(officer),
            } => {
                if officer.enabled {
                    officer
                        .permissions
                        .restrict(self.scoped_permissions(application, tenant)?)
                } else {
                    tracing::debug!(%tenant, username = %account.username, "officer disabled");
                    Vec::new()
                }
            }
            Subject::Member(_) if roles.is_empty() => Vec::new(),
            Subject::Member(_) => {
                let ids = role_ids(roles);
                let permissions = self
                    .roles
                    .find_permissions_for_roles(&ids, application, tenant)?;
                ensure_tenant(&permissions, tenant, "permission")?;
                permissions
                    .into_iter()
                    .filter(|p| in_application(&p.application_id, application))
                    .collect()
            }
        };

        Ok(distinct_permissions(permissions))
    }

    fn scoped_permissions(
        &self,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
    ) -> Result<Vec<Permission>, AuthorityError> {
        let permissions = self.permissions.find_permissions(application, tenant)?;
        ensure_tenant(&permissions, tenant, "permission")?;
        Ok(permissions
            .into_iter()
            .filter(|p| in_application(&p.application_id, application))
            .collect())
    }

    /// Upward closure of `seeds` through the menu forest.
    ///
    /// One store read per tree level. An id is requested at most once per call,
    /// so shared ancestors are fetched once and malformed (cyclic) data still
    /// terminates.
    pub(crate) fn menu_closure(
        &self,
        seeds: impl IntoIterator<Item = MenuId>,
        menu_type: Option<&str>,
        tenant: &TenantCode,
    ) -> Result<Vec<Menu>, AuthorityError> {
        let mut resolved: HashMap<MenuId, Menu> = HashMap::new();
        let mut requested: HashSet<MenuId> = HashSet::new();
        let mut pending: BTreeSet<MenuId> = seeds.into_iter().collect();
        let mut levels = 0usize;

        while !pending.is_empty() {
            levels += 1;
            let ids: Vec<MenuId> = pending.iter().cloned().collect();
            requested.extend(ids.iter().cloned());

            let fetched = self.menus.find_by_ids(&ids, menu_type, tenant)?;
            ensure_tenant(&fetched, tenant, "menu")?;

            let mut next = BTreeSet::new();
            for menu in fetched {
                if !pending.contains(&menu.id) {
                    continue;
                }
                if menu_type.is_some_and(|t| menu.menu_type != t) {
                    continue;
                }
                if let Some(parent) = menu.parent() {
                    if requested.contains(parent) {
                        tracing::debug!(%tenant, menu = %menu.id, %parent, "ancestor already visited");
                    } else {
                        next.insert(parent.clone());
                    }
                }
                resolved.entry(menu.id.clone()).or_insert(menu);
            }

            pending = next;
        }

        tracing::debug!(%tenant, menus = resolved.len(), levels, "resolved menu closure");

        let mut menus: Vec<Menu> = resolved.into_values().collect();
        menus.sort_by(compare_menus);
        Ok(menus)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn role_ids(roles: &[Role]) -> Vec<RoleId> {
    roles.iter().map(|r| r.id.clone()).collect()
}

fn in_application(candidate: &ApplicationId, scope: Option<&ApplicationId>) -> bool {
    scope.is_none_or(|wanted| candidate == wanted)
}

/// Reject rows a store returned for another tenant.
fn ensure_tenant<T: TenantScoped>(
    rows: &[T],
    tenant: &TenantCode,
    what: &str,
) -> Result<(), StoreError> {
    match rows.iter().find(|row| !row.belongs_to(tenant)) {
        Some(row) => Err(StoreError::tenant_isolation(format!(
            "{what} of tenant '{}' returned for tenant '{tenant}'",
            row.tenant_code()
        ))),
        None => Ok(()),
    }
}

fn distinct_permissions(permissions: Vec<Permission>) -> Vec<Permission> {
    let mut seen = HashSet::new();
    let mut permissions: Vec<Permission> = permissions
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    permissions.sort_by(|a, b| (&a.code, &a.id).cmp(&(&b.code, &b.id)));
    permissions
}

fn compare_menus(a: &Menu, b: &Menu) -> Ordering {
    (a.order, &a.code, &a.id).cmp(&(b.order, &b.code, &b.id))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering as AtomicOrdering;

    use super::*;
    use crate::fixtures::{APP, Fixture};
    use crate::permissions::PermissionRange;
    use crate::settings::{DEFAULT_SUPERVISOR, OfficerSettings};

    fn master() -> TenantCode {
        TenantCode::from("master")
    }

    fn officer(username: &str, range: PermissionRange) -> OfficerSettings {
        OfficerSettings {
            username: username.to_string(),
            email: None,
            name: username.to_string(),
            enabled: true,
            permissions: range,
        }
    }

    fn codes(perms: &[Permission]) -> Vec<&str> {
        perms.iter().map(|p| p.code.as_str()).collect()
    }

    fn menu_ids(menus: &[Menu]) -> Vec<&str> {
        let mut ids: Vec<&str> = menus.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids
    }

    /// Menu tree root → mid → leaf with three permissions on the leaf, in
    /// both `master` and `other`.
    fn menu_universe() -> Fixture {
        let mut fx = Fixture::default();
        for tenant in ["master", "other"] {
            fx.menu("root", None, tenant)
                .menu("mid", Some("root"), tenant)
                .menu("leaf", Some("mid"), tenant)
                .permission("menu.view", "leaf", tenant)
                .permission("menu.edit", "leaf", tenant)
                .permission("menu.delete", "leaf", tenant);
        }
        fx
    }

    #[test]
    fn unknown_account_has_no_rights() {
        let resolver = menu_universe().resolver(AdminSettings::default());
        let perms = resolver
            .find_permissions(&AccountId::from("ghost"), None, &master())
            .unwrap();
        assert!(perms.is_empty());
    }

    #[test]
    fn inactive_account_has_no_rights() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .role("r1", "master", &["menu.view"], Some("alice"));
        fx.accounts[0].deleted = true;
        let resolver = fx.resolver(AdminSettings::default());

        let alice = AccountId::from("alice");
        assert!(resolver.find_permissions(&alice, None, &master()).unwrap().is_empty());
        assert!(resolver.find_roles(&alice, None, &master()).unwrap().is_empty());
    }

    #[test]
    fn supervisor_gets_every_permission_of_the_tenant() {
        let mut fx = menu_universe();
        fx.permission("other.only", "leaf", "other");
        let resolver = fx.resolver(AdminSettings::default());

        let perms = resolver
            .find_permissions(&AccountId::from(DEFAULT_SUPERVISOR), None, &master())
            .unwrap();
        assert_eq!(codes(&perms), vec!["menu.delete", "menu.edit", "menu.view"]);
        assert!(perms.iter().all(|p| p.tenant_code == master()));

        let roles = resolver
            .find_roles(&AccountId::from(DEFAULT_SUPERVISOR), None, &master())
            .unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn supervisor_respects_application_filter() {
        let resolver = menu_universe().resolver(AdminSettings::default());
        let other_app = ApplicationId::from("identity");

        let perms = resolver
            .find_permissions(&AccountId::from(DEFAULT_SUPERVISOR), Some(&other_app), &master())
            .unwrap();
        assert!(perms.is_empty());

        let perms = resolver
            .find_permissions(
                &AccountId::from(DEFAULT_SUPERVISOR),
                Some(&ApplicationId::from(APP)),
                &master(),
            )
            .unwrap();
        assert_eq!(perms.len(), 3);
    }

    #[test]
    fn officer_deny_list_scenario() {
        let mut fx = menu_universe();
        fx.account("officer1", "master", true);
        let settings = AdminSettings::default()
            .with_officer("security", officer("officer1", PermissionRange::deny(["menu.delete"])));
        let resolver = fx.resolver(settings);

        let perms = resolver
            .find_permissions(&AccountId::from("officer1"), None, &master())
            .unwrap();
        assert_eq!(codes(&perms), vec!["menu.edit", "menu.view"]);
    }

    #[test]
    fn officer_allow_list_takes_precedence() {
        let mut fx = menu_universe();
        fx.account("officer1", "master", true);
        let range = PermissionRange {
            includes: vec!["menu.view".to_string()],
            excludes: vec!["menu.view".to_string(), "menu.edit".to_string()],
        };
        let settings = AdminSettings::default().with_officer("audit", officer("officer1", range));
        let resolver = fx.resolver(settings);

        let perms = resolver
            .find_permissions(&AccountId::from("officer1"), None, &master())
            .unwrap();
        assert_eq!(codes(&perms), vec!["menu.view"]);
    }

    #[test]
    fn unconfigured_or_disabled_officer_fails_closed() {
        let mut fx = menu_universe();
        fx.account("stray", "master", true).account("retired", "master", true);
        let mut retired = officer("retired", PermissionRange::default());
        retired.enabled = false;
        let resolver = fx.resolver(AdminSettings::default().with_officer("old", retired));

        for id in ["stray", "retired"] {
            let account = AccountId::from(id);
            assert!(resolver.find_permissions(&account, None, &master()).unwrap().is_empty());
            assert!(resolver.find_roles(&account, None, &master()).unwrap().is_empty());
        }
    }

    #[test]
    fn member_union_has_no_duplicates() {
        let mut fx = Fixture::default();
        fx.menu("root", None, "master");
        for code in ["p1", "p2", "p3", "p4"] {
            fx.permission(code, "root", "master");
        }
        fx.account("alice", "master", false)
            .role("r1", "master", &["p1", "p2"], Some("alice"))
            .role("r2", "master", &["p2", "p3"], Some("alice"));
        let resolver = fx.resolver(AdminSettings::default());

        let perms = resolver
            .find_permissions(&AccountId::from("alice"), None, &master())
            .unwrap();
        assert_eq!(codes(&perms), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn principal_binding_only_counts_assigned_roles() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .role("viewer", "master", &["menu.view"], Some("alice"))
            .role("editor", "master", &["menu.edit"], Some("bob"))
            .role("orphan", "master", &["menu.delete"], None);

        let (store, resolver) = fx.into_shared(AdminSettings::default());
        let alice = AccountId::from("alice");
        let roles = resolver.find_roles(&alice, None, &master()).unwrap();
        assert_eq!(roles.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(), vec!["viewer"]);

        let wide = AuthorizationResolver::new(
            Stores::shared(store),
            AdminSettings::default().with_role_binding(RoleBinding::Application),
        );
        let perms = wide.find_permissions(&alice, None, &master()).unwrap();
        assert_eq!(codes(&perms), vec!["menu.delete", "menu.edit", "menu.view"]);
    }

    #[test]
    fn disabled_roles_grant_nothing() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .role("viewer", "master", &["menu.view"], Some("alice"));
        fx.roles[0].enabled = false;
        let resolver = fx.resolver(AdminSettings::default());

        let perms = resolver
            .find_permissions(&AccountId::from("alice"), None, &master())
            .unwrap();
        assert!(perms.is_empty());
    }

    #[test]
    fn tenant_isolation_with_identical_ids() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .account("alice", "other", false)
            .role("r1", "master", &["menu.view"], Some("alice"))
            .role("r1", "other", &["menu.view", "menu.edit", "menu.delete"], Some("alice"));
        let resolver = fx.resolver(AdminSettings::default());

        let alice = AccountId::from("alice");
        let perms = resolver.find_permissions(&alice, None, &master()).unwrap();
        assert_eq!(codes(&perms), vec!["menu.view"]);
        assert!(perms.iter().all(|p| p.tenant_code == master()));

        let menus = resolver.find_menus(&alice, None, None, &master()).unwrap();
        assert!(menus.iter().all(|m| m.tenant_code == master()));
    }

    #[test]
    fn foreign_rows_from_a_store_are_rejected() {
        let mut fx = Fixture::default();
        fx.menu("root", None, "other").permission("p1", "root", "master");
        fx.leak_menus = true;
        let resolver = fx.resolver(AdminSettings::default());

        let err = resolver
            .find_menus(&AccountId::from(DEFAULT_SUPERVISOR), None, None, &master())
            .unwrap_err();
        assert!(matches!(err, AuthorityError::Store(StoreError::TenantIsolation(_))));
    }

    #[test]
    fn menu_closure_reaches_every_ancestor() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .role("viewer", "master", &["menu.view"], Some("alice"));
        let (store, resolver) = fx.into_shared(AdminSettings::default());

        let alice = AccountId::from("alice");
        let first = resolver.find_menus(&alice, None, None, &master()).unwrap();
        assert_eq!(menu_ids(&first), vec!["leaf", "mid", "root"]);
        assert_eq!(store.menu_reads.load(AtomicOrdering::SeqCst), 3);

        let second = resolver.find_menus(&alice, None, None, &master()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shared_ancestors_are_fetched_once() {
        let mut fx = Fixture::default();
        fx.menu("root", None, "master")
            .menu("a", Some("root"), "master")
            .menu("b", Some("root"), "master")
            .permission("on.root", "root", "master")
            .permission("on.a", "a", "master")
            .permission("on.b", "b", "master");
        let resolver = fx.resolver(AdminSettings::default());

        let menus = resolver
            .find_menus(&AccountId::from(DEFAULT_SUPERVISOR), None, None, &master())
            .unwrap();
        assert_eq!(menu_ids(&menus), vec!["a", "b", "root"]);
    }

    #[test]
    fn menu_type_filter_stops_the_walk() {
        let mut fx = menu_universe();
        fx.menus[1].menu_type = "FRONTEND".to_string();
        let resolver = fx.resolver(AdminSettings::default());
        let supervisor = AccountId::from(DEFAULT_SUPERVISOR);

        let menus = resolver
            .find_menus(&supervisor, Some("BACKEND"), None, &master())
            .unwrap();
        assert_eq!(menu_ids(&menus), vec!["leaf"]);

        let any = resolver.find_menus(&supervisor, Some("  "), None, &master()).unwrap();
        assert_eq!(menu_ids(&any), vec!["leaf", "mid", "root"]);
    }

    #[test]
    fn cyclic_menus_terminate() {
        let mut fx = Fixture::default();
        fx.menu("x", Some("y"), "master")
            .menu("y", Some("x"), "master")
            .permission("loop", "x", "master");
        let resolver = fx.resolver(AdminSettings::default());

        let menus = resolver
            .find_menus(&AccountId::from(DEFAULT_SUPERVISOR), None, None, &master())
            .unwrap();
        assert_eq!(menu_ids(&menus), vec!["x", "y"]);
    }

    #[test]
    fn store_errors_propagate() {
        let mut fx = menu_universe();
        fx.fail_menus = true;
        let resolver = fx.resolver(AdminSettings::default());

        let err = resolver
            .find_menus(&AccountId::from(DEFAULT_SUPERVISOR), None, None, &master())
            .unwrap_err();
        assert_eq!(err, AuthorityError::Store(StoreError::unavailable("menu table offline")));
    }

    #[test]
    fn ranges_follow_resolved_roles() {
        let mut fx = menu_universe();
        fx.account("alice", "master", false)
            .role("viewer", "master", &["menu.view"], Some("alice"))
            .role("editor", "master", &["menu.edit"], Some("bob"));
        for role in ["viewer", "editor"] {
            fx.role_ranges.push(RoleRange {
                role_id: RoleId::from(role),
                category: "organization".to_string(),
                range_type: "department".to_string(),
                data_id: format!("{role}-dept"),
                tenant_code: master(),
            });
        }
        let resolver = fx.resolver(AdminSettings::default());

        let ranges = resolver
            .find_ranges(&AccountId::from("alice"), None, &master())
            .unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].data_id, "viewer-dept");

        let none = resolver
            .find_ranges(&AccountId::from(DEFAULT_SUPERVISOR), None, &master())
            .unwrap();
        assert!(none.is_empty());
    }
}

//! JSON snapshots of authorization data.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use warden_auth::{
    Account, Application, Menu, Permission, Role, RolePermission, RolePrincipal, RoleRange, Tenant,
};
use warden_core::StoreResult;

use crate::store::InMemoryAuthorityStore;

/// Every row the resolver can read, as one serialisable document.
///
/// Application secrets are read but never written back out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub tenants: Vec<Tenant>,
    pub applications: Vec<Application>,
    pub accounts: Vec<Account>,
    pub roles: Vec<Role>,
    pub role_permissions: Vec<RolePermission>,
    pub role_principals: Vec<RolePrincipal>,
    pub role_ranges: Vec<RoleRange>,
    pub menus: Vec<Menu>,
    pub permissions: Vec<Permission>,
}

impl Dataset {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse dataset JSON")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset at {}", path.display()))?;
        let dataset = Self::from_json(&raw)
            .with_context(|| format!("invalid dataset at {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            tenants = dataset.tenants.len(),
            accounts = dataset.accounts.len(),
            roles = dataset.roles.len(),
            menus = dataset.menus.len(),
            permissions = dataset.permissions.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Copy every row into `store`, replacing rows with the same key.
    pub fn apply(self, store: &InMemoryAuthorityStore) -> StoreResult<()> {
        for tenant in self.tenants {
            store.upsert_tenant(tenant)?;
        }
        for application in self.applications {
            store.upsert_application(application)?;
        }
        for account in self.accounts {
            store.upsert_account(account)?;
        }
        for role in self.roles {
            store.upsert_role(role)?;
        }
        for link in self.role_permissions {
            store.link_permission(link)?;
        }
        for assignment in self.role_principals {
            store.assign_role(assignment)?;
        }
        for range in self.role_ranges {
            store.add_range(range)?;
        }
        for menu in self.menus {
            store.upsert_menu(menu)?;
        }
        for permission in self.permissions {
            store.upsert_permission(permission)?;
        }
        Ok(())
    }

    pub fn into_store(self) -> StoreResult<InMemoryAuthorityStore> {
        let store = InMemoryAuthorityStore::new();
        self.apply(&store)?;
        Ok(store)
    }
}

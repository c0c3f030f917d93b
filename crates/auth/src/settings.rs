//! Static administrator settings: the supervisor identity and officer ranges.
//!
//! Passed to the resolver at construction time; nothing here is read from
//! process-wide state.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use warden_core::{AccountId, TenantCode};

use crate::model::{Account, enabled_by_default};
use crate::permissions::PermissionRange;

pub const DEFAULT_SUPERVISOR: &str = "syssa";

/// How ordinary accounts are bound to roles.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleBinding {
    /// Only roles assigned to the account through a role-principal link.
    #[default]
    Principal,
    /// Every enabled role of the application applies to every account.
    Application,
}

/// The synthetic supervisor identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorSettings {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl SupervisorSettings {
    pub fn is(&self, account_id: &AccountId) -> bool {
        self.username == account_id.as_str()
    }

    /// Materialise the supervisor as an account of `tenant`.
    ///
    /// Its id is the configured username; it is never persisted.
    pub fn materialize(&self, tenant: &TenantCode) -> Account {
        Account {
            id: AccountId::from(self.username.as_str()),
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            admin: true,
            enabled: self.enabled,
            deleted: false,
            tenant_code: tenant.clone(),
        }
    }
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_SUPERVISOR.to_string(),
            email: None,
            name: "Supervisor".to_string(),
            enabled: true,
        }
    }
}

/// An officer: an administrative account bounded by a permission range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerSettings {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub permissions: PermissionRange,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("supervisor username must not be blank")]
    BlankSupervisor,

    #[error("officer '{0}' has a blank username")]
    BlankOfficer(String),

    #[error("officer username '{0}' is configured more than once")]
    DuplicateOfficer(String),

    #[error("officer '{0}' reuses the supervisor username")]
    OfficerIsSupervisor(String),

    #[error("username '{0}' has surrounding whitespace")]
    PaddedUsername(String),
}

/// Administrator settings consumed by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default)]
    pub supervisor: SupervisorSettings,
    /// Officer entries keyed by a label (e.g. "security", "audit").
    #[serde(default)]
    pub officers: BTreeMap<String, OfficerSettings>,
    #[serde(default)]
    pub role_binding: RoleBinding,
}

impl AdminSettings {
    pub fn with_officer(mut self, label: impl Into<String>, officer: OfficerSettings) -> Self {
        self.officers.insert(label.into(), officer);
        self
    }

    pub fn with_role_binding(mut self, binding: RoleBinding) -> Self {
        self.role_binding = binding;
        self
    }

    pub fn is_supervisor(&self, account_id: &AccountId) -> bool {
        self.supervisor.is(account_id)
    }

    /// Officer entry configured for `username`.
    pub fn officer(&self, username: &str) -> Option<&OfficerSettings> {
        self.officers.values().find(|o| o.username == username)
    }

    /// Usernames are matched verbatim at lookup, so padding is rejected here
    /// rather than trimmed.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let supervisor = self.supervisor.username.as_str();
        if supervisor.trim().is_empty() {
            return Err(SettingsError::BlankSupervisor);
        }
        if supervisor.trim() != supervisor {
            return Err(SettingsError::PaddedUsername(supervisor.to_string()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (label, officer) in &self.officers {
            let username = officer.username.as_str();
            if username.trim().is_empty() {
                return Err(SettingsError::BlankOfficer(label.clone()));
            }
            if username.trim() != username {
                return Err(SettingsError::PaddedUsername(username.to_string()));
            }
            if username == supervisor {
                return Err(SettingsError::OfficerIsSupervisor(label.clone()));
            }
            if !seen.insert(username) {
                return Err(SettingsError::DuplicateOfficer(username.to_string()));
            }
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::model::Permission;

/// Permission range of an officer account.
///
/// Codes are matched by exact string equality. When `includes` is non-empty it
/// is the whole policy (allow-list) and `excludes` is ignored; otherwise every
/// code not listed in `excludes` is permitted (deny-list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRange {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// Which list of a [`PermissionRange`] is in effect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    AllowList,
    DenyList,
}

impl PermissionRange {
    pub fn allow<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: codes.into_iter().map(Into::into).collect(),
            excludes: Vec::new(),
        }
    }

    pub fn deny<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: Vec::new(),
            excludes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mode(&self) -> RangeMode {
        if self.includes.is_empty() {
            RangeMode::DenyList
        } else {
            RangeMode::AllowList
        }
    }

    /// Whether a permission code falls inside this range.
    pub fn permits(&self, code: &str) -> bool {
        match self.mode() {
            RangeMode::AllowList => self.includes.iter().any(|c| c == code),
            RangeMode::DenyList => !self.excludes.iter().any(|c| c == code),
        }
    }

    /// Keep only the permissions this range admits.
    pub fn restrict(&self, permissions: Vec<Permission>) -> Vec<Permission> {
        permissions
            .into_iter()
            .filter(|p| self.permits(&p.code))
            .collect()
    }
}

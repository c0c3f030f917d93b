use serde::{Deserialize, Serialize};

use warden_core::AccountId;

/// Kind of subject a role can be assigned to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalType {
    Account,
    Unit,
    Department,
    Post,
}

impl core::fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PrincipalType::Account => f.write_str("account"),
            PrincipalType::Unit => f.write_str("unit"),
            PrincipalType::Department => f.write_str("department"),
            PrincipalType::Post => f.write_str("post"),
        }
    }
}

/// Reference to a role holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalRef {
    pub principal_type: PrincipalType,
    pub principal_id: String,
}

impl PrincipalRef {
    pub fn account(id: &AccountId) -> Self {
        Self {
            principal_type: PrincipalType::Account,
            principal_id: id.as_str().to_string(),
        }
    }
}

/// How a resolved account obtains its rights.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// The synthetic, unconditionally privileged account.
    Supervisor,
    /// Administrative account bounded by a configured permission range.
    Officer,
    /// Ordinary account; rights come from roles.
    Member,
}

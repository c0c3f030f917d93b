use chrono::{DateTime, Utc};
use serde::Serialize;

use warden_core::{AccountId, ApplicationId, TenantCode};

use crate::error::AuthorityError;
use crate::permissions::RangeMode;
use crate::principal::AccountKind;
use crate::resolver::{AuthorizationResolver, Subject};

impl AuthorizationResolver {
    /// Require `permission_code` for an account inside one application.
    ///
    /// Validates the tenant's lease on the application first, then resolves the
    /// account's permissions. Missing rights yield `Forbidden`.
    pub fn authorize(
        &self,
        account_id: &AccountId,
        application_id: &ApplicationId,
        tenant: &TenantCode,
        permission_code: &str,
    ) -> Result<(), AuthorityError> {
        self.validate_application(application_id, tenant)?;

        let permissions = self.find_permissions(account_id, Some(application_id), tenant)?;
        if permissions.iter().any(|p| p.code == permission_code) {
            Ok(())
        } else {
            tracing::debug!(
                %tenant,
                account = %account_id,
                application = %application_id,
                permission = permission_code,
                "authorization denied"
            );
            Err(AuthorityError::Forbidden(permission_code.to_string()))
        }
    }

    /// Explain why an account does or does not hold `permission_code`.
    ///
    /// Does not validate the application lease; pair with
    /// [`validate_application`](Self::validate_application) when needed.
    pub fn explain(
        &self,
        account_id: &AccountId,
        application: Option<&ApplicationId>,
        tenant: &TenantCode,
        permission_code: &str,
    ) -> Result<AccessExplanation, AuthorityError> {
        let subject = self.resolve_subject(account_id, tenant)?;
        let roles = self.roles_for(&subject, application, tenant)?;
        let permissions = self.permissions_for(&subject, &roles, application, tenant)?;

        let effective: Vec<String> = permissions.iter().map(|p| p.code.clone()).collect();
        let granted = effective.iter().any(|c| c == permission_code);
        let basis = DecisionBasis::of(&subject);

        let account = subject.account().map(|account| AccountState {
            account_id: account.id.clone(),
            username: account.username.clone(),
            tenant_code: tenant.clone(),
            kind: subject.kind().unwrap_or(AccountKind::Member),
            roles: roles.iter().map(|r| r.code.clone()).collect(),
            effective_permissions: effective.clone(),
            range_mode: match &subject {
                Subject::Officer {
                    entry: Some(officer),
                    ..
                } => Some(officer.permissions.mode()),
                _ => None,
            },
        });

        let reason = match (basis, granted) {
            (DecisionBasis::NoAccount, _) => {
                format!("Account '{account_id}' does not exist in tenant '{tenant}'")
            }
            (DecisionBasis::InactiveAccount, _) => {
                format!("Account '{account_id}' is disabled or deleted")
            }
            (DecisionBasis::UnconfiguredOfficer, _) => {
                format!("Admin account '{account_id}' has no officer entry in the admin settings")
            }
            (DecisionBasis::DisabledOfficer, _) => {
                format!("Officer entry for '{account_id}' is disabled")
            }
            (DecisionBasis::Supervisor, true) => {
                "Supervisor holds every permission of the tenant".to_string()
            }
            (DecisionBasis::Officer, true) => {
                format!("Officer range admits '{permission_code}'")
            }
            (DecisionBasis::Officer, false) => {
                format!("Officer range does not admit '{permission_code}' or it does not exist in scope")
            }
            (DecisionBasis::Roles, true) => {
                let codes: Vec<&str> = roles.iter().map(|r| r.code.as_str()).collect();
                format!("Granted through roles: {}", codes.join(", "))
            }
            (DecisionBasis::Roles, false) if roles.is_empty() => {
                format!("Account '{account_id}' holds no roles in scope")
            }
            (_, false) if effective.is_empty() => {
                format!("Permission '{permission_code}' is not granted. Current permissions: none")
            }
            (_, false) => format!(
                "Permission '{permission_code}' is not granted. Current permissions: {}",
                effective.join(", ")
            ),
        };

        let suggestions = if granted {
            Vec::new()
        } else {
            suggestions_for(basis, permission_code)
        };

        Ok(AccessExplanation {
            permission_code: permission_code.to_string(),
            granted,
            basis,
            reason,
            account,
            suggestions,
            evaluated_at: Utc::now(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Explanation (audit trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub permission_code: String,
    pub granted: bool,
    pub basis: DecisionBasis,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Absent when the account does not exist.
    pub account: Option<AccountState>,
    pub suggestions: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
}

/// State of the account at evaluation time.
#[derive(Debug, Clone, Serialize)]
pub struct AccountState {
    pub account_id: AccountId,
    pub username: String,
    pub tenant_code: TenantCode,
    pub kind: AccountKind,
    pub roles: Vec<String>,
    pub effective_permissions: Vec<String>,
    pub range_mode: Option<RangeMode>,
}

/// Which branch of resolution decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    NoAccount,
    InactiveAccount,
    Supervisor,
    Officer,
    UnconfiguredOfficer,
    DisabledOfficer,
    Roles,
}

impl DecisionBasis {
    fn of(subject: &Subject) -> Self {
        match subject {
            Subject::Absent => DecisionBasis::NoAccount,
            Subject::Inactive { .. } => DecisionBasis::InactiveAccount,
            Subject::Supervisor(_) => DecisionBasis::Supervisor,
            Subject::Officer { entry: None, .. } => DecisionBasis::UnconfiguredOfficer,
            Subject::Officer {
                entry: Some(officer),
                ..
            } if !officer.enabled => DecisionBasis::DisabledOfficer,
            Subject::Officer { .. } => DecisionBasis::Officer,
            Subject::Member(_) => DecisionBasis::Roles,
        }
    }
}

fn suggestions_for(basis: DecisionBasis, permission_code: &str) -> Vec<String> {
    match basis {
        DecisionBasis::NoAccount => vec![
            "Check the account id and the tenant code of the request".to_string(),
        ],
        DecisionBasis::InactiveAccount => vec![
            "Re-enable or restore the account".to_string(),
        ],
        DecisionBasis::UnconfiguredOfficer => vec![
            "Add an officer entry for this username to the admin settings".to_string(),
            "Clear the admin flag so the account is resolved through roles".to_string(),
        ],
        DecisionBasis::DisabledOfficer => vec![
            "Enable the officer entry in the admin settings".to_string(),
        ],
        DecisionBasis::Officer => vec![format!(
            "Add '{permission_code}' to the officer includes, or remove it from excludes"
        )],
        DecisionBasis::Roles => vec![
            format!("Assign a role that grants '{permission_code}'"),
            format!("Link '{permission_code}' to one of the account's roles"),
        ],
        DecisionBasis::Supervisor => vec![format!(
            "Permission '{permission_code}' does not exist in this tenant/application"
        )],
    }
}

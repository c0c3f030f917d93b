//! Application-level questions: lease validity, credential lookup and which
//! applications an account can reach.

use std::collections::BTreeSet;

use warden_core::{AccountId, ApplicationId, TenantCode};

use crate::error::AuthorityError;
use crate::model::Application;
use crate::resolver::AuthorizationResolver;

impl AuthorizationResolver {
    /// Check that `tenant_code` holds an enabled lease on an enabled application.
    ///
    /// Read-only. Callers crossing an application boundary run this before
    /// resolving permissions.
    pub fn validate_application(
        &self,
        application_id: &ApplicationId,
        tenant_code: &TenantCode,
    ) -> Result<(), AuthorityError> {
        let Some(tenant) = self.directory.tenant_by_code(tenant_code)? else {
            return Err(AuthorityError::not_found(format!("tenant '{tenant_code}'")));
        };
        if !tenant.enabled {
            return Err(AuthorityError::disabled(format!("tenant '{tenant_code}'")));
        }

        let Some(lease) = tenant.lease(application_id) else {
            return Err(AuthorityError::not_found(format!(
                "application '{application_id}' is not leased by tenant '{tenant_code}'"
            )));
        };
        if !lease.enabled {
            return Err(AuthorityError::disabled(format!(
                "lease of application '{application_id}' in tenant '{tenant_code}'"
            )));
        }

        let Some(application) = self.directory.application_by_id(&lease.application_id)? else {
            return Err(AuthorityError::not_found(format!("application '{application_id}'")));
        };
        if !application.enabled {
            return Err(AuthorityError::disabled(format!("application '{}'", application.code)));
        }

        Ok(())
    }

    /// Look up an application by code and check its secret.
    ///
    /// An unknown code means the directory is not populated yet (cold start),
    /// which is reported as `ServiceUnavailable` rather than `NotFound`.
    pub fn find_application_by_credentials(
        &self,
        code: &str,
        secret: &str,
    ) -> Result<Application, AuthorityError> {
        let Some(application) = self.directory.application_by_code(code)? else {
            return Err(AuthorityError::ServiceUnavailable(format!(
                "application '{code}' is not known to the directory"
            )));
        };
        if application.secret != secret {
            tracing::warn!(application = %code, "application secret mismatch");
            return Err(AuthorityError::BadCredentials(code.to_string()));
        }
        Ok(application)
    }

    /// Applications owning at least one menu of `menu_type` visible to the account.
    ///
    /// Does not filter on `Application::enabled`.
    pub fn find_applications(
        &self,
        account_id: &AccountId,
        menu_type: &str,
        tenant_code: &TenantCode,
    ) -> Result<Vec<Application>, AuthorityError> {
        let menus = self.find_menus(account_id, Some(menu_type), None, tenant_code)?;

        let ids: BTreeSet<ApplicationId> = menus.into_iter().map(|m| m.application_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut applications = Vec::with_capacity(ids.len());
        for id in ids {
            match self.directory.application_by_id(&id)? {
                Some(application) => applications.push(application),
                None => tracing::warn!(
                    tenant = %tenant_code,
                    application = %id,
                    "menu references an application unknown to the directory"
                ),
            }
        }

        applications.sort_by(|a, b| (&a.code, &a.id).cmp(&(&b.code, &b.id)));
        Ok(applications)
    }
}

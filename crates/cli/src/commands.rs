//! Subcommand execution. Every command renders one JSON document.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use serde_json::{Value, json};

use warden_auth::{AuthorityError, AuthorizationResolver};
use warden_core::{AccountId, ApplicationId, TenantCode};

use crate::cli::{Command, Scope};

/// Exit status for a refused request (validation, credentials, authorization).
const REFUSED: u8 = 2;

#[derive(Debug)]
pub(crate) enum Outcome {
    Answer(Value),
    Refused(Value),
}

impl Outcome {
    fn refused(err: &AuthorityError) -> Self {
        Outcome::Refused(json!({
            "error": err.to_string(),
            "status": err.status_code(),
        }))
    }

    pub(crate) fn print(&self, mut out: impl Write) -> anyhow::Result<()> {
        let value = match self {
            Outcome::Answer(value) | Outcome::Refused(value) => value,
        };
        serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
        writeln!(out).context("failed to write output")?;
        Ok(())
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Answer(_) => ExitCode::SUCCESS,
            Outcome::Refused(_) => ExitCode::from(REFUSED),
        }
    }
}

fn account(raw: &str) -> anyhow::Result<AccountId> {
    AccountId::parse(raw).context("invalid account id")
}

fn application(raw: &str) -> anyhow::Result<ApplicationId> {
    ApplicationId::parse(raw).context("invalid application id")
}

fn scope(scope: &Scope) -> anyhow::Result<(AccountId, Option<ApplicationId>)> {
    let app = scope.application.as_deref().map(application).transpose()?;
    Ok((account(&scope.account)?, app))
}

/// Run `command` against `resolver` within `tenant`.
///
/// Storage failures are returned as errors; refusals (not found, disabled,
/// bad credentials, forbidden) are rendered as an [`Outcome::Refused`].
pub(crate) fn execute(
    command: Command,
    resolver: &AuthorizationResolver,
    tenant: &TenantCode,
) -> anyhow::Result<Outcome> {
    let result = match &command {
        Command::Permissions(s) => {
            let (account, app) = scope(s)?;
            resolver
                .find_permissions(&account, app.as_ref(), tenant)
                .map(serde_json::to_value)
        }
        Command::Roles(s) => {
            let (account, app) = scope(s)?;
            resolver
                .find_roles(&account, app.as_ref(), tenant)
                .map(serde_json::to_value)
        }
        Command::Ranges(s) => {
            let (account, app) = scope(s)?;
            resolver
                .find_ranges(&account, app.as_ref(), tenant)
                .map(serde_json::to_value)
        }
        Command::Menus { scope: s, menu_type } => {
            let (account, app) = scope(s)?;
            resolver
                .find_menus(&account, menu_type.as_deref(), app.as_ref(), tenant)
                .map(serde_json::to_value)
        }
        Command::Applications { account: a, menu_type } => {
            let account = account(a)?;
            resolver
                .find_applications(&account, menu_type, tenant)
                .map(serde_json::to_value)
        }
        Command::Validate { application: a } => {
            let app = application(a)?;
            resolver
                .validate_application(&app, tenant)
                .map(|()| Ok(json!({ "application": app, "tenant": tenant, "valid": true })))
        }
        Command::Authorize {
            account: a,
            application: b,
            permission,
        } => {
            let account = account(a)?;
            let app = application(b)?;
            resolver
                .authorize(&account, &app, tenant, permission)
                .map(|()| Ok(json!({ "account": account, "permission": permission, "granted": true })))
        }
        Command::Explain { scope: s, permission } => {
            let (account, app) = scope(s)?;
            resolver
                .explain(&account, app.as_ref(), tenant, permission)
                .map(serde_json::to_value)
        }
        Command::Credentials { code, secret } => resolver
            .find_application_by_credentials(code, secret)
            .map(serde_json::to_value),
    };

    match result {
        Ok(rendered) => Ok(Outcome::Answer(rendered.context("failed to render result")?)),
        Err(AuthorityError::Store(err)) => Err(err).context("storage failure"),
        Err(err) => {
            tracing::info!(%tenant, error = %err, "request refused");
            Ok(Outcome::refused(&err))
        }
    }
}

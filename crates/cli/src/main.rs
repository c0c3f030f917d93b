use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use warden_auth::{AuthorizationResolver, Stores};
use warden_core::TenantCode;
use warden_infra::{Dataset, WardenConfig};

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match cli.config.clone().or_else(WardenConfig::env_path) {
        Some(path) => {
            let config = WardenConfig::load(&path)?;
            warden_observability::init_with(cli.log_format.unwrap_or(config.log_format));
            config
        }
        None => {
            warden_observability::init_with(cli.log_format.unwrap_or_default());
            WardenConfig::from_env()?
        }
    };

    let tenant = TenantCode::parse(&cli.tenant).context("invalid tenant code")?;
    let store = Dataset::load(&cli.dataset)?
        .into_store()
        .context("failed to populate the in-memory store")?;
    let resolver = AuthorizationResolver::new(Stores::shared(Arc::new(store)), config.admin);

    let outcome = commands::execute(cli.command, &resolver, &tenant)?;
    outcome.print(std::io::stdout().lock())?;
    Ok(outcome.exit_code())
}

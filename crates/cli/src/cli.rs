//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use warden_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(version)]
#[command(about = "Resolve tenant-scoped permissions, roles, menus and applications")]
pub(crate) struct Cli {
    /// Admin settings file (JSON). Defaults to $WARDEN_CONFIG, then built-in settings
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Dataset file (JSON) loaded into the in-memory store
    #[arg(short, long)]
    pub(crate) dataset: PathBuf,

    /// Tenant in scope
    #[arg(short, long, default_value = "master")]
    pub(crate) tenant: String,

    /// Log output format (json or pretty); overrides the config file
    #[arg(long)]
    pub(crate) log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Account and optional application an account-scoped query runs against.
#[derive(Args, Debug)]
pub(crate) struct Scope {
    #[arg(short, long)]
    pub(crate) account: String,

    /// Restrict to one application
    #[arg(long)]
    pub(crate) application: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Permissions granted to an account
    Permissions(Scope),

    /// Roles held by an account
    Roles(Scope),

    /// Data ranges attached to an account's roles
    Ranges(Scope),

    /// Menus visible to an account, ancestors included
    Menus {
        #[command(flatten)]
        scope: Scope,

        #[arg(long)]
        menu_type: Option<String>,
    },

    /// Applications owning at least one visible menu of a type
    Applications {
        #[arg(short, long)]
        account: String,

        #[arg(long, default_value = "BACKEND")]
        menu_type: String,
    },

    /// Check the tenant's lease on an application
    Validate {
        #[arg(long)]
        application: String,
    },

    /// Require a permission inside an application
    Authorize {
        #[arg(short, long)]
        account: String,

        #[arg(long)]
        application: String,

        #[arg(short, long)]
        permission: String,
    },

    /// Explain why an account does or does not hold a permission
    Explain {
        #[command(flatten)]
        scope: Scope,

        #[arg(short, long)]
        permission: String,
    },

    /// Look up an application by code and secret
    Credentials {
        #[arg(long)]
        code: String,

        #[arg(long)]
        secret: String,
    },
}

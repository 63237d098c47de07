//! Device console operator CLI.
//!
//! Manages the user list of a security settings document the same way the
//! web console does: every change goes through an edit session, is
//! validated on commit, and is only written back by a save that the
//! admin invariant allows.
//!
//! Usage:
//!   devconsole --store security.json init
//!   devconsole --store security.json users add carol s3cret --admin
//!   devconsole --store security.json --as admin users remove guest
//!   devconsole check 192.168.1.1 --kind ip

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "devconsole")]
#[command(about = "Administer device security settings stored in a JSON file")]
pub struct Args {
    /// Path to the security settings document
    #[arg(short, long, default_value = "security.json", global = true)]
    store: PathBuf,

    /// Act as this user; their own identity is refreshed after a save
    #[arg(long = "as", global = true)]
    operator: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write factory default security settings
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Check a value against an address format
    Check {
        value: String,
        #[arg(long, value_enum, default_value_t = HostKind::Any)]
        kind: HostKind,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// List users in username order
    List,
    /// Add a user
    Add {
        username: String,
        password: String,
        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// Change an existing user
    Edit {
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        admin: Option<bool>,
    },
    /// Remove a user
    Remove { username: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    Ip,
    Hostname,
    Any,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match &args.command {
        Command::Init { force } => commands::init(&args.store, *force).await,
        Command::Users { action } => {
            commands::users(&args.store, args.operator.as_deref(), action).await
        }
        Command::Check { value, kind } => commands::check(value, *kind),
    }
}

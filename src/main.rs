//! Pantry CLI - push package file sets to hosts
//!
//! Usage: pantry <COMMAND>
//!
//! Commands:
//!   push  Push packages to a computer over SSH (or into --root)
//!   plan  Show what a push would do without contacting any host

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = pantry::logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    match cli.command {
        Commands::Push {
            target,
            host,
            root,
            dry_run,
        } => {
            let remote = match (host, root) {
                (_, Some(root)) => commands::Remote::Root(root),
                (Some(host), None) => commands::Remote::Ssh(host),
                (None, None) => commands::Remote::Offline,
            };
            commands::cmd_push(&target, remote, dry_run, cli.json)
        }
        Commands::Plan { target } => {
            commands::cmd_push(&target, commands::Remote::Offline, true, cli.json)
        }
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

/// Pantry - push package file sets to hosts
#[derive(Parser, Debug)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Push packages to a computer
    Push {
        #[command(flatten)]
        target: TargetArgs,

        /// SSH destination (user@host)
        #[arg(long, required_unless_present = "root", conflicts_with = "root")]
        host: Option<String>,

        /// Mirror into a local directory instead of a host
        #[arg(long)]
        root: Option<PathBuf>,

        /// Dry run - render and resolve everything, contact nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what a push would do without contacting any host
    Plan {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// What to push and for whom
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Packages to push, in order
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Computer name in the inventory
    #[arg(short, long)]
    pub computer: String,

    /// Settings file (default: ./pantry.toml, then user config)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Inventory file (default: `inventory` from settings)
    #[arg(short, long)]
    pub inventory: Option<PathBuf>,

    /// Extra template variable; VALUE is parsed as JSON, else taken as a string
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,
}

fn parse_var(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use pantry::config::{load_settings, ConfigWarning, Inventory};
use pantry::domain::ports::{RemoteError, RemoteFileSystem, RemoteResult, SyncEventSink};
use pantry::infrastructure::{JsonEventSink, TracingEventSink};
use pantry::{
    Attributes, Cookbook, FileSetRecipe, LocalRootFs, MiniJinjaRenderer, PushOptions, PushReport,
    RecipeContext, SshRemoteFs,
};

use crate::cli::TargetArgs;

/// Where a push goes
#[derive(Debug)]
pub enum Remote {
    Ssh(String),
    Root(PathBuf),
    /// No host; only valid together with dry run
    Offline,
}

/// Stand-in host for dry runs: every call is refused
struct OfflineFs;

impl RemoteFileSystem for OfflineFs {
    fn ensure_directory(&self, path: &Path, _attrs: &Attributes) -> RemoteResult<()> {
        Err(offline(path))
    }

    fn write_file(&self, path: &Path, _content: &[u8], _attrs: &Attributes) -> RemoteResult<bool> {
        Err(offline(path))
    }

    fn delete_file(&self, path: &Path) -> RemoteResult<bool> {
        Err(offline(path))
    }
}

fn offline(path: &Path) -> RemoteError {
    RemoteError::Other(format!("no host to apply {} to", path.display()))
}

fn report_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
}

pub fn cmd_push(args: &TargetArgs, remote: Remote, dry_run: bool, json: bool) -> Result<()> {
    if matches!(remote, Remote::Offline) && !dry_run {
        bail!("no --host or --root given");
    }

    let (settings, warnings) = load_settings(args.settings.as_deref())?;
    report_warnings(&warnings);

    let Some(inventory_path) = args.inventory.clone().or_else(|| settings.inventory.clone())
    else {
        bail!("no inventory: pass --inventory or set `inventory` in the settings file");
    };
    let (inventory, warnings) = Inventory::load(&inventory_path)?;
    report_warnings(&warnings);

    let options = PushOptions::from_settings(&settings)?.with_dry_run(dry_run);
    let renderer = MiniJinjaRenderer::new(&settings.package_dir);
    let remote_fs: Box<dyn RemoteFileSystem> = match &remote {
        Remote::Ssh(host) => Box::new(SshRemoteFs::new(host.clone())),
        Remote::Root(root) => Box::new(LocalRootFs::new(root.clone())),
        Remote::Offline => Box::new(OfflineFs),
    };

    let events: Arc<dyn SyncEventSink> = if json {
        Arc::new(JsonEventSink::stdout().dry_run(dry_run))
    } else {
        Arc::new(TracingEventSink::new(dry_run))
    };

    let mut cookbook = Cookbook::new(args.packages.join("+"));
    for package in &args.packages {
        let recipe = args
            .vars
            .iter()
            .fold(FileSetRecipe::new(package.clone()), |recipe, (key, value)| {
                recipe.with_var(key.clone(), value.clone())
            });
        cookbook = cookbook.with_recipe(recipe);
    }

    for message in cookbook.pre_apply_messages() {
        info!("{}", message);
    }

    let ctx = RecipeContext::new(&inventory, remote_fs.as_ref(), &renderer, options)
        .with_events(events);
    let reports = cookbook
        .run_apply(&ctx, &args.computer)
        .with_context(|| format!("failed to push to '{}'", args.computer))?;
    cookbook.run_cleanup(&ctx, &args.computer)?;

    for message in cookbook.post_apply_messages() {
        info!("{}", message);
    }

    if !json {
        print_reports(&reports, &args.computer, &remote);
    }
    Ok(())
}

fn print_reports(reports: &[PushReport], computer: &str, remote: &Remote) {
    for report in reports {
        if report.dry_run {
            println!("plan for {} on {}:", report.package, computer);
            for dir in &report.directories {
                println!("  ensure {}", dir.display());
            }
            for file in &report.written {
                println!("  write  {}", file.display());
            }
            for file in &report.deleted {
                println!("  delete {}", file.display());
            }
            continue;
        }

        let destination = match remote {
            Remote::Ssh(host) => host.clone(),
            Remote::Root(root) => root.display().to_string(),
            Remote::Offline => computer.to_string(),
        };
        println!(
            "{} -> {}: {} written, {} unchanged, {} deleted",
            report.package,
            destination,
            report.written.len(),
            report.unchanged.len(),
            report.deleted.len()
        );
    }
}

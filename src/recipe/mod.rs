//! Recipes and cookbooks
//!
//! A `Recipe` is one unit of configuration applied to a computer (push the
//! nginx package, push the hosts file). A `Cookbook` is an ordered list of
//! recipes applied together.
//!
//! Recipes reach the host only through a `RecipeContext`, which owns the
//! push engine for that host and the inventory.

mod cookbook;
mod file_set;

pub use cookbook::Cookbook;
pub use file_set::FileSetRecipe;

use std::cell::RefCell;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::push::{PackageSync, PushOptions, PushReport};
use crate::config::Inventory;
use crate::domain::ports::{RemoteFileSystem, SyncEventSink, TemplateRenderer};
use crate::error::{PantryResult, SyncError};

/// Everything a recipe may use while applying to one host
pub struct RecipeContext<'a> {
    inventory: &'a Inventory,
    sync: PackageSync<&'a dyn RemoteFileSystem, &'a dyn TemplateRenderer>,
    reports: RefCell<Vec<PushReport>>,
}

impl<'a> RecipeContext<'a> {
    pub fn new(
        inventory: &'a Inventory,
        remote: &'a dyn RemoteFileSystem,
        renderer: &'a dyn TemplateRenderer,
        options: PushOptions,
    ) -> Self {
        Self {
            inventory,
            sync: PackageSync::new(remote, renderer, options),
            reports: RefCell::new(Vec::new()),
        }
    }

    /// Report push progress to an event sink
    pub fn with_events(mut self, events: Arc<dyn SyncEventSink>) -> Self {
        self.sync = self.sync.with_events(events);
        self
    }

    pub fn inventory(&self) -> &Inventory {
        self.inventory
    }

    pub fn is_dry_run(&self) -> bool {
        self.sync.options().dry_run
    }

    /// Push a package for `computer`; the report is also kept for
    /// `take_reports`.
    pub fn push_package_file_set(
        &self,
        package: &str,
        computer: &str,
        aux: Map<String, Value>,
    ) -> PantryResult<PushReport> {
        let report = self
            .sync
            .push_package_file_set(package, self.inventory, computer, aux)?;
        self.reports.borrow_mut().push(report.clone());
        Ok(report)
    }

    /// Reports of every push made through this context so far
    pub fn take_reports(&self) -> Vec<PushReport> {
        self.reports.take()
    }
}

/// One unit of configuration applied to a computer
pub trait Recipe {
    fn name(&self) -> &str;

    /// Shown before a cookbook is applied
    fn pre_apply_message(&self) -> Option<String> {
        None
    }

    /// Shown after a cookbook is applied
    fn post_apply_message(&self) -> Option<String> {
        None
    }

    /// Checks run before anything is applied. The default checks that the
    /// computer exists in the inventory; overrides should call
    /// `require_computer` too.
    fn pre_apply_checks(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()> {
        require_computer(ctx, computer)
    }

    fn apply(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()>;

    fn cleanup(&self, _ctx: &RecipeContext<'_>, _computer: &str) -> PantryResult<()> {
        Ok(())
    }

    /// Checks, then apply
    fn run_apply(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()> {
        self.pre_apply_checks(ctx, computer)?;
        self.apply(ctx, computer)
    }
}

/// Fails with `UnknownComputer` unless the inventory defines `computer`
pub fn require_computer(ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()> {
    match ctx.inventory().computer(computer) {
        Some(_) => Ok(()),
        None => Err(SyncError::UnknownComputer {
            name: computer.to_string(),
        }
        .into()),
    }
}

//! Recipe that pushes one package

use serde_json::{Map, Value};
use tracing::info;

use crate::error::PantryResult;

use super::{Recipe, RecipeContext};

/// Pushes a single package file set, with optional extra template variables
#[derive(Debug, Clone)]
pub struct FileSetRecipe {
    name: String,
    package: String,
    aux: Map<String, Value>,
}

impl FileSetRecipe {
    /// Recipe named after its package
    pub fn new(package: impl Into<String>) -> Self {
        let package = package.into();
        Self {
            name: package.clone(),
            package,
            aux: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Extra template variable; overrides `computer` if named so
    pub fn with_var(mut self, key: impl Into<String>, value: Value) -> Self {
        self.aux.insert(key.into(), value);
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

impl Recipe for FileSetRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()> {
        let report = ctx.push_package_file_set(&self.package, computer, self.aux.clone())?;
        info!(
            recipe = %self.name,
            computer,
            written = report.written.len(),
            deleted = report.deleted.len(),
            "recipe applied"
        );
        Ok(())
    }
}

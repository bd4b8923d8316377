//! Ordered list of recipes applied together

use tracing::{debug, info};

use crate::application::push::PushReport;
use crate::error::PantryResult;

use super::{Recipe, RecipeContext};

/// A named, ordered set of recipes
pub struct Cookbook {
    name: String,
    recipes: Vec<Box<dyn Recipe>>,
}

impl Cookbook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recipes: Vec::new(),
        }
    }

    /// Append a recipe; recipes apply in insertion order
    pub fn with_recipe(mut self, recipe: impl Recipe + 'static) -> Self {
        self.recipes.push(Box::new(recipe));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipes(&self) -> impl Iterator<Item = &dyn Recipe> {
        self.recipes.iter().map(|r| r.as_ref())
    }

    /// Pre-apply messages of every recipe, in order
    pub fn pre_apply_messages(&self) -> Vec<String> {
        self.recipes
            .iter()
            .filter_map(|r| r.pre_apply_message())
            .collect()
    }

    /// Post-apply messages of every recipe, in order
    pub fn post_apply_messages(&self) -> Vec<String> {
        self.recipes
            .iter()
            .filter_map(|r| r.post_apply_message())
            .collect()
    }

    /// Run every recipe's checks, then every recipe's apply.
    ///
    /// A failing check means nothing is applied. Returns the reports of all
    /// pushes made.
    pub fn run_apply(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<Vec<PushReport>> {
        info!(cookbook = %self.name, computer, recipes = self.recipes.len(), "applying cookbook");

        for recipe in &self.recipes {
            debug!(recipe = recipe.name(), "pre-apply checks");
            recipe.pre_apply_checks(ctx, computer)?;
        }
        for recipe in &self.recipes {
            debug!(recipe = recipe.name(), "apply");
            recipe.apply(ctx, computer)?;
        }

        Ok(ctx.take_reports())
    }

    /// Run every recipe's cleanup in order
    pub fn run_cleanup(&self, ctx: &RecipeContext<'_>, computer: &str) -> PantryResult<()> {
        for recipe in &self.recipes {
            debug!(recipe = recipe.name(), "cleanup");
            recipe.cleanup(ctx, computer)?;
        }
        Ok(())
    }
}

//! CK-009: Dispatcher — resolve a recipe id to a program and run it.
//!
//! Short-circuits in order: catalog lookup → plan check → program lookup →
//! program. The program's outcome is returned untouched.

use super::catalog::Catalog;
use super::registry::{CompletionHandle, PendingJob, ProgramRegistry};
use super::types::{ExecutionOutcome, FailureCode, KitchenConfig, Pacing, Supplies};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NOT_FOUND_MESSAGE: &str = "❌ We couldn't find the selected recipe.";
pub const NOT_IN_PLAN_MESSAGE: &str =
    "⚠️ This recipe is not included in your plan. You haven't bought that program yet.";
pub const NOT_IMPLEMENTED_MESSAGE: &str = "⚠️ This recipe hasn't been programmed yet.";

/// Everything a dispatch reads: catalog, programs, default supplies.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    registry: ProgramRegistry,
    default_supplies: Supplies,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, registry: ProgramRegistry, default_supplies: Supplies) -> Self {
        Self {
            catalog,
            registry,
            default_supplies,
        }
    }

    /// Build from a config with the built-in programs.
    pub fn from_config(config: &KitchenConfig) -> Result<Self, String> {
        let catalog = Catalog::from_recipes(config.recipes.iter().cloned())?;
        let pacing = Pacing::from(&config.pacing);
        Ok(Self::new(
            Arc::new(catalog),
            ProgramRegistry::builtin(&pacing),
            config.supplies.clone(),
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog handle for collaborators that outlive a borrow (input parsing).
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn default_supplies(&self) -> &Supplies {
        &self.default_supplies
    }

    /// Run one execution attempt. `supplies: None` uses the default supplies.
    pub fn dispatch(
        &self,
        recipe_id: &str,
        on_complete: Option<CompletionHandle>,
        supplies: Option<&Supplies>,
    ) -> ExecutionOutcome {
        info!(recipe_id, "evaluating recipe for execution");

        let Some(recipe) = self.catalog.lookup(recipe_id) else {
            error!(recipe_id, code = %FailureCode::NotFound, "{}", NOT_FOUND_MESSAGE);
            return ExecutionOutcome::failed(FailureCode::NotFound, NOT_FOUND_MESSAGE, None);
        };

        if !recipe.included_in_plan {
            warn!(recipe_id, code = %FailureCode::NotInPlan, "{}", NOT_IN_PLAN_MESSAGE);
            return ExecutionOutcome::failed(FailureCode::NotInPlan, NOT_IN_PLAN_MESSAGE, Some(recipe));
        }

        let Some(program) = self.registry.resolve(recipe_id) else {
            warn!(recipe_id, code = %FailureCode::NotImplemented, "{}", NOT_IMPLEMENTED_MESSAGE);
            return ExecutionOutcome::failed(
                FailureCode::NotImplemented,
                NOT_IMPLEMENTED_MESSAGE,
                Some(recipe),
            );
        };

        info!(recipe_id, "running program");
        let supplies = supplies.unwrap_or(&self.default_supplies);
        program.cook(recipe, on_complete, supplies)
    }

    /// Dispatch with a fresh completion channel.
    pub fn start(&self, recipe_id: &str, supplies: Option<&Supplies>) -> (ExecutionOutcome, PendingJob) {
        let (handle, job) = CompletionHandle::pair();
        (self.dispatch(recipe_id, Some(handle), supplies), job)
    }
}

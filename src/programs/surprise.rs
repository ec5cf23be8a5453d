//! CK-008: Surprise recipe — slot reserved, program not written yet.
//!
//! Unreachable through the dispatcher while the recipe stays out of plan.

use super::NOT_PROGRAMMED_MESSAGE;
use crate::core::registry::{CompletionHandle, CookingProgram};
use crate::core::types::{ExecutionOutcome, FailureCode, Recipe, Supplies};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct SurpriseRecipe;

impl CookingProgram for SurpriseRecipe {
    fn cook(
        &self,
        recipe: &Recipe,
        _on_complete: Option<CompletionHandle>,
        _supplies: &Supplies,
    ) -> ExecutionOutcome {
        info!(recipe_id = %recipe.id, "surprise recipe program not implemented yet");
        ExecutionOutcome::failed(FailureCode::NotImplemented, NOT_PROGRAMMED_MESSAGE, Some(recipe))
    }
}

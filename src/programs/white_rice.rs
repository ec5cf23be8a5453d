//! CK-007: White rice — slot reserved, program not written yet.

use super::NOT_PROGRAMMED_MESSAGE;
use crate::core::registry::{CompletionHandle, CookingProgram};
use crate::core::types::{ExecutionOutcome, FailureCode, Recipe, Supplies};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteRice;

impl CookingProgram for WhiteRice {
    fn cook(
        &self,
        recipe: &Recipe,
        _on_complete: Option<CompletionHandle>,
        _supplies: &Supplies,
    ) -> ExecutionOutcome {
        info!(recipe_id = %recipe.id, "white rice program not implemented yet");
        ExecutionOutcome::failed(FailureCode::NotImplemented, NOT_PROGRAMMED_MESSAGE, Some(recipe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::builtin_config;

    #[test]
    fn test_ck007_reports_not_implemented_and_drops_handle() {
        let config = builtin_config();
        let rice = &config.recipes[1];
        let (handle, mut job) = CompletionHandle::pair();
        let outcome = WhiteRice.cook(rice, Some(handle), &config.supplies);
        assert_eq!(outcome.code(), Some(FailureCode::NotImplemented));
        assert_eq!(outcome.recipe(), Some(rice));
        assert!(job.try_finished().is_none());
    }
}

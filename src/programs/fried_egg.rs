//! CK-006: Fried egg — the one fully written program.
//!
//! Requires a completion handle. Accepts the job and finishes after
//! `cook_time` simulated minutes. Supplies are reported, never enforced.

use super::{schedule_completion, CONTRACT_LOG_TARGET};
use crate::core::registry::{CompletionHandle, CookingProgram};
use crate::core::types::{ExecutionOutcome, FailureCode, Recipe, Supplies};
use std::time::Duration;
use tracing::{debug, error, info};

pub const MISSING_CALLBACK_MESSAGE: &str =
    "⚠️ This recipe could not be started (no completion callback available).";

/// Fried egg program. `minute` is the length of one simulated minute.
#[derive(Debug, Clone)]
pub struct FriedEgg {
    minute: Duration,
}

impl FriedEgg {
    pub fn new(minute: Duration) -> Self {
        Self { minute }
    }

    /// Simulated wall time for a recipe.
    pub fn cook_duration(&self, recipe: &Recipe) -> Duration {
        self.minute.saturating_mul(recipe.cook_time)
    }
}

impl CookingProgram for FriedEgg {
    fn cook(
        &self,
        recipe: &Recipe,
        on_complete: Option<CompletionHandle>,
        supplies: &Supplies,
    ) -> ExecutionOutcome {
        info!(recipe = %recipe.name, "decision: prepare fried egg");

        let Some(handle) = on_complete else {
            error!(
                target: CONTRACT_LOG_TARGET,
                recipe_id = %recipe.id,
                "completion callback missing"
            );
            return ExecutionOutcome::failed(
                FailureCode::MissingCallback,
                MISSING_CALLBACK_MESSAGE,
                Some(recipe),
            );
        };

        let shortages = supplies.shortages(recipe);
        if !shortages.is_empty() {
            debug!(
                recipe_id = %recipe.id,
                shortages = shortages.len(),
                "cooking with incomplete supplies"
            );
        }

        let after = self.cook_duration(recipe);
        schedule_completion(handle, recipe.clone(), after);
        ExecutionOutcome::running(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::builtin_config;

    fn egg() -> (Recipe, Supplies) {
        let config = builtin_config();
        (config.recipes[0].clone(), config.supplies)
    }

    #[test]
    fn test_ck006_missing_callback() {
        let (recipe, supplies) = egg();
        let program = FriedEgg::new(Duration::from_millis(1));
        let outcome = program.cook(&recipe, None, &supplies);
        assert_eq!(
            outcome,
            ExecutionOutcome::failed(
                FailureCode::MissingCallback,
                MISSING_CALLBACK_MESSAGE,
                Some(&recipe)
            )
        );
    }

    #[test]
    fn test_ck006_cook_duration_scales_with_minutes() {
        let (recipe, _) = egg();
        let program = FriedEgg::new(Duration::from_millis(200));
        assert_eq!(program.cook_duration(&recipe), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ck006_accepts_and_completes_after_cook_time() {
        let (recipe, supplies) = egg();
        let program = FriedEgg::new(Duration::from_secs(60));
        let (handle, mut job) = CompletionHandle::pair();
        let start = tokio::time::Instant::now();

        let outcome = program.cook(&recipe, Some(handle), &supplies);
        assert_eq!(outcome, ExecutionOutcome::running(&recipe));

        let done = job.finished().await.unwrap();
        assert_eq!(done, recipe);
        assert!(start.elapsed() >= Duration::from_secs(5 * 60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ck006_accepts_with_empty_supplies() {
        let (recipe, _) = egg();
        let program = FriedEgg::new(Duration::from_millis(1));
        let (handle, mut job) = CompletionHandle::pair();
        let outcome = program.cook(&recipe, Some(handle), &Supplies::default());
        assert!(outcome.is_running());
        assert!(job.finished().await.is_some());
    }
}

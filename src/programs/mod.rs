//! Cooking programs — one per recipe the robot knows how to prepare.
//!
//! Each program:
//! 1. Validates the caller's contract (completion handle present)
//! 2. Decides its own outcome (running, or a named failure)
//! 3. Schedules the completion when it accepts the job

pub mod fried_egg;
pub mod surprise;
pub mod white_rice;

use crate::core::registry::CompletionHandle;
use crate::core::types::Recipe;
use std::time::Duration;
use tracing::debug;

/// Log target for caller contract violations (e.g. a missing completion handle).
pub const CONTRACT_LOG_TARGET: &str = "chefcito::contract";

/// Message shared by programs that exist but are not written yet.
pub const NOT_PROGRAMMED_MESSAGE: &str =
    "⚠️ This recipe is in your plan but has not been programmed yet.";

/// Fire `handle` with `recipe` once `after` has elapsed.
///
/// Outside a tokio runtime the job completes immediately; the value still sits
/// in the channel until the caller reads it.
pub fn schedule_completion(handle: CompletionHandle, recipe: Recipe, after: Duration) {
    match tokio::runtime::Handle::try_current() {
        Ok(rt) => {
            rt.spawn(async move {
                tokio::time::sleep(after).await;
                let id = recipe.id.clone();
                if !handle.complete(recipe) {
                    debug!(recipe_id = %id, "job finished but nobody was waiting");
                }
            });
        }
        Err(_) => {
            debug!(recipe_id = %recipe.id, "no async runtime, completing immediately");
            handle.complete(recipe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::builtin_config;

    #[test]
    fn test_ck006_schedule_without_runtime_completes_now() {
        let recipe = builtin_config().recipes[0].clone();
        let (handle, mut job) = CompletionHandle::pair();
        schedule_completion(handle, recipe, Duration::from_secs(60));
        assert_eq!(job.try_finished().unwrap().id, "fried-egg");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ck006_schedule_waits_for_delay() {
        let recipe = builtin_config().recipes[0].clone();
        let (handle, mut job) = CompletionHandle::pair();
        let start = tokio::time::Instant::now();
        schedule_completion(handle, recipe, Duration::from_secs(5));
        let done = job.finished().await.unwrap();
        assert_eq!(done.id, "fried-egg");
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}

//! CK-005: Cooking program registry — closed set of program ids to programs.
//!
//! Each program decides its own outcome. A program that accepts a job keeps
//! the [`CompletionHandle`] and fires it at most once; the caller waits on
//! the matching [`PendingJob`].

use super::types::{ExecutionOutcome, Pacing, Recipe, Supplies};
use crate::programs;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

// ============================================================================
// Completion channel
// ============================================================================

/// Sending half of a job's completion. Consumed on use.
#[derive(Debug)]
pub struct CompletionHandle {
    tx: oneshot::Sender<Recipe>,
}

/// Receiving half of a job's completion.
#[derive(Debug)]
pub struct PendingJob {
    rx: oneshot::Receiver<Recipe>,
}

impl CompletionHandle {
    /// Create a linked handle/job pair.
    pub fn pair() -> (CompletionHandle, PendingJob) {
        let (tx, rx) = oneshot::channel();
        (CompletionHandle { tx }, PendingJob { rx })
    }

    /// Signal that the recipe is ready. Returns false if nobody is waiting.
    pub fn complete(self, recipe: Recipe) -> bool {
        self.tx.send(recipe).is_ok()
    }
}

impl PendingJob {
    /// Wait for the program to finish. `None` if the program dropped its handle
    /// without completing.
    pub async fn finished(&mut self) -> Option<Recipe> {
        (&mut self.rx).await.ok()
    }

    /// Non-blocking check, for callers outside an async context.
    pub fn try_finished(&mut self) -> Option<Recipe> {
        self.rx.try_recv().ok()
    }
}

// ============================================================================
// Programs
// ============================================================================

/// A capability that prepares (or simulates preparing) one recipe.
pub trait CookingProgram: Send + Sync {
    fn cook(
        &self,
        recipe: &Recipe,
        on_complete: Option<CompletionHandle>,
        supplies: &Supplies,
    ) -> ExecutionOutcome;
}

/// Recipe ids that have a program slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    FriedEgg,
    WhiteRice,
    SurpriseRecipe,
}

impl ProgramId {
    pub const ALL: [ProgramId; 3] = [Self::FriedEgg, Self::WhiteRice, Self::SurpriseRecipe];

    pub fn parse(recipe_id: &str) -> Option<Self> {
        match recipe_id {
            "fried-egg" => Some(Self::FriedEgg),
            "white-rice" => Some(Self::WhiteRice),
            "surprise-recipe" => Some(Self::SurpriseRecipe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FriedEgg => "fried-egg",
            Self::WhiteRice => "white-rice",
            Self::SurpriseRecipe => "surprise-recipe",
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Program id → program.
#[derive(Clone, Default)]
pub struct ProgramRegistry {
    programs: HashMap<ProgramId, Arc<dyn CookingProgram>>,
}

impl fmt::Debug for ProgramRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.programs.keys().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        f.debug_struct("ProgramRegistry").field("programs", &ids).finish()
    }
}

impl ProgramRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three programs the robot ships with.
    pub fn builtin(pacing: &Pacing) -> Self {
        let mut registry = Self::empty();
        registry.register(
            ProgramId::FriedEgg,
            Arc::new(programs::fried_egg::FriedEgg::new(pacing.minute)),
        );
        registry.register(ProgramId::WhiteRice, Arc::new(programs::white_rice::WhiteRice));
        registry.register(
            ProgramId::SurpriseRecipe,
            Arc::new(programs::surprise::SurpriseRecipe),
        );
        registry
    }

    /// Install or replace the program for an id.
    pub fn register(&mut self, id: ProgramId, program: Arc<dyn CookingProgram>) {
        self.programs.insert(id, program);
    }

    pub fn unregister(&mut self, id: ProgramId) {
        self.programs.remove(&id);
    }

    /// Resolve a recipe id. `None` means no program is implemented for it.
    pub fn resolve(&self, recipe_id: &str) -> Option<Arc<dyn CookingProgram>> {
        ProgramId::parse(recipe_id).and_then(|id| self.programs.get(&id).cloned())
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

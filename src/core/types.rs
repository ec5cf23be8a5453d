//! CK-001: Core data model — recipes, supplies, outcomes, ratings.
//!
//! Defines the YAML schema types for the robot, its supplies, and the recipe
//! catalog, plus the values that flow back out of the dispatcher. All config
//! types derive Serialize/Deserialize for YAML roundtripping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Top-level kitchen.yaml
// ============================================================================

/// Root configuration — robot identity, supplies on hand, and the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenConfig {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Robot identity shown on the greeting screen
    pub robot: RobotConfig,

    /// Default supplies used when a dispatch call does not override them
    #[serde(default)]
    pub supplies: Supplies,

    /// Recipe catalog (order-preserving)
    pub recipes: Vec<Recipe>,

    /// UI and simulated-time pacing
    #[serde(default)]
    pub pacing: PacingConfig,
}

// ============================================================================
// Robot
// ============================================================================

/// Robot identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    pub name: String,

    #[serde(default = "default_robot_emoji")]
    pub emoji: String,

    /// Greeting line under the title
    pub greeting: String,

    /// Prompt shown above the menu
    pub question: String,

    /// Model year, rendered next to the name
    #[serde(default)]
    pub model: Option<u32>,
}

fn default_robot_emoji() -> String {
    "🤖".to_string()
}

// ============================================================================
// Recipes and supplies
// ============================================================================

/// An amount of one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub quantity: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(quantity: f64, unit: &str) -> Self {
        Self {
            quantity,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.fract() == 0.0 {
            write!(f, "{:.0} {}", self.quantity, self.unit)
        } else {
            write!(f, "{} {}", self.quantity, self.unit)
        }
    }
}

/// A dish the robot knows about. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier (e.g. `fried-egg`)
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub emoji: String,

    /// Cooking time in minutes
    pub cook_time: u32,

    /// Whether the user's plan entitles them to cook this recipe
    #[serde(default)]
    pub included_in_plan: bool,

    #[serde(default)]
    pub ingredients: IndexMap<String, Quantity>,

    /// Utensil name → needed
    #[serde(default)]
    pub utensils: IndexMap<String, bool>,
}

impl Recipe {
    /// Utensils flagged as needed, in declaration order.
    pub fn needed_utensils(&self) -> impl Iterator<Item = &str> {
        self.utensils
            .iter()
            .filter(|(_, needed)| **needed)
            .map(|(name, _)| name.as_str())
    }

    /// Emoji and name, the way menus show a recipe.
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }
}

/// What is actually on hand. Same shapes as a recipe's requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplies {
    #[serde(default)]
    pub ingredients: IndexMap<String, Quantity>,

    #[serde(default)]
    pub utensils: IndexMap<String, bool>,
}

// ============================================================================
// Pacing
// ============================================================================

/// Pacing as written in YAML (milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay between the greeting and the recipe list
    #[serde(default = "default_reveal_ms")]
    pub menu_reveal_ms: u64,

    /// How long rating feedback stays up before returning to the menu
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,

    /// Length of one simulated cooking minute
    #[serde(default = "default_minute_ms")]
    pub minute_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            menu_reveal_ms: default_reveal_ms(),
            feedback_ms: default_feedback_ms(),
            minute_ms: default_minute_ms(),
        }
    }
}

fn default_reveal_ms() -> u64 {
    3000
}

fn default_feedback_ms() -> u64 {
    3000
}

fn default_minute_ms() -> u64 {
    1000
}

/// Resolved pacing durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub menu_reveal: Duration,
    pub feedback: Duration,
    pub minute: Duration,
}

impl From<&PacingConfig> for Pacing {
    fn from(cfg: &PacingConfig) -> Self {
        Self {
            menu_reveal: Duration::from_millis(cfg.menu_reveal_ms),
            feedback: Duration::from_millis(cfg.feedback_ms),
            minute: Duration::from_millis(cfg.minute_ms),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&PacingConfig::default())
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Machine-readable reason an execution attempt did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    NotFound,
    NotInPlan,
    NotImplemented,
    MissingCallback,
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NotInPlan => write!(f, "NOT_IN_PLAN"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
            Self::MissingCallback => write!(f, "MISSING_CALLBACK"),
        }
    }
}

/// Result of one dispatch call. Exactly one per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Program accepted the job; completion arrives later on the job's channel.
    Running { recipe: Recipe },
    /// Attempt rejected. `recipe` is absent only for `NotFound`.
    Failed {
        code: FailureCode,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        recipe: Option<Recipe>,
    },
}

impl ExecutionOutcome {
    pub fn running(recipe: &Recipe) -> Self {
        Self::Running {
            recipe: recipe.clone(),
        }
    }

    pub fn failed(code: FailureCode, message: &str, recipe: Option<&Recipe>) -> Self {
        Self::Failed {
            code,
            message: message.to_string(),
            recipe: recipe.cloned(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn code(&self) -> Option<FailureCode> {
        match self {
            Self::Running { .. } => None,
            Self::Failed { code, .. } => Some(*code),
        }
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            Self::Running { recipe } => Some(recipe),
            Self::Failed { recipe, .. } => recipe.as_ref(),
        }
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running { recipe } => write!(f, "RUNNING {}", recipe.id),
            Self::Failed { code, message, .. } => write!(f, "{}: {}", code, message),
        }
    }
}

// ============================================================================
// Rating
// ============================================================================

/// How the user felt about the dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Bad,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "+" | "y" | "yes" => Ok(Self::Good),
            "bad" | "-" | "n" | "no" => Ok(Self::Bad),
            other => Err(format!("unknown rating '{}' (expected good or bad)", other)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ck001_config_parse() {
        let yaml = r#"
version: "1.0"
robot:
  name: Chefcito
  greeting: I am your robot cook
  question: What shall we cook today?
  model: 2024
supplies:
  ingredients:
    egg: { quantity: 1, unit: unit }
  utensils:
    pan: true
recipes:
  - id: fried-egg
    name: Fried Egg
    emoji: "🍳"
    cook_time: 5
    included_in_plan: true
    ingredients:
      egg: { quantity: 1, unit: unit }
    utensils:
      pan: true
"#;
        let config: KitchenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.robot.name, "Chefcito");
        assert_eq!(config.robot.emoji, "🤖");
        assert_eq!(config.robot.model, Some(2024));
        assert_eq!(config.recipes.len(), 1);
        assert_eq!(config.recipes[0].cook_time, 5);
        assert!(config.recipes[0].included_in_plan);
        assert_eq!(config.supplies.ingredients["egg"].quantity, 1.0);
        assert_eq!(config.pacing, PacingConfig::default());
    }

    #[test]
    fn test_ck001_recipe_defaults() {
        let yaml = r#"
id: mystery
name: Mystery
cook_time: 10
"#;
        let r: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(!r.included_in_plan);
        assert!(r.ingredients.is_empty());
        assert!(r.utensils.is_empty());
        assert_eq!(r.label(), "Mystery");
    }

    #[test]
    fn test_ck001_needed_utensils_filters_and_keeps_order() {
        let yaml = r#"
id: rice
name: Rice
cook_time: 15
utensils:
  pot: true
  whisk: false
  wooden_spoon: true
"#;
        let r: Recipe = serde_yaml_ng::from_str(yaml).unwrap();
        let needed: Vec<_> = r.needed_utensils().collect();
        assert_eq!(needed, vec!["pot", "wooden_spoon"]);
    }

    #[test]
    fn test_ck001_failure_code_display_and_serde() {
        assert_eq!(FailureCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(FailureCode::NotInPlan.to_string(), "NOT_IN_PLAN");
        assert_eq!(FailureCode::NotImplemented.to_string(), "NOT_IMPLEMENTED");
        assert_eq!(FailureCode::MissingCallback.to_string(), "MISSING_CALLBACK");
        let json = serde_json::to_string(&FailureCode::NotInPlan).unwrap();
        assert_eq!(json, "\"NOT_IN_PLAN\"");
    }

    #[test]
    fn test_ck001_outcome_json_omits_missing_recipe() {
        let outcome = ExecutionOutcome::failed(FailureCode::NotFound, "no such recipe", None);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"code\":\"NOT_FOUND\""));
        assert!(!json.contains("\"recipe\":"));
    }

    #[test]
    fn test_ck001_outcome_accessors() {
        let r: Recipe = serde_yaml_ng::from_str("id: a\nname: A\ncook_time: 1\n").unwrap();
        let running = ExecutionOutcome::running(&r);
        assert!(running.is_running());
        assert_eq!(running.code(), None);
        assert_eq!(running.recipe().map(|r| r.id.as_str()), Some("a"));
        assert_eq!(running.to_string(), "RUNNING a");

        let failed = ExecutionOutcome::failed(FailureCode::NotInPlan, "nope", Some(&r));
        assert!(!failed.is_running());
        assert_eq!(failed.code(), Some(FailureCode::NotInPlan));
        assert_eq!(failed.to_string(), "NOT_IN_PLAN: nope");
    }

    #[test]
    fn test_ck001_quantity_display() {
        assert_eq!(Quantity::new(2.0, "cups").to_string(), "2 cups");
        assert_eq!(Quantity::new(0.5, "cup").to_string(), "0.5 cup");
        assert_eq!(
            Quantity::new(1e20, "grains").to_string(),
            "100000000000000000000 grains"
        );
    }

    #[test]
    fn test_ck001_rating_parse() {
        assert_eq!("good".parse::<Rating>().unwrap(), Rating::Good);
        assert_eq!(" BAD ".parse::<Rating>().unwrap(), Rating::Bad);
        assert_eq!("+".parse::<Rating>().unwrap(), Rating::Good);
        assert!("meh".parse::<Rating>().unwrap_err().contains("meh"));
        assert_eq!(Rating::Good.to_string(), "good");
    }

    #[test]
    fn test_ck001_pacing_from_config() {
        let cfg = PacingConfig {
            menu_reveal_ms: 10,
            feedback_ms: 20,
            minute_ms: 30,
        };
        let p = Pacing::from(&cfg);
        assert_eq!(p.menu_reveal, Duration::from_millis(10));
        assert_eq!(p.feedback, Duration::from_millis(20));
        assert_eq!(p.minute, Duration::from_millis(30));
        assert_eq!(Pacing::default().feedback, Duration::from_millis(3000));
    }
}

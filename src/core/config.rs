//! CK-002: kitchen.yaml parsing, validation, and the built-in kitchen.
//!
//! Parses kitchen.yaml and validates structural constraints:
//! - Version must be "1.0"
//! - Robot name must be present
//! - Recipe ids must be unique and non-empty
//! - Recipe ids must not collide with terminal commands or menu numbers
//! - Cook times and ingredient quantities must be positive

use super::types::*;
use crate::ui::input::is_command_word;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a kitchen.yaml file from disk.
pub fn parse_config_file(path: &Path) -> Result<KitchenConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Parse a kitchen.yaml from a string.
pub fn parse_config(yaml: &str) -> Result<KitchenConfig, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed config. Returns a list of errors (empty = valid).
pub fn validate_config(config: &KitchenConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(ValidationError {
            message: format!("version must be \"1.0\", got \"{}\"", config.version),
        });
    }

    if config.robot.name.trim().is_empty() {
        errors.push(ValidationError {
            message: "robot name must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, recipe) in config.recipes.iter().enumerate() {
        if recipe.id.trim().is_empty() {
            errors.push(ValidationError {
                message: format!("recipe #{} has an empty id", index + 1),
            });
        } else if !seen.insert(recipe.id.as_str()) {
            errors.push(ValidationError {
                message: format!("duplicate recipe id '{}'", recipe.id),
            });
        } else if is_command_word(&recipe.id) {
            errors.push(ValidationError {
                message: format!(
                    "recipe id '{}' is reserved for terminal input",
                    recipe.id
                ),
            });
        }

        if recipe.name.trim().is_empty() {
            errors.push(ValidationError {
                message: format!("recipe '{}' has no name", recipe.id),
            });
        }

        if recipe.cook_time == 0 {
            errors.push(ValidationError {
                message: format!("recipe '{}' must have a positive cook_time", recipe.id),
            });
        }

        for (ingredient, qty) in &recipe.ingredients {
            if qty.quantity <= 0.0 || qty.quantity.is_nan() {
                errors.push(ValidationError {
                    message: format!(
                        "recipe '{}' ingredient '{}' must have a positive quantity",
                        recipe.id, ingredient
                    ),
                });
            }
        }
    }

    for (ingredient, qty) in &config.supplies.ingredients {
        if qty.quantity < 0.0 || qty.quantity.is_nan() {
            errors.push(ValidationError {
                message: format!("supply '{}' must not have a negative quantity", ingredient),
            });
        }
    }

    errors
}

/// Parse and validate in one step, folding validation errors into one message.
pub fn load_config(path: &Path) -> Result<KitchenConfig, String> {
    let config = parse_config_file(path)?;
    let errors = validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    Err(format!("validation failed: {}", joined.join("; ")))
}

/// The kitchen the robot ships with: three recipes, one of them out of plan.
pub fn builtin_config() -> KitchenConfig {
    KitchenConfig {
        version: "1.0".to_string(),
        robot: RobotConfig {
            name: "Chefcito".to_string(),
            emoji: "🤖".to_string(),
            greeting: "I am your robot cook".to_string(),
            question: "What would you like to cook today?".to_string(),
            model: Some(2024),
        },
        supplies: Supplies {
            ingredients: IndexMap::from([
                ("egg".to_string(), Quantity::new(1.0, "unit")),
                ("butter".to_string(), Quantity::new(1.0, "tablespoon")),
            ]),
            utensils: IndexMap::from([
                ("pan".to_string(), true),
                ("spatula".to_string(), true),
                ("plate".to_string(), true),
            ]),
        },
        recipes: vec![
            Recipe {
                id: "fried-egg".to_string(),
                name: "Fried Egg".to_string(),
                emoji: "🍳".to_string(),
                cook_time: 5,
                included_in_plan: true,
                ingredients: IndexMap::from([
                    ("egg".to_string(), Quantity::new(1.0, "unit")),
                    ("butter".to_string(), Quantity::new(1.0, "tablespoon")),
                    ("salt".to_string(), Quantity::new(1.0, "teaspoon")),
                    ("oil".to_string(), Quantity::new(1.0, "tablespoon")),
                ]),
                utensils: IndexMap::from([
                    ("pan".to_string(), true),
                    ("spatula".to_string(), true),
                    ("plate".to_string(), true),
                ]),
            },
            Recipe {
                id: "white-rice".to_string(),
                name: "White Rice".to_string(),
                emoji: "🍚".to_string(),
                cook_time: 15,
                included_in_plan: true,
                ingredients: IndexMap::from([
                    ("rice".to_string(), Quantity::new(1.0, "cup")),
                    ("water".to_string(), Quantity::new(2.0, "cups")),
                    ("salt".to_string(), Quantity::new(1.0, "teaspoon")),
                    ("oil".to_string(), Quantity::new(1.0, "tablespoon")),
                ]),
                utensils: IndexMap::from([
                    ("pot".to_string(), true),
                    ("wooden_spoon".to_string(), true),
                    ("plate".to_string(), true),
                ]),
            },
            Recipe {
                id: "surprise-recipe".to_string(),
                name: "Surprise Recipe".to_string(),
                emoji: "❓".to_string(),
                cook_time: 10,
                included_in_plan: false,
                ingredients: IndexMap::new(),
                utensils: IndexMap::new(),
            },
        ],
        pacing: PacingConfig::default(),
    }
}

/// Render the built-in kitchen as YAML (the `init` template).
pub fn builtin_config_yaml() -> Result<String, String> {
    serde_yaml_ng::to_string(&builtin_config()).map_err(|e| format!("serialize error: {}", e))
}

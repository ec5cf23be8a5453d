//! CK-004: Supply store — what is on hand, and what a recipe would lack.
//!
//! Shortages are informational. The dispatcher never gates a job on them.

use super::types::{Quantity, Recipe, Supplies};
use std::fmt;

/// Something a recipe asks for that the supplies don't cover.
#[derive(Debug, Clone, PartialEq)]
pub enum Shortage {
    /// Missing entirely (`on_hand: None`), too little, or stocked in another unit.
    Ingredient {
        name: String,
        needed: Quantity,
        on_hand: Option<Quantity>,
    },
    Utensil {
        name: String,
    },
}

impl fmt::Display for Shortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingredient {
                name,
                needed,
                on_hand: None,
            } => write!(f, "{}: need {}, have none", name, needed),
            Self::Ingredient {
                name,
                needed,
                on_hand: Some(have),
            } => write!(f, "{}: need {}, have {}", name, needed, have),
            Self::Utensil { name } => write!(f, "{}: utensil not available", name),
        }
    }
}

impl Supplies {
    /// Compare against a recipe's requirements, in the recipe's order.
    pub fn shortages(&self, recipe: &Recipe) -> Vec<Shortage> {
        let mut out = Vec::new();

        for (name, needed) in &recipe.ingredients {
            match self.ingredients.get(name) {
                None => out.push(Shortage::Ingredient {
                    name: name.clone(),
                    needed: needed.clone(),
                    on_hand: None,
                }),
                Some(have) if have.unit != needed.unit || have.quantity < needed.quantity => {
                    out.push(Shortage::Ingredient {
                        name: name.clone(),
                        needed: needed.clone(),
                        on_hand: Some(have.clone()),
                    })
                }
                Some(_) => {}
            }
        }

        for utensil in recipe.needed_utensils() {
            if !self.utensils.get(utensil).copied().unwrap_or(false) {
                out.push(Shortage::Utensil {
                    name: utensil.to_string(),
                });
            }
        }

        out
    }

    pub fn covers(&self, recipe: &Recipe) -> bool {
        self.shortages(recipe).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::builtin_config;

    #[test]
    fn test_ck004_default_supplies_lack_salt_and_oil_for_egg() {
        let config = builtin_config();
        let egg = &config.recipes[0];
        let shortages = config.supplies.shortages(egg);
        let names: Vec<String> = shortages
            .iter()
            .map(|s| match s {
                Shortage::Ingredient { name, .. } | Shortage::Utensil { name } => name.clone(),
            })
            .collect();
        assert_eq!(names, vec!["salt", "oil"]);
        assert!(!config.supplies.covers(egg));
    }

    #[test]
    fn test_ck004_rice_lacks_utensils() {
        let config = builtin_config();
        let rice = &config.recipes[1];
        let shortages = config.supplies.shortages(rice);
        assert!(shortages.contains(&Shortage::Utensil {
            name: "pot".to_string()
        }));
        assert!(!shortages.contains(&Shortage::Utensil {
            name: "plate".to_string()
        }));
    }

    #[test]
    fn test_ck004_empty_recipe_is_covered() {
        let config = builtin_config();
        assert!(Supplies::default().covers(&config.recipes[2]));
    }

    #[test]
    fn test_ck004_insufficient_and_unit_mismatch() {
        let config = builtin_config();
        let rice = &config.recipes[1];
        let mut supplies = Supplies::default();
        supplies
            .ingredients
            .insert("water".to_string(), Quantity::new(1.0, "cups"));
        supplies
            .ingredients
            .insert("rice".to_string(), Quantity::new(200.0, "grams"));
        let shortages = supplies.shortages(rice);
        assert_eq!(
            shortages[0].to_string(),
            "rice: need 1 cup, have 200 grams"
        );
        assert_eq!(
            shortages[1].to_string(),
            "water: need 2 cups, have 1 cups"
        );
        assert_eq!(shortages[2].to_string(), "salt: need 1 teaspoon, have none");
    }

    #[test]
    fn test_ck004_utensil_marked_false_counts_as_missing() {
        let config = builtin_config();
        let mut supplies = config.supplies.clone();
        supplies.utensils.insert("pan".to_string(), false);
        let shortages = supplies.shortages(&config.recipes[0]);
        assert!(shortages
            .iter()
            .any(|s| s.to_string() == "pan: utensil not available"));
    }
}

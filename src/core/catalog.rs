//! CK-003: Recipe catalog — ordered, read-only lookup by id.

use super::types::Recipe;
use indexmap::IndexMap;

/// Immutable menu of recipes, kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: IndexMap<String, Recipe>,
}

impl Catalog {
    /// Build a catalog. Fails on the first duplicate id.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Result<Self, String> {
        let mut map = IndexMap::new();
        for recipe in recipes {
            if map.contains_key(&recipe.id) {
                return Err(format!("duplicate recipe id '{}'", recipe.id));
            }
            map.insert(recipe.id.clone(), recipe);
        }
        Ok(Self { recipes: map })
    }

    pub fn lookup(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// All recipes in insertion order.
    pub fn list_all(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Position-based access, used by numbered menus (0-based).
    pub fn nth(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get_index(index).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

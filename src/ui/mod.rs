//! CK-010: Presentation contract — what the flow controller renders, and the
//! user intents that come back.
//!
//! Render calls are fire-and-forget. Input arrives as [`UserEvent`] values on
//! a channel instead of callbacks.

pub mod input;
pub mod terminal;

use crate::core::supplies::Shortage;
use crate::core::types::{Rating, Recipe, RobotConfig};

/// A user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Pick a recipe from the menu
    Select(String),
    /// Leave the recipe detail
    Back,
    /// Start cooking the recipe on screen
    Start,
    /// Rate the finished dish
    Rate(Rating),
    /// Make another recipe
    Continue,
    /// Stop the session
    Quit,
}

/// Input bindings a presenter can be asked to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    RecipeSelection,
    StartCooking,
}

/// Screen operations the flow controller needs.
pub trait Presenter {
    fn render_greeting(&mut self, robot: &RobotConfig);
    fn render_recipe_list(&mut self, recipes: &[&Recipe]);
    fn render_recipe_detail(&mut self, recipe: &Recipe, shortages: &[Shortage]);
    fn render_cooking(&mut self, name: &str);
    fn render_rating_prompt(&mut self, name: &str);
    fn render_feedback(&mut self, rating: Rating, name: &str);
    fn render_continue_prompt(&mut self);
    /// Blocking-style notice (errors, "dish is ready").
    fn alert(&mut self, message: &str);
    /// Set up an input binding. Called at most once per listener per controller.
    fn bind(&mut self, listener: Listener);
}

/// Feedback line for a rating.
pub fn feedback_message(rating: Rating, name: &str) -> String {
    match rating {
        Rating::Good => format!("I'm glad you liked the {}! 😊", name),
        Rating::Bad => format!("Understood, I'll improve the {} recipe. 🤖", name),
    }
}

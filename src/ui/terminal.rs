//! CK-011: Terminal presenter — plain text screens on any `Write`.

use super::{feedback_message, Listener, Presenter};
use crate::core::supplies::Shortage;
use crate::core::types::{Rating, Recipe, RobotConfig};
use std::fmt::Display;
use std::io::Write;
use tracing::warn;

const RULE: &str = "────────────────────────────────────────";

/// Writes each screen as a block of lines.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("terminal write failed: {}", e);
        }
    }

    fn screen(&mut self) {
        self.line("");
        self.line(RULE);
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!("terminal flush failed: {}", e);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_greeting(&mut self, robot: &RobotConfig) {
        self.screen();
        let title = match robot.model {
            Some(model) => format!("{} {} {}", robot.emoji, robot.name, model),
            None => format!("{} {}", robot.emoji, robot.name),
        };
        self.line(title);
        self.line(&robot.greeting);
        self.line(&robot.question);
        self.flush();
    }

    fn render_recipe_list(&mut self, recipes: &[&Recipe]) {
        self.line("");
        for (i, recipe) in recipes.iter().enumerate() {
            self.line(format!("  [{}] {}", i + 1, recipe.label()));
        }
        self.flush();
    }

    fn render_recipe_detail(&mut self, recipe: &Recipe, shortages: &[Shortage]) {
        self.screen();
        self.line(recipe.label());
        self.line("");
        self.line("⏱️  Cooking time");
        self.line(format!("    {} minutes", recipe.cook_time));
        self.line("📋 Ingredients");
        for (name, qty) in &recipe.ingredients {
            self.line(format!("    {}: {}", name.replace('_', " "), qty));
        }
        let utensils: Vec<String> = recipe
            .needed_utensils()
            .map(|u| u.replace('_', " "))
            .collect();
        if !utensils.is_empty() {
            self.line("🧰 Utensils");
            for u in utensils {
                self.line(format!("    {}", u));
            }
        }
        if !shortages.is_empty() {
            self.line("🛒 Missing from your supplies");
            for s in shortages {
                self.line(format!("    {}", s));
            }
        }
        self.line("");
        self.line("  [s] ▶️  Start cooking    [b] ← Back");
        self.flush();
    }

    fn render_cooking(&mut self, name: &str) {
        self.screen();
        self.line(format!("🤖 Preparing {}...", name));
        self.line("Please wait, I'll let you know when it's done ⟳");
        self.flush();
    }

    fn render_rating_prompt(&mut self, name: &str) {
        self.screen();
        self.line(format!("How is the {}?", name));
        self.line("  [good] 👍 Delicious    [bad] 👎 Not great");
        self.flush();
    }

    fn render_feedback(&mut self, rating: Rating, name: &str) {
        self.screen();
        self.line(feedback_message(rating, name));
        self.line("Wait a moment...");
        self.flush();
    }

    fn render_continue_prompt(&mut self) {
        self.screen();
        self.line("Let's keep cooking!");
        self.line("  [c] 🍳 Make another recipe");
        self.flush();
    }

    fn alert(&mut self, message: &str) {
        self.line("");
        for l in message.lines() {
            self.line(format!("! {}", l));
        }
        self.flush();
    }

    fn bind(&mut self, listener: Listener) {
        let hint = match listener {
            Listener::RecipeSelection => "Type a number or recipe id to choose a dish, q to quit.",
            Listener::StartCooking => "On a recipe: s starts cooking, b goes back.",
        };
        self.line(format!("(tip) {}", hint));
        self.flush();
    }
}

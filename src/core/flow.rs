//! CK-013: Flow controller — the menu → detail → cooking → rating → feedback
//! cycle.
//!
//! Single-threaded and event-driven. The run loop waits on three sources:
//! user events, the pending cooking job, and one pacing timer. Events that
//! don't apply to the current state are ignored, and so is a selection made
//! before the recipe list is on screen.

use super::dispatcher::Dispatcher;
use super::registry::PendingJob;
use super::types::{ExecutionOutcome, FailureCode, KitchenConfig, Pacing, Rating, Recipe, RobotConfig};
use crate::programs::CONTRACT_LOG_TARGET;
use crate::ui::{Listener, Presenter, UserEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Where the user is in the journey.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Menu,
    Detail { recipe_id: String },
    Cooking { recipe_id: String },
    RatingPrompt { recipe: Recipe },
    Feedback { rating: Rating, recipe: Recipe },
}

/// Pacing timers. At most one is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Show the recipe list under the greeting
    RevealMenu,
    /// Leave the feedback screen
    ReturnToMenu,
}

/// Listeners already handed to the presenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub recipe_selection: bool,
    pub start_cooking: bool,
}

impl Bindings {
    /// Mark a listener bound. Returns true only the first time.
    fn claim(&mut self, listener: Listener) -> bool {
        let slot = match listener {
            Listener::RecipeSelection => &mut self.recipe_selection,
            Listener::StartCooking => &mut self.start_cooking,
        };
        !std::mem::replace(slot, true)
    }
}

pub struct FlowController<P: Presenter> {
    dispatcher: Arc<Dispatcher>,
    robot: RobotConfig,
    pacing: Pacing,
    presenter: P,
    state: FlowState,
    bindings: Bindings,
    job: Option<PendingJob>,
    timer: Option<(Instant, Timer)>,
    /// Recipe list rendered for the current menu visit
    menu_shown: bool,
}

impl<P: Presenter> FlowController<P> {
    pub fn new(dispatcher: Arc<Dispatcher>, robot: RobotConfig, pacing: Pacing, presenter: P) -> Self {
        Self {
            dispatcher,
            robot,
            pacing,
            presenter,
            state: FlowState::Menu,
            bindings: Bindings::default(),
            job: None,
            timer: None,
            menu_shown: false,
        }
    }

    /// Controller over the built-in programs for a config.
    pub fn from_config(config: &KitchenConfig, presenter: P) -> Result<Self, String> {
        let dispatcher = Dispatcher::from_config(config)?;
        Ok(Self::new(
            Arc::new(dispatcher),
            config.robot.clone(),
            Pacing::from(&config.pacing),
            presenter,
        ))
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    pub fn pending_timer(&self) -> Option<Timer> {
        self.timer.map(|(_, t)| t)
    }

    pub fn menu_shown(&self) -> bool {
        self.menu_shown
    }

    pub fn is_cooking(&self) -> bool {
        self.job.is_some()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Show the greeting and schedule the menu reveal. Entry point and
    /// target of `back` / `continue`.
    pub fn initialize(&mut self) {
        info!(robot = %self.robot.name, "cooking robot started");
        self.state = FlowState::Menu;
        self.menu_shown = false;
        self.presenter.render_greeting(&self.robot);
        self.schedule(Timer::RevealMenu, self.pacing.menu_reveal);
    }

    /// Apply one user event. Returns false when the session should end.
    pub fn handle(&mut self, event: UserEvent) -> bool {
        match (&self.state, event) {
            (_, UserEvent::Quit) => return false,
            (FlowState::Menu, UserEvent::Select(id)) => self.select(&id),
            (FlowState::Menu, UserEvent::Continue) => self.initialize(),
            (FlowState::Detail { .. }, UserEvent::Back) => {
                info!("back to menu");
                self.initialize();
            }
            (FlowState::Detail { .. }, UserEvent::Start) => {
                self.start();
            }
            (FlowState::RatingPrompt { .. }, UserEvent::Rate(rating)) => self.rate(rating),
            (state, event) => debug!(?state, ?event, "event ignored in current state"),
        }
        true
    }

    /// `Menu --select--> Detail`. Unknown ids, or a menu whose list is not
    /// shown yet, leave the menu as is.
    pub fn select(&mut self, recipe_id: &str) {
        if self.state != FlowState::Menu {
            return;
        }
        if !self.menu_shown {
            debug!(recipe_id, "selection before the recipe list is shown");
            return;
        }
        let Some(recipe) = self.dispatcher.catalog().lookup(recipe_id) else {
            debug!(recipe_id, "selection does not match any recipe");
            return;
        };
        info!(recipe_id, "recipe selected");
        let shortages = self.dispatcher.default_supplies().shortages(recipe);
        self.presenter.render_recipe_detail(recipe, &shortages);
        self.state = FlowState::Detail {
            recipe_id: recipe_id.to_string(),
        };
        self.timer = None;
        self.bind(Listener::StartCooking);
    }

    /// `Detail --start-->`. Returns the dispatcher outcome, or `None` when not
    /// on a recipe detail.
    pub fn start(&mut self) -> Option<ExecutionOutcome> {
        let FlowState::Detail { recipe_id } = &self.state else {
            return None;
        };
        let recipe_id = recipe_id.clone();
        info!(recipe_id = %recipe_id, "start cooking requested");

        let (outcome, job) = self.dispatcher.start(&recipe_id, None);
        match &outcome {
            ExecutionOutcome::Running { recipe } => {
                self.presenter.render_cooking(&recipe.name);
                self.job = Some(job);
                self.state = FlowState::Cooking { recipe_id };
            }
            ExecutionOutcome::Failed { code, message, .. } => {
                if *code == FailureCode::MissingCallback {
                    error!(
                        target: CONTRACT_LOG_TARGET,
                        recipe_id = %recipe_id,
                        code = %code,
                        "dispatcher reported a caller contract violation"
                    );
                } else {
                    info!(recipe_id = %recipe_id, code = %code, "recipe could not start");
                }
                self.presenter.alert(message);
            }
        }
        Some(outcome)
    }

    /// `Cooking --completion--> RatingPrompt`.
    pub fn complete(&mut self, recipe: Recipe) {
        match &self.state {
            FlowState::Cooking { recipe_id } if *recipe_id == recipe.id => {}
            state => {
                warn!(?state, recipe_id = %recipe.id, "completion arrived outside of cooking");
                return;
            }
        }
        info!(recipe_id = %recipe.id, "cooking finished");
        self.job = None;
        self.presenter.alert(&format!(
            "✅ Your {} is ready to serve!\n\nI hope you like it 🤖",
            recipe.name
        ));
        self.presenter.render_rating_prompt(&recipe.name);
        self.state = FlowState::RatingPrompt { recipe };
    }

    /// `RatingPrompt --rate--> Feedback`, then back to the menu after the
    /// feedback delay whatever the rating.
    pub fn rate(&mut self, rating: Rating) {
        let FlowState::RatingPrompt { recipe } = &self.state else {
            return;
        };
        let recipe = recipe.clone();
        info!(recipe_id = %recipe.id, %rating, "dish rated");
        self.presenter.render_feedback(rating, &recipe.name);
        self.state = FlowState::Feedback { rating, recipe };
        self.schedule(Timer::ReturnToMenu, self.pacing.feedback);
    }

    /// Apply an elapsed timer.
    pub fn fire(&mut self, timer: Timer) {
        match (timer, &self.state) {
            (Timer::RevealMenu, FlowState::Menu) => {
                let recipes: Vec<&Recipe> = self.dispatcher.catalog().list_all().collect();
                self.presenter.render_recipe_list(&recipes);
                self.menu_shown = true;
                self.bind(Listener::RecipeSelection);
            }
            (Timer::ReturnToMenu, FlowState::Feedback { .. }) => {
                self.state = FlowState::Menu;
                self.menu_shown = false;
                self.presenter.render_continue_prompt();
            }
            (timer, state) => debug!(?timer, ?state, "stale timer"),
        }
    }

    /// Drive the controller until `Quit` or the event channel closes.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UserEvent>) {
        self.initialize();
        loop {
            let deadline = self.timer.map(|(at, _)| at);
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        if !self.handle(event) {
                            info!("session ended");
                            break;
                        }
                    }
                    None => {
                        debug!("input closed");
                        break;
                    }
                },
                finished = wait_for_job(&mut self.job) => {
                    // a finished receiver must not be polled again
                    self.job = None;
                    match finished {
                        Some(recipe) => self.complete(recipe),
                        None => warn!("cooking program dropped its job without finishing"),
                    }
                }
                _ = wait_until(deadline) => {
                    if let Some((_, timer)) = self.timer.take() {
                        self.fire(timer);
                    }
                }
            }
        }
    }

    fn schedule(&mut self, timer: Timer, after: Duration) {
        self.timer = Some((Instant::now() + after, timer));
    }

    fn bind(&mut self, listener: Listener) {
        if self.bindings.claim(listener) {
            self.presenter.bind(listener);
        }
    }
}

async fn wait_for_job(job: &mut Option<PendingJob>) -> Option<Recipe> {
    match job {
        Some(job) => job.finished().await,
        None => std::future::pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

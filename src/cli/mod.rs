//! CK-014: CLI subcommands — init, validate, menu, show, cook, run.

use crate::core::config::{self, builtin_config};
use crate::core::dispatcher::Dispatcher;
use crate::core::flow::FlowController;
use crate::core::types::{ExecutionOutcome, KitchenConfig, Pacing};
use crate::ui::input::spawn_stdin_reader;
use crate::ui::terminal::TerminalPresenter;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter kitchen.yaml
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a kitchen.yaml
    Validate {
        /// Path to kitchen.yaml (default: built-in kitchen)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List recipes in menu order
    Menu {
        /// Path to kitchen.yaml (default: built-in kitchen)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show a recipe and what the supplies are missing for it
    Show {
        /// Recipe id
        id: String,

        /// Path to kitchen.yaml (default: built-in kitchen)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Dispatch one recipe and report the outcome
    Cook {
        /// Recipe id
        id: String,

        /// Path to kitchen.yaml (default: built-in kitchen)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Return as soon as the program accepts the job
        #[arg(long)]
        no_wait: bool,
    },

    /// Interactive cooking session on the terminal
    Run {
        /// Path to kitchen.yaml (default: built-in kitchen)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Dispatch a CLI command.
pub async fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(file.as_deref()),
        Commands::Menu { file } => cmd_menu(file.as_deref()),
        Commands::Show { id, file } => cmd_show(file.as_deref(), &id),
        Commands::Cook {
            id,
            file,
            json,
            no_wait,
        } => cmd_cook(file.as_deref(), &id, json, no_wait).await,
        Commands::Run { file } => cmd_run(file.as_deref()).await,
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("kitchen.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    std::fs::create_dir_all(path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    let template = config::builtin_config_yaml()?;
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized kitchen at {}", path.display());
    println!("  Created: {}", config_path.display());
    Ok(())
}

fn cmd_validate(file: Option<&Path>) -> Result<(), String> {
    let config = match file {
        Some(path) => config::parse_config_file(path)?,
        None => builtin_config(),
    };
    let errors = config::validate_config(&config);

    if errors.is_empty() {
        let in_plan = config.recipes.iter().filter(|r| r.included_in_plan).count();
        println!(
            "OK: {} ({} recipes, {} in plan)",
            config.robot.name,
            config.recipes.len(),
            in_plan
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Config from `-f`, or the built-in kitchen.
fn load(file: Option<&Path>) -> Result<KitchenConfig, String> {
    match file {
        Some(path) => config::load_config(path),
        None => Ok(builtin_config()),
    }
}

fn cmd_menu(file: Option<&Path>) -> Result<(), String> {
    let config = load(file)?;
    let dispatcher = Dispatcher::from_config(&config)?;

    println!("{} {}", config.robot.emoji, config.robot.name);
    for (i, recipe) in dispatcher.catalog().list_all().enumerate() {
        let plan = if recipe.included_in_plan {
            ""
        } else {
            "  (not in plan)"
        };
        println!(
            "  [{}] {:<22} {:>3} min  {}{}",
            i + 1,
            recipe.label(),
            recipe.cook_time,
            recipe.id,
            plan
        );
    }
    Ok(())
}

fn cmd_show(file: Option<&Path>, id: &str) -> Result<(), String> {
    let config = load(file)?;
    let dispatcher = Dispatcher::from_config(&config)?;
    let recipe = dispatcher
        .catalog()
        .lookup(id)
        .ok_or_else(|| format!("unknown recipe '{}'", id))?;

    println!("{}", recipe.label());
    println!("  id:        {}", recipe.id);
    println!("  cook time: {} minutes", recipe.cook_time);
    println!(
        "  plan:      {}",
        if recipe.included_in_plan {
            "included"
        } else {
            "not included"
        }
    );
    if !recipe.ingredients.is_empty() {
        println!("  ingredients:");
        for (name, qty) in &recipe.ingredients {
            println!("    {}: {}", name, qty);
        }
    }
    let utensils: Vec<&str> = recipe.needed_utensils().collect();
    if !utensils.is_empty() {
        println!("  utensils:  {}", utensils.join(", "));
    }

    let shortages = dispatcher.default_supplies().shortages(recipe);
    if shortages.is_empty() {
        println!("  supplies:  all on hand");
    } else {
        println!("  missing:");
        for s in &shortages {
            println!("    {}", s);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &ExecutionOutcome, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(outcome)
            .map_err(|e| format!("JSON serialize error: {}", e))?;
        println!("{}", out);
    } else {
        println!("{}", outcome);
    }
    Ok(())
}

async fn cmd_cook(file: Option<&Path>, id: &str, json: bool, no_wait: bool) -> Result<(), String> {
    let config = load(file)?;
    let dispatcher = Dispatcher::from_config(&config)?;

    let (outcome, mut job) = dispatcher.start(id, None);
    print_outcome(&outcome, json)?;

    if let ExecutionOutcome::Failed { code, .. } = &outcome {
        return Err(format!("cooking '{}' failed: {}", id, code));
    }
    if no_wait {
        return Ok(());
    }

    match job.finished().await {
        Some(recipe) => {
            if !json {
                println!("✅ Your {} is ready to serve!", recipe.name);
            }
            Ok(())
        }
        None => Err(format!("cooking program for '{}' dropped the job", id)),
    }
}

async fn cmd_run(file: Option<&Path>) -> Result<(), String> {
    let config = load(file)?;
    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);
    let (tx, rx) = mpsc::channel(16);
    let reader = spawn_stdin_reader(dispatcher.shared_catalog(), tx);

    let mut flow = FlowController::new(
        dispatcher,
        config.robot.clone(),
        Pacing::from(&config.pacing),
        TerminalPresenter::new(std::io::stdout()),
    );

    flow.run(rx).await;
    reader.abort();
    println!("👋 Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_kitchen(dir: &Path, yaml: &str) -> PathBuf {
        let path = dir.join("kitchen.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    fn fast_kitchen(dir: &Path) -> PathBuf {
        let mut config = builtin_config();
        config.pacing.minute_ms = 1;
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        write_kitchen(dir, &yaml)
    }

    #[test]
    fn test_ck014_init() {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path()).unwrap();
        let written = dir.path().join("kitchen.yaml");
        assert!(written.exists());
        assert!(config::load_config(&written).is_ok());
    }

    #[test]
    fn test_ck014_init_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path()).unwrap();
        let err = cmd_init(dir.path()).unwrap_err();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn test_ck014_init_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("new-kitchen");
        cmd_init(&sub).unwrap();
        assert!(sub.join("kitchen.yaml").exists());
    }

    #[test]
    fn test_ck014_validate_builtin() {
        cmd_validate(None).unwrap();
    }

    #[test]
    fn test_ck014_validate_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_kitchen(
            dir.path(),
            r#"
version: "2.0"
robot:
  name: ""
  greeting: hi
  question: what?
recipes: []
"#,
        );
        let err = cmd_validate(Some(&path)).unwrap_err();
        assert_eq!(err, "2 validation error(s)");
    }

    #[test]
    fn test_ck014_menu_and_show() {
        cmd_menu(None).unwrap();
        cmd_show(None, "white-rice").unwrap();
        cmd_show(None, "surprise-recipe").unwrap();
    }

    #[test]
    fn test_ck014_show_unknown() {
        let err = cmd_show(None, "unknown-id").unwrap_err();
        assert!(err.contains("unknown recipe 'unknown-id'"));
    }

    #[test]
    fn test_ck014_menu_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_kitchen(dir.path(), "version: [");
        assert!(cmd_menu(Some(&path)).is_err());
    }

    #[tokio::test]
    async fn test_ck014_cook_fried_egg_waits_for_completion() {
        let dir = tempfile::tempdir().unwrap();
        let path = fast_kitchen(dir.path());
        cmd_cook(Some(&path), "fried-egg", false, false).await.unwrap();
        cmd_cook(Some(&path), "fried-egg", true, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_ck014_cook_no_wait() {
        cmd_cook(None, "fried-egg", true, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_ck014_cook_failures_are_errors() {
        let err = cmd_cook(None, "white-rice", false, true).await.unwrap_err();
        assert!(err.contains("NOT_IMPLEMENTED"));
        let err = cmd_cook(None, "surprise-recipe", true, true).await.unwrap_err();
        assert!(err.contains("NOT_IN_PLAN"));
        let err = cmd_cook(None, "unknown-id", false, true).await.unwrap_err();
        assert!(err.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_ck014_dispatch_init_and_validate() {
        let dir = tempfile::tempdir().unwrap();
        dispatch(Commands::Init {
            path: dir.path().to_path_buf(),
        })
        .await
        .unwrap();
        dispatch(Commands::Validate {
            file: Some(dir.path().join("kitchen.yaml")),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_ck014_dispatch_cook() {
        let dir = tempfile::tempdir().unwrap();
        let path = fast_kitchen(dir.path());
        dispatch(Commands::Cook {
            id: "fried-egg".to_string(),
            file: Some(path),
            json: false,
            no_wait: false,
        })
        .await
        .unwrap();
    }
}

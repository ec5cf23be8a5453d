//! Chefcito CLI — a simulated cooking robot.

use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "chefcito",
    version,
    about = "Simulated cooking robot — recipe menu, cooking programs, ratings"
)]
struct Cli {
    /// Verbose logging to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: chefcito::cli::Commands,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
    debug!("chefcito started with verbosity level: {}", cli.verbose);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: cannot start async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let result = runtime.block_on(chefcito::cli::dispatch(cli.command));
    // the stdin reader may still be parked in a blocking read
    runtime.shutdown_background();

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

//! Leave allocation scenario runner.
//!
//! Usage:
//!   leave-check --scenario <file> validate
//!   leave-check --scenario <file> reconcile
//!   leave-check --scenario <file> carry-forward --employee <id> --leave-type <id> --as-of <date>
//!   leave-check --scenario <file> cap-check --employee <id> --leave-type <id>
//!     --from <date> --to <date> --amount <days>
//!
//! Prints the outcome as JSON on stdout and exits with status 2 when a rule
//! rejects the request.

mod args;
mod scenario;

use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use leave_core::allocation::AllocationPolicy;
use leave_shared::{AppConfig, AppError, LoggingConfig};

use args::Args;
use scenario::Scenario;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse().unwrap_or_else(|e| e.exit());

    let config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging);

    let scenario = Scenario::load(&args.scenario)?;
    info!(scenario = %args.scenario.display(), command = ?args.command, "Running scenario");

    let policy = AllocationPolicy::from(&config.allocation);
    let outcome = scenario::run(scenario, &args.command, policy)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if outcome.is_rejected() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

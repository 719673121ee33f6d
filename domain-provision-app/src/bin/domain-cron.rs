//! Cron entry point for the provisioning reconciliation jobs.
//!
//! The external scheduler invokes one subcommand per cadence:
//! `nameserver-watch` (~30 min), `availability-watch` (~15 min),
//! `zone-cleanup` (~60 min). A run exits non-zero only on startup failure;
//! per-record reconciliation failures are logged and retried next cycle.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use domain_provision_app::config::AppConfig;
use domain_provision_app::AppState;
use domain_provision_core::error::CoreResult;
use domain_provision_core::types::JobReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "domain-cron", version, about = "Tenant custom-domain reconciliation jobs")]
struct Cli {
    /// Path to the TOML config file (falls back to $DOMAIN_PROVISION_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    job: Job,
}

#[derive(Subcommand)]
enum Job {
    /// Check registrar delegation for domains awaiting a nameserver change
    NameserverWatch,
    /// Probe HTTPS availability and activate ready domains
    AvailabilityWatch,
    /// Delete provider zones whose grace period has elapsed
    ZoneCleanup,
}

async fn run_job(state: &AppState, job: &Job) -> CoreResult<JobReport> {
    match job {
        Job::NameserverWatch => state.nameserver_watcher.run().await,
        Job::AvailabilityWatch => state.availability_watcher.run().await,
        Job::ZoneCleanup => state.zone_cleanup.run().await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_job(&state, &cli.job).await {
        Ok(report) => {
            // Per-record failures are already logged by the job; the run
            // itself succeeded.
            tracing::info!(
                "{}: {} processed, {} transitioned, {} failed, {} abandoned",
                report.job,
                report.processed,
                report.transitioned,
                report.failed,
                report.abandoned
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Job failed before processing records: {e}");
            ExitCode::FAILURE
        }
    }
}

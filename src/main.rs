//! unifi-group-sync CLI entrypoint.
//!
//! Resolves the host list, shows the member diff for the firewall group and
//! pushes the new member list to the controller.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use unifi_group_sync::cli::{Cli, DiffReview, OutputFormatter, TerminalPrompter};
use unifi_group_sync::config::{load_dotenv, LogLevel, SyncSettings};
use unifi_group_sync::controller::ControllerClient;
use unifi_group_sync::error::Result;
use unifi_group_sync::resolver::{read_host_file, SystemResolver};
use unifi_group_sync::syncer::Syncer;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // UNIFI_* values from .env must be visible before the flags are parsed
    let env_file = match load_dotenv(None) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse_args();
    let formatter = OutputFormatter::new(cli.output);
    let prompter = TerminalPrompter::new();

    let settings = match SyncSettings::resolve(cli, &prompter) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    init_logging(settings.log_level);
    log_startup(env_file.as_deref(), &settings);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&settings, &formatter, &prompter)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence over `--log-level` when set.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Reports what was read before the subscriber existed.
fn log_startup(env_file: Option<&Path>, settings: &SyncSettings) {
    match env_file {
        Some(path) => debug!("Loaded environment from {}", path.display()),
        None => debug!("No .env file in the working directory"),
    }
    debug!("Resolved settings: {settings:?}");
}

/// Main async entry point.
async fn run(
    settings: &SyncSettings,
    formatter: &OutputFormatter,
    prompter: &TerminalPrompter,
) -> Result<()> {
    let hosts = read_host_file(&settings.host_file)?;
    let resolver = SystemResolver::new();
    let client = ControllerClient::new(
        &settings.controller_url,
        &settings.site,
        settings.verify_tls,
    )?;

    let syncer = Syncer::new(&resolver, &client)
        .with_confirm(settings.confirm)
        .with_dry_run(settings.dry_run);

    let resolved = syncer.resolve(&hosts).await?;
    client.login(&settings.username, &settings.password).await?;
    let plan = syncer.plan(&resolved, &settings.group_id).await?;

    let review = DiffReview::new(formatter, prompter).with_dry_run(settings.dry_run);
    let table_shown = review.show(
        &settings.group_id,
        &plan.diff,
        &mut io::stdout(),
        &mut io::stderr(),
    )?;

    let outcome = syncer
        .apply(&plan, |plan| review.approve(plan, table_shown, &mut io::stderr()))
        .await?;

    eprintln!("{}", OutputFormatter::format_outcome(&outcome));
    Ok(())
}

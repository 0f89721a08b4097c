//! Dashboard entry-point: loads settings and the seed, then runs one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::cli::{self, Cli};
use dashboard::config::DashboardSettings;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard")])
        .wrap_err("failed to load dashboard settings")?;
    init_tracing(settings.log_json);

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = cli::load_seed(settings.seed_path.as_deref())
        .wrap_err("failed to load seed document")?
        .into_service(Arc::clone(&clock));
    let preferences_path = settings.preferences_path();

    let mut stdout = io::stdout().lock();
    cli::execute(
        &args.command,
        &service,
        || cli::open_preferences(&preferences_path),
        clock.utc(),
        &mut stdout,
    )
    .wrap_err("command failed")?;
    stdout.flush().wrap_err("failed to flush stdout")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

//! compose-setup — inject the JWT public key into docker-compose.yml.
//!
//! Entry point and error handling boundary. Uses `anyhow` for context
//! chains; every failure exits with status 1.

mod cli;

use compose_setup::config::Config;
use compose_setup::env::Env;
use compose_setup::license::StdinPrompt;
use compose_setup::report::{self, Reporter};
use compose_setup::setup::{ConfigInjector, SetupError};

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::Cli;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match err.downcast_ref::<SetupError>() {
            // Already reported on stdout by the license step.
            Some(SetupError::Interrupted) => {}
            Some(setup_err) => {
                report::print_failure(&setup_err.to_string());
                if let Some(hint) = setup_err.hint() {
                    eprintln!();
                    eprintln!("{hint}");
                }
            }
            None => report::print_failure(&format!("{err:#}")),
        }
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let work_dir = std::env::current_dir().context("failed to determine working directory")?;

    let mut config = Config::load(&work_dir, cli.config.as_deref(), &Env::real())
        .context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    tracing::debug!(?config, "resolved configuration");

    let injector = ConfigInjector::new(&config, &work_dir, cli.options());
    let mut reporter = Reporter::stdout();
    injector.run(&StdinPrompt, &mut reporter).await?;

    Ok(())
}

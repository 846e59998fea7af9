//! Contract initializer
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI selector ──▶ config (env) ──▶ contracts (ABIs) ──▶ blockchain (WS node)
//!                                                              │
//!                         initializer::dispatch ◀──────────────┘
//!                           for each contract:
//!                             build init call → sign → send → poll receipt
//! ```
//!
//! Configuration and artifacts are validated before the node connection is
//! opened; the first unconfirmed contract stops the run with a failure exit.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use contract_initializer::cli::Cli;
use contract_initializer::config::load_config;
use contract_initializer::initializer::{dispatch, Initializer};
use contract_initializer::observability::init_logging;
use contract_initializer::InterfaceSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(()) => {
            tracing::info!("Initialization completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Initialization stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli.env_file)?;
    tracing::info!(
        network = %config.deployment.network,
        setter = %config.deployment.setter_address,
        gas_limit = config.deployment.gas_limit,
        gas_price_wei = config.deployment.gas_price_wei,
        "Configuration loaded"
    );

    let interfaces = InterfaceSet::load(&cli.build_dir)?;
    tracing::info!(build_dir = %cli.build_dir.display(), "Contract interfaces loaded");

    let initializer = Initializer::connect(config, interfaces).await?;

    dispatch(cli.contract, &initializer).await?;
    Ok(())
}

//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::contracts::artifacts::DEFAULT_BUILD_DIR;
use crate::initializer::Selector;

#[derive(Debug, Parser)]
#[command(name = "contract-initializer")]
#[command(about = "Call init on deployed contracts and wait for confirmation", long_about = None)]
pub struct Cli {
    /// Name of contract. Can be: all, staking, auction, nativeswap, foreignswap, bpd, subbalances, token
    pub contract: Selector,

    /// Dotenv file read before the process environment
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Directory holding the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_BUILD_DIR)]
    pub build_dir: PathBuf,
}

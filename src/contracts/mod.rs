//! The fixed set of contracts this tool initializes.
//!
//! # Data Flow
//! ```text
//! build/contracts/*.json
//!     → artifacts.rs (InterfaceSet: kind → JsonAbi)
//! InitializerConfig
//!     → calls.rs (per-kind init argument table → calldata)
//! ```

pub mod artifacts;
pub mod calls;

use std::fmt;

pub use artifacts::{ArtifactError, InterfaceSet};
pub use calls::{init_args, CallError, InitArg, InitCall};

/// One of the seven deployed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractKind {
    Token,
    NativeSwap,
    Auction,
    Staking,
    ForeignSwap,
    Bpd,
    SubBalances,
}

impl ContractKind {
    /// Order used when every contract is initialized in one run.
    pub const INIT_ORDER: [ContractKind; 7] = [
        ContractKind::Staking,
        ContractKind::Auction,
        ContractKind::NativeSwap,
        ContractKind::ForeignSwap,
        ContractKind::Bpd,
        ContractKind::SubBalances,
        ContractKind::Token,
    ];

    /// Name accepted on the command line.
    pub fn selector(&self) -> &'static str {
        match self {
            ContractKind::Token => "token",
            ContractKind::NativeSwap => "nativeswap",
            ContractKind::Auction => "auction",
            ContractKind::Staking => "staking",
            ContractKind::ForeignSwap => "foreignswap",
            ContractKind::Bpd => "bpd",
            ContractKind::SubBalances => "subbalances",
        }
    }

    /// Build artifact file holding this contract's ABI.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ContractKind::Token => "Token.json",
            ContractKind::NativeSwap => "NativeSwap.json",
            ContractKind::Auction => "Auction.json",
            ContractKind::Staking => "Staking.json",
            ContractKind::ForeignSwap => "ForeignSwap.json",
            ContractKind::Bpd => "BPD.json",
            ContractKind::SubBalances => "SubBalances.json",
        }
    }

    pub fn from_selector(name: &str) -> Option<Self> {
        Self::INIT_ORDER.into_iter().find(|kind| kind.selector() == name)
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContractKind::Token => "Token",
            ContractKind::NativeSwap => "NativeSwap",
            ContractKind::Auction => "Auction",
            ContractKind::Staking => "Staking",
            ContractKind::ForeignSwap => "ForeignSwap",
            ContractKind::Bpd => "BPD",
            ContractKind::SubBalances => "SubBalances",
        };
        f.write_str(name)
    }
}

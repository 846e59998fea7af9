//! Contract selection and sequencing.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::contracts::ContractKind;

/// Accepted selector values, in help-text order.
pub const SELECTORS: [&str; 8] = [
    "all",
    "staking",
    "auction",
    "nativeswap",
    "foreignswap",
    "bpd",
    "subbalances",
    "token",
];

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Contract '{0}' is not allowed, expected one of: {list}", list = SELECTORS.join(", "))]
    UnknownSelector(String),

    #[error("{0} initialization was not confirmed")]
    NotConfirmed(ContractKind),

    #[error("{kind} initialization aborted: {source}")]
    Chain {
        kind: ContractKind,
        #[source]
        source: BlockchainError,
    },
}

/// Which contracts a run initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    All,
    Single(ContractKind),
}

impl Selector {
    pub fn contracts(&self) -> Vec<ContractKind> {
        match self {
            Selector::All => ContractKind::INIT_ORDER.to_vec(),
            Selector::Single(kind) => vec![*kind],
        }
    }
}

impl FromStr for Selector {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Selector::All);
        }
        ContractKind::from_selector(s)
            .map(Selector::Single)
            .ok_or_else(|| DispatchError::UnknownSelector(s.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Single(kind) => f.write_str(kind.selector()),
        }
    }
}

/// Initialize one contract and wait for its confirmation.
#[async_trait]
pub trait InitStep: Send + Sync {
    async fn initialize(&self, kind: ContractKind) -> BlockchainResult<ConfirmationStatus>;
}

/// Run the selected initializers in order, stopping at the first one that is
/// not confirmed.
pub async fn dispatch<S>(selector: Selector, step: &S) -> Result<(), DispatchError>
where
    S: InitStep + ?Sized,
{
    for kind in selector.contracts() {
        let status = step
            .initialize(kind)
            .await
            .map_err(|source| DispatchError::Chain { kind, source })?;

        if !status.is_confirmed() {
            return Err(DispatchError::NotConfirmed(kind));
        }
        tracing::info!(contract = %kind, "Contract initialized");
    }
    Ok(())
}

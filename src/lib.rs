//! Deployed-contract initializer.
//!
//! Calls the one-time `init` function of each deployed contract with
//! configuration-derived arguments, signs and submits the transactions from the
//! setter account, and polls the node until each one is mined.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod initializer;
pub mod observability;

pub use config::InitializerConfig;
pub use contracts::{ContractKind, InterfaceSet};
pub use initializer::{dispatch, Initializer, Selector};

//! Typed configuration built from validated raw settings.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::utils::parse_units;
use alloy::primitives::{Address, U256};

use crate::config::loader::ConfigError;
use crate::config::validation::RawSettings;

/// Root configuration for one initialization run.
#[derive(Debug, Clone)]
pub struct InitializerConfig {
    /// Node access, signing account and gas settings.
    pub deployment: DeploymentSettings,

    /// Addresses of every deployed contract the init calls reference.
    pub addresses: ContractAddresses,

    /// Numeric and address parameters passed to `init`.
    pub params: InitParams,
}

/// Deployer configuration.
#[derive(Clone)]
pub struct DeploymentSettings {
    /// Network name used as the node subdomain (e.g. "mainnet", "ropsten").
    pub network: String,

    pub infura_project_id: String,

    /// Never logged.
    pub infura_project_secret: String,

    /// Account that signs and pays for every init transaction.
    pub setter_address: Address,

    /// Hex private key of the setter account. Never logged.
    pub setter_priv: String,

    pub gas_limit: u64,

    /// Gas price already converted from gwei to wei.
    pub gas_price_wei: u128,
}

impl fmt::Debug for DeploymentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentSettings")
            .field("network", &self.network)
            .field("infura_project_id", &self.infura_project_id)
            .field("infura_project_secret", &"<redacted>")
            .field("setter_address", &self.setter_address)
            .field("setter_priv", &"<redacted>")
            .field("gas_limit", &self.gas_limit)
            .field("gas_price_wei", &self.gas_price_wei)
            .finish()
    }
}

/// Deployed contract addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAddresses {
    pub token: Address,
    pub native_swap: Address,
    pub auction: Address,
    pub staking: Address,
    pub foreign_swap: Address,
    pub bpd: Address,
    pub subbalances: Address,
    pub uniswap_router: Address,
    pub hex2t_token: Address,
}

/// Additional parameters for `init` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitParams {
    // Common
    pub day_seconds: U256,
    pub base_period: U256,

    // Auction
    pub manager: Address,
    pub eth_recipient: Address,

    // Foreign swap
    pub signer: Address,
    pub autostake_period: U256,
    pub max_claim_amount: U256,
    pub total_snapshot_amount: U256,
    pub total_snapshot_addresses: U256,
}

impl InitializerConfig {
    /// Convert raw settings into typed values.
    ///
    /// `raw` must come from [`crate::config::validation::collect_required`], so
    /// every key is present.
    pub fn from_raw(raw: &RawSettings) -> Result<Self, ConfigError> {
        let deployment = DeploymentSettings {
            network: text(raw, "NETWORK")?,
            infura_project_id: text(raw, "INFURA_PROJECT_ID")?,
            infura_project_secret: text(raw, "INFURA_PROJECT_SECRET")?,
            setter_address: address(raw, "SETTER_ADDRESS")?,
            setter_priv: text(raw, "SETTER_PRIV")?,
            gas_limit: parse(raw, "DEPLOY_GAS_LIMIT")?,
            gas_price_wei: gwei_to_wei(raw, "DEPLOY_GAS_PRICE")?,
        };

        let addresses = ContractAddresses {
            token: address(raw, "TOKEN_ADDRESS")?,
            native_swap: address(raw, "NATIVE_SWAP_ADDRESS")?,
            auction: address(raw, "AUCTION_ADDRESS")?,
            staking: address(raw, "STAKING_ADDRESS")?,
            foreign_swap: address(raw, "FOREIGN_SWAP_ADDRESS")?,
            bpd: address(raw, "BPD_ADDRESS")?,
            subbalances: address(raw, "SUBBALANCES_ADDRESS")?,
            uniswap_router: address(raw, "UNISWAP_ADDRESS")?,
            hex2t_token: address(raw, "HEX2T_ADDRESS")?,
        };

        let params = InitParams {
            day_seconds: parse(raw, "DAY_SECONDS")?,
            base_period: parse(raw, "BASE_PERIOD")?,
            manager: address(raw, "MANAGER_ADDRESS")?,
            eth_recipient: address(raw, "ETH_RECIPIENT")?,
            signer: address(raw, "SIGNER_ADDRESS")?,
            autostake_period: parse(raw, "AUTOSTAKE_PERIOD")?,
            max_claim_amount: parse(raw, "MAX_CLAIM_AMOUNT")?,
            total_snapshot_amount: parse(raw, "TOTAL_SNAPSHOT_AMOUNT")?,
            total_snapshot_addresses: parse(raw, "TOTAL_SNAPSHOT_ADDRESSES")?,
        };

        Ok(Self { deployment, addresses, params })
    }
}

fn text(raw: &RawSettings, key: &'static str) -> Result<String, ConfigError> {
    raw.get(key)
        .cloned()
        .ok_or(ConfigError::Invalid { key, reason: "not collected".to_string() })
}

fn parse<T>(raw: &RawSettings, key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = text(raw, key)?;
    value
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid { key, reason: e.to_string() })
}

fn address(raw: &RawSettings, key: &'static str) -> Result<Address, ConfigError> {
    parse(raw, key)
}

fn gwei_to_wei(raw: &RawSettings, key: &'static str) -> Result<u128, ConfigError> {
    let value = text(raw, key)?;
    let wei = parse_units(&value, "gwei")
        .map_err(|e| ConfigError::Invalid { key, reason: e.to_string() })?
        .get_absolute();
    u128::try_from(wei).map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("{value} gwei does not fit a gas price"),
    })
}

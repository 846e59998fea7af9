//! Presence checks for environment-sourced settings.

use std::collections::HashMap;
use std::fmt;

/// The three named groups settings are organised into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsGroup {
    Deployment,
    ContractAddresses,
    InitParams,
}

impl fmt::Display for SettingsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingsGroup::Deployment => "deployment_settings",
            SettingsGroup::ContractAddresses => "contracts_addresses",
            SettingsGroup::InitParams => "init_params",
        };
        f.write_str(name)
    }
}

/// Every environment key the initializer reads, with its group.
pub const REQUIRED_KEYS: &[(SettingsGroup, &str)] = &[
    // Deployer configuration
    (SettingsGroup::Deployment, "INFURA_PROJECT_ID"),
    (SettingsGroup::Deployment, "INFURA_PROJECT_SECRET"),
    (SettingsGroup::Deployment, "NETWORK"),
    (SettingsGroup::Deployment, "SETTER_PRIV"),
    (SettingsGroup::Deployment, "SETTER_ADDRESS"),
    (SettingsGroup::Deployment, "DEPLOY_GAS_LIMIT"),
    (SettingsGroup::Deployment, "DEPLOY_GAS_PRICE"),
    // Contract addresses
    (SettingsGroup::ContractAddresses, "TOKEN_ADDRESS"),
    (SettingsGroup::ContractAddresses, "NATIVE_SWAP_ADDRESS"),
    (SettingsGroup::ContractAddresses, "AUCTION_ADDRESS"),
    (SettingsGroup::ContractAddresses, "STAKING_ADDRESS"),
    (SettingsGroup::ContractAddresses, "FOREIGN_SWAP_ADDRESS"),
    (SettingsGroup::ContractAddresses, "BPD_ADDRESS"),
    (SettingsGroup::ContractAddresses, "SUBBALANCES_ADDRESS"),
    (SettingsGroup::ContractAddresses, "UNISWAP_ADDRESS"),
    (SettingsGroup::ContractAddresses, "HEX2T_ADDRESS"),
    // Init parameters
    (SettingsGroup::InitParams, "DAY_SECONDS"),
    (SettingsGroup::InitParams, "BASE_PERIOD"),
    (SettingsGroup::InitParams, "MANAGER_ADDRESS"),
    (SettingsGroup::InitParams, "ETH_RECIPIENT"),
    (SettingsGroup::InitParams, "SIGNER_ADDRESS"),
    (SettingsGroup::InitParams, "AUTOSTAKE_PERIOD"),
    (SettingsGroup::InitParams, "MAX_CLAIM_AMOUNT"),
    (SettingsGroup::InitParams, "TOTAL_SNAPSHOT_AMOUNT"),
    (SettingsGroup::InitParams, "TOTAL_SNAPSHOT_ADDRESSES"),
];

/// A required key with no usable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub group: SettingsGroup,
    pub key: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value for parameter {} ({}) not found", self.key, self.group)
    }
}

/// Raw, trimmed values keyed by environment variable name.
pub type RawSettings = HashMap<&'static str, String>;

/// Collect every required key through `lookup`, reporting all blanks at once.
///
/// Whitespace-only values count as missing.
pub fn collect_required<F>(lookup: F) -> Result<RawSettings, Vec<ValidationError>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = RawSettings::new();
    let mut errors = Vec::new();

    for &(group, key) in REQUIRED_KEYS {
        match lookup(key).map(|v| v.trim().to_string()) {
            Some(value) if !value.is_empty() => {
                values.insert(key, value);
            }
            _ => errors.push(ValidationError { group, key }),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

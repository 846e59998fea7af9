//! Per-contract `init` argument lists and calldata encoding.
//!
//! Each contract kind has one fixed positional argument list drawn from the
//! configuration. The list is matched against the `init` function of the loaded
//! ABI, which decides the exact Solidity types (integer widths, array shape).

use std::fmt;

use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;

use crate::config::InitializerConfig;
use crate::contracts::ContractKind;

/// Name of the one-time setup function on every contract.
pub const INIT_FUNCTION: &str = "init";

#[derive(Debug, Error)]
pub enum CallError {
    #[error("{0} ABI has no init function")]
    NoInit(ContractKind),

    #[error("{kind} init takes {expected} arguments, {actual} supplied")]
    Arity {
        kind: ContractKind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} init argument {name} cannot be passed as {expected}")]
    TypeMismatch {
        kind: ContractKind,
        name: &'static str,
        expected: String,
    },

    #[error("{kind} init argument {name} does not fit in uint{bits}")]
    OutOfRange {
        kind: ContractKind,
        name: &'static str,
        bits: usize,
    },

    #[error("ABI encoding failed: {0}")]
    Abi(#[from] alloy::dyn_abi::Error),
}

/// Value of a single init argument before ABI typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Address(Address),
    Uint(U256),
    AddressList(Vec<Address>),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Address(a) => write!(f, "{a}"),
            ArgValue::Uint(v) => write!(f, "{v}"),
            ArgValue::AddressList(list) => {
                f.write_str("[")?;
                for (i, a) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A named positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitArg {
    pub name: &'static str,
    pub value: ArgValue,
}

impl InitArg {
    fn address(name: &'static str, address: Address) -> Self {
        Self { name, value: ArgValue::Address(address) }
    }

    fn uint(name: &'static str, value: U256) -> Self {
        Self { name, value: ArgValue::Uint(value) }
    }
}

/// Address the `init` call for `kind` is sent to.
pub fn target_address(kind: ContractKind, config: &InitializerConfig) -> Address {
    let a = &config.addresses;
    match kind {
        ContractKind::Token => a.token,
        ContractKind::NativeSwap => a.native_swap,
        ContractKind::Auction => a.auction,
        ContractKind::Staking => a.staking,
        ContractKind::ForeignSwap => a.foreign_swap,
        ContractKind::Bpd => a.bpd,
        ContractKind::SubBalances => a.subbalances,
    }
}

/// The ordered `init` argument list for `kind`.
pub fn init_args(kind: ContractKind, config: &InitializerConfig) -> Vec<InitArg> {
    let a = &config.addresses;
    let p = &config.params;

    match kind {
        ContractKind::Staking => vec![
            InitArg::address("token", a.token),
            InitArg::address("auction", a.auction),
            InitArg::address("subbalances", a.subbalances),
            InitArg::address("foreign_swap", a.foreign_swap),
            InitArg::uint("day_seconds", p.day_seconds),
        ],
        ContractKind::Auction => vec![
            InitArg::uint("day_seconds", p.day_seconds),
            InitArg::address("manager", p.manager),
            InitArg::address("token", a.token),
            InitArg::address("staking", a.staking),
            InitArg::address("uniswap_router", a.uniswap_router),
            InitArg::address("eth_recipient", p.eth_recipient),
            InitArg::address("native_swap", a.native_swap),
            InitArg::address("foreign_swap", a.foreign_swap),
            InitArg::address("subbalances", a.subbalances),
        ],
        ContractKind::NativeSwap => vec![
            InitArg::uint("base_period", p.base_period),
            InitArg::uint("day_seconds", p.day_seconds),
            InitArg::address("hex2t_token", a.hex2t_token),
            InitArg::address("token", a.token),
            InitArg::address("auction", a.auction),
        ],
        ContractKind::ForeignSwap => vec![
            InitArg::address("signer", p.signer),
            InitArg::uint("day_seconds", p.day_seconds),
            InitArg::uint("autostake_period", p.autostake_period),
            InitArg::uint("max_claim_amount", p.max_claim_amount),
            InitArg::address("token", a.token),
            InitArg::address("auction", a.auction),
            InitArg::address("staking", a.staking),
            InitArg::address("bpd", a.bpd),
            InitArg::uint("total_snapshot_amount", p.total_snapshot_amount),
            InitArg::uint("total_snapshot_addresses", p.total_snapshot_addresses),
        ],
        ContractKind::Bpd => vec![
            InitArg::address("token", a.token),
            InitArg::address("foreign_swap", a.foreign_swap),
            InitArg::address("subbalances", a.subbalances),
        ],
        ContractKind::SubBalances => vec![
            InitArg::address("token", a.token),
            InitArg::address("foreign_swap", a.foreign_swap),
            InitArg::address("bpd", a.bpd),
            InitArg::address("auction", a.auction),
            InitArg::address("staking", a.staking),
            InitArg::uint("day_seconds", p.day_seconds),
            InitArg::uint("base_period", p.base_period),
        ],
        ContractKind::Token => vec![InitArg {
            name: "swappers",
            value: ArgValue::AddressList(vec![
                a.native_swap,
                a.auction,
                a.staking,
                a.foreign_swap,
                a.subbalances,
            ]),
        }],
    }
}

/// An unsigned, fully encoded `init` call.
#[derive(Debug, Clone)]
pub struct InitCall {
    pub kind: ContractKind,
    pub to: Address,
    pub signature: String,
    pub args: Vec<InitArg>,
    pub calldata: Bytes,
}

impl InitCall {
    /// Build the call for `kind`, typing its arguments against `abi`.
    pub fn build(
        kind: ContractKind,
        config: &InitializerConfig,
        abi: &JsonAbi,
    ) -> Result<Self, CallError> {
        let args = init_args(kind, config);
        let function = init_function(kind, abi, args.len())?;

        let values = function
            .inputs
            .iter()
            .zip(&args)
            .map(|(param, arg)| {
                let ty = param.resolve()?;
                typed_value(kind, arg, &ty).ok_or_else(|| CallError::TypeMismatch {
                    kind,
                    name: arg.name,
                    expected: param.ty.clone(),
                })?
            })
            .collect::<Result<Vec<_>, CallError>>()?;

        let calldata = function.abi_encode_input(&values)?;

        Ok(Self {
            kind,
            to: target_address(kind, config),
            signature: function.signature(),
            args,
            calldata: Bytes::from(calldata),
        })
    }
}

impl fmt::Display for InitCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.to, INIT_FUNCTION)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", arg.name, arg.value)?;
        }
        f.write_str(")")
    }
}

fn init_function(kind: ContractKind, abi: &JsonAbi, arity: usize) -> Result<&Function, CallError> {
    let overloads = abi.function(INIT_FUNCTION).ok_or(CallError::NoInit(kind))?;
    overloads
        .iter()
        .find(|f| f.inputs.len() == arity)
        .ok_or_else(|| CallError::Arity {
            kind,
            expected: overloads[0].inputs.len(),
            actual: arity,
        })
}

/// `None` when the value's shape does not match the ABI type; `Some(Err)` when
/// an integer is too wide for the declared width.
fn typed_value(
    kind: ContractKind,
    arg: &InitArg,
    ty: &DynSolType,
) -> Option<Result<DynSolValue, CallError>> {
    let value = match (&arg.value, ty) {
        (ArgValue::Address(a), DynSolType::Address) => DynSolValue::Address(*a),
        (ArgValue::Uint(v), DynSolType::Uint(bits)) => {
            if v.bit_len() > *bits {
                return Some(Err(CallError::OutOfRange { kind, name: arg.name, bits: *bits }));
            }
            DynSolValue::Uint(*v, *bits)
        }
        (ArgValue::AddressList(list), DynSolType::Array(inner))
            if **inner == DynSolType::Address =>
        {
            DynSolValue::Array(list.iter().copied().map(DynSolValue::Address).collect())
        }
        (ArgValue::AddressList(list), DynSolType::FixedArray(inner, len))
            if **inner == DynSolType::Address && *len == list.len() =>
        {
            DynSolValue::FixedArray(list.iter().copied().map(DynSolValue::Address).collect())
        }
        _ => return None,
    };
    Some(Ok(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContractAddresses, DeploymentSettings, InitParams};

    fn addr(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn test_config() -> InitializerConfig {
        InitializerConfig {
            deployment: DeploymentSettings {
                network: "ropsten".to_string(),
                infura_project_id: "id".to_string(),
                infura_project_secret: "secret".to_string(),
                setter_address: addr(0xee),
                setter_priv: "00".to_string(),
                gas_limit: 6_000_000,
                gas_price_wei: 20_000_000_000,
            },
            addresses: ContractAddresses {
                token: addr(1),
                native_swap: addr(2),
                auction: addr(3),
                staking: addr(4),
                foreign_swap: addr(5),
                bpd: addr(6),
                subbalances: addr(7),
                uniswap_router: addr(8),
                hex2t_token: addr(9),
            },
            params: InitParams {
                day_seconds: U256::from(86400u64),
                base_period: U256::from(350u64),
                manager: addr(10),
                eth_recipient: addr(11),
                signer: addr(12),
                autostake_period: U256::from(7u64),
                max_claim_amount: U256::from(10_000_000u64),
                total_snapshot_amount: U256::from(370_121_420_541_683_530u64),
                total_snapshot_addresses: U256::from(183_035u64),
            },
        }
    }

    fn names(kind: ContractKind) -> Vec<&'static str> {
        init_args(kind, &test_config()).into_iter().map(|a| a.name).collect()
    }

    fn abi(inputs: &[&str]) -> JsonAbi {
        let params: Vec<String> = inputs
            .iter()
            .enumerate()
            .map(|(i, ty)| format!(r#"{{"name":"a{i}","type":"{ty}"}}"#))
            .collect();
        let json = format!(
            r#"[{{"type":"function","name":"init","inputs":[{}],"outputs":[],"stateMutability":"nonpayable"}}]"#,
            params.join(",")
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_argument_tables() {
        assert_eq!(
            names(ContractKind::Staking),
            ["token", "auction", "subbalances", "foreign_swap", "day_seconds"]
        );
        assert_eq!(
            names(ContractKind::Auction),
            [
                "day_seconds",
                "manager",
                "token",
                "staking",
                "uniswap_router",
                "eth_recipient",
                "native_swap",
                "foreign_swap",
                "subbalances"
            ]
        );
        assert_eq!(
            names(ContractKind::NativeSwap),
            ["base_period", "day_seconds", "hex2t_token", "token", "auction"]
        );
        assert_eq!(
            names(ContractKind::ForeignSwap),
            [
                "signer",
                "day_seconds",
                "autostake_period",
                "max_claim_amount",
                "token",
                "auction",
                "staking",
                "bpd",
                "total_snapshot_amount",
                "total_snapshot_addresses"
            ]
        );
        assert_eq!(names(ContractKind::Bpd), ["token", "foreign_swap", "subbalances"]);
        assert_eq!(
            names(ContractKind::SubBalances),
            ["token", "foreign_swap", "bpd", "auction", "staking", "day_seconds", "base_period"]
        );
        assert_eq!(names(ContractKind::Token), ["swappers"]);
    }

    #[test]
    fn test_argument_values_follow_config() {
        let config = test_config();
        let args = init_args(ContractKind::Staking, &config);
        assert_eq!(args[1].value, ArgValue::Address(config.addresses.auction));
        assert_eq!(args[4].value, ArgValue::Uint(U256::from(86400u64)));

        let token = init_args(ContractKind::Token, &config);
        assert_eq!(
            token[0].value,
            ArgValue::AddressList(vec![addr(2), addr(3), addr(4), addr(5), addr(7)])
        );
    }

    #[test]
    fn test_build_encodes_selector_and_target() {
        let config = test_config();
        let abi = abi(&["address", "address", "address", "address", "uint256"]);

        let call = InitCall::build(ContractKind::Staking, &config, &abi).unwrap();
        assert_eq!(call.to, config.addresses.staking);
        assert_eq!(call.signature, "init(address,address,address,address,uint256)");
        assert_eq!(call.calldata.len(), 4 + 5 * 32);
        assert_eq!(&call.calldata[..4], &abi.function("init").unwrap()[0].selector()[..]);
        // last word is day_seconds
        assert_eq!(U256::from_be_slice(&call.calldata[4 + 4 * 32..]), U256::from(86400u64));
    }

    #[test]
    fn test_build_token_array() {
        let call =
            InitCall::build(ContractKind::Token, &test_config(), &abi(&["address[]"])).unwrap();
        // offset + length + five addresses
        assert_eq!(call.calldata.len(), 4 + 7 * 32);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = InitCall::build(ContractKind::Bpd, &test_config(), &abi(&["address"]))
            .unwrap_err();
        assert!(matches!(err, CallError::Arity { expected: 1, actual: 3, .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let err = InitCall::build(
            ContractKind::Bpd,
            &test_config(),
            &abi(&["address", "uint256", "address"]),
        )
        .unwrap_err();
        assert!(matches!(err, CallError::TypeMismatch { name: "foreign_swap", .. }));
    }

    #[test]
    fn test_narrow_uint_range() {
        let mut config = test_config();
        config.params.day_seconds = U256::from(300u64);
        let abi = abi(&["address", "address", "address", "address", "uint8"]);

        let err = InitCall::build(ContractKind::Staking, &config, &abi).unwrap_err();
        assert!(matches!(err, CallError::OutOfRange { bits: 8, .. }));
    }

    #[test]
    fn test_missing_init() {
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        let err = InitCall::build(ContractKind::Bpd, &test_config(), &abi).unwrap_err();
        assert!(matches!(err, CallError::NoInit(ContractKind::Bpd)));
    }

    #[test]
    fn test_display_lists_named_args() {
        let call = InitCall::build(
            ContractKind::Bpd,
            &test_config(),
            &abi(&["address", "address", "address"]),
        )
        .unwrap();
        let text = call.to_string();
        assert!(text.contains(".init(token="));
        assert!(text.contains("subbalances="));
    }
}

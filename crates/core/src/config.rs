//! Client configuration.
//!
//! The only external knob is the contract id override; everything else is a
//! fixed testnet default.

use crate::campaign::Bits256;

/// Environment variable overriding the deployed contract id.
pub const CONTRACT_ID_ENV: &str = "CROWDFUND_CONTRACT_ID";

pub const TESTNET_URL: &str = "https://testnet.fuel.network/v1/graphql";
pub const TESTNET_BRIDGE_URL: &str =
    "https://app-testnet.fuel.network/bridge?from=eth&to=fuel&auto_close=true";
pub const TESTNET_FAUCET_URL: &str = "https://faucet-testnet.fuel.network/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub contract_id: Bits256,
    pub network_url: String,
    pub bridge_url: String,
    pub faucet_url: String,
    pub base_decimals: u32,
    pub base_symbol: &'static str,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_id: placeholder_contract_id(),
            network_url: TESTNET_URL.to_string(),
            bridge_url: TESTNET_BRIDGE_URL.to_string(),
            faucet_url: TESTNET_FAUCET_URL.to_string(),
            base_decimals: crate::amount::BASE_DECIMALS,
            base_symbol: crate::amount::BASE_SYMBOL,
        }
    }
}

/// Sentinel used when no contract id is configured.
pub fn placeholder_contract_id() -> Bits256 {
    Bits256::zero()
}

impl ClientConfig {
    /// Defaults with an optional contract id; blank overrides are ignored.
    pub fn with_contract_override(contract_id: Option<&str>) -> Self {
        let mut cfg = Self::default();
        if let Some(id) = contract_id.map(str::trim).filter(|s| !s.is_empty()) {
            cfg.contract_id = Bits256(id.to_string());
        }
        cfg
    }

    /// Read the override from the process environment.
    pub fn from_env() -> Self {
        let v = std::env::var(CONTRACT_ID_ENV).ok();
        let cfg = Self::with_contract_override(v.as_deref());
        if cfg.uses_placeholder() {
            tracing::warn!("{} not set; using placeholder contract id", CONTRACT_ID_ENV);
        }
        cfg
    }

    pub fn uses_placeholder(&self) -> bool {
        self.contract_id == placeholder_contract_id()
    }

    pub fn faucet_link(&self, address: &str) -> String {
        format!("{}?address={}", self.faucet_url, address)
    }
}

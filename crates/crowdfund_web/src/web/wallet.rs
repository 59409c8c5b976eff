use crowdfund::campaign::{Address, AssetId, Bits256};
use crowdfund::error::ClientError;
use crowdfund::wallet::WalletSession;

use super::bridge;
use crate::bridge_model;

/// Wallet handle over the JS connector.
///
/// Connection state lives in the app's `account` signal; a handle is a
/// snapshot of it, so connect/disconnect are followed by [`current_account`]
/// to refresh the signal.
#[derive(Debug, Clone, Default)]
pub(super) struct BrowserWallet {
    account: Option<Address>,
}

impl BrowserWallet {
    pub(super) fn new(account: Option<Address>) -> Self {
        Self { account }
    }
}

pub(super) async fn current_account() -> Result<Option<Address>, ClientError> {
    let value = bridge::wallet_account().await.map_err(bridge::wallet_error)?;
    bridge_model::decode_optional_address(bridge::to_json(&value)?)
}

impl WalletSession for BrowserWallet {
    fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    fn address(&self) -> Option<Address> {
        self.account.clone()
    }

    async fn connect(&self) -> Result<(), ClientError> {
        bridge::wallet_connect().await.map_err(bridge::wallet_error)?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ClientError> {
        bridge::wallet_disconnect().await.map_err(bridge::wallet_error)?;
        Ok(())
    }

    async fn balance(&self) -> Result<u64, ClientError> {
        if self.account.is_none() {
            return Err(ClientError::NotConnected);
        }
        let value = bridge::wallet_balance().await.map_err(bridge::wallet_error)?;
        bridge_model::decode_u64(&bridge::to_json(&value)?)
    }

    async fn base_asset_id(&self) -> Result<AssetId, ClientError> {
        let value = bridge::base_asset_id().await.map_err(bridge::wallet_error)?;
        value
            .as_string()
            .map(Bits256)
            .ok_or_else(|| ClientError::Decode("base asset id is not a string".into()))
    }
}

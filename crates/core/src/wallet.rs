//! Seam to the wallet connector.

use std::rc::Rc;

use crate::campaign::{Address, AssetId};
use crate::error::ClientError;

#[allow(async_fn_in_trait)]
pub trait WalletSession {
    fn is_connected(&self) -> bool;

    /// Current account, when connected.
    fn address(&self) -> Option<Address>;

    async fn connect(&self) -> Result<(), ClientError>;

    async fn disconnect(&self) -> Result<(), ClientError>;

    /// Balance of the base asset, in base units.
    async fn balance(&self) -> Result<u64, ClientError>;

    async fn base_asset_id(&self) -> Result<AssetId, ClientError>;
}

impl<W: WalletSession> WalletSession for Rc<W> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn address(&self) -> Option<Address> {
        (**self).address()
    }

    async fn connect(&self) -> Result<(), ClientError> {
        (**self).connect().await
    }

    async fn disconnect(&self) -> Result<(), ClientError> {
        (**self).disconnect().await
    }

    async fn balance(&self) -> Result<u64, ClientError> {
        (**self).balance().await
    }

    async fn base_asset_id(&self) -> Result<AssetId, ClientError> {
        (**self).base_asset_id().await
    }
}

/// Header/footer model for the connection surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionBar {
    pub connecting: bool,
    pub address: Option<Address>,
}

impl SessionBar {
    pub fn from_session<W: WalletSession>(session: &W, connecting: bool) -> Self {
        Self {
            connecting,
            address: session.is_connected().then(|| session.address()).flatten(),
        }
    }

    /// Label of the connect button, or `None` once connected.
    pub fn connect_label(&self) -> Option<&'static str> {
        match (&self.address, self.connecting) {
            (Some(_), _) => None,
            (None, true) => Some("Connecting"),
            (None, false) => Some("Connect"),
        }
    }

    pub fn footer(&self) -> Option<String> {
        self.address
            .as_ref()
            .map(|a| format!("Connected: {}", a.as_str()))
    }
}

/// Connect, logging the outcome; returns the bar to render afterwards.
pub async fn connect_session<W: WalletSession>(session: &W) -> Result<SessionBar, ClientError> {
    match session.connect().await {
        Ok(()) => {
            let bar = SessionBar::from_session(session, false);
            tracing::info!(address = ?bar.address, "wallet connected");
            Ok(bar)
        }
        Err(e) => {
            tracing::error!(error = %e, "wallet connection failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{dev_address, DevWallet};

    #[test]
    fn disconnected_bar_offers_connect() {
        let wallet = DevWallet::new(dev_address(7), 0);
        let bar = SessionBar::from_session(&wallet, false);
        assert_eq!(bar.connect_label(), Some("Connect"));
        assert_eq!(bar.footer(), None);
    }

    #[test]
    fn pending_connect_shows_connecting() {
        let bar = SessionBar {
            connecting: true,
            address: None,
        };
        assert_eq!(bar.connect_label(), Some("Connecting"));
        assert_eq!(bar.footer(), None);
    }

    #[test]
    fn connected_bar_shows_address_in_footer() {
        let wallet = DevWallet::connected(dev_address(7), 0);
        let bar = SessionBar::from_session(&wallet, false);
        assert_eq!(bar.connect_label(), None);
        assert_eq!(
            bar.footer(),
            Some(format!("Connected: {}", dev_address(7).as_str()))
        );
        assert!(bar.footer().unwrap().starts_with("Connected: 0x"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn connect_session_connects_and_reports_address() {
        let wallet = Rc::new(DevWallet::new(dev_address(9), 0));
        let bar = connect_session(&wallet).await.unwrap();
        assert!(wallet.is_connected());
        assert_eq!(bar.address, Some(dev_address(9)));
        assert_eq!(bar.connect_label(), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_connect_is_an_error() {
        let wallet = DevWallet::new(dev_address(9), 0);
        wallet.reject_next();

        let result = connect_session(&wallet).await;

        assert!(matches!(result, Err(ClientError::Wallet(_))));
        assert!(!wallet.is_connected());
        assert_eq!(
            SessionBar::from_session(&wallet, false).connect_label(),
            Some("Connect")
        );
    }
}

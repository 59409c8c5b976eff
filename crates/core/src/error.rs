//! Client-side error taxonomy.
//!
//! The contract and the wallet connector report failures as free-form
//! messages, so classification is done on message text rather than on codes.

use thiserror::Error;

pub const WALLET_LOCKED_MESSAGE: &str = "Please unlock your Fuel Wallet and try again.";
pub const USER_REJECTED_MESSAGE: &str = "User rejected the transaction.";

/// Failures surfaced by the wallet session or the contract proxy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("wallet not connected")]
    NotConnected,
    #[error("wallet error: {0}")]
    Wallet(String),
    #[error("contract call failed: {0}")]
    Call(String),
    #[error("could not decode contract response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Session locked or missing; the user has to unlock and retry.
    WalletLocked,
    /// The user declined the transaction prompt.
    UserRejected,
    Other,
}

impl FailureKind {
    pub fn classify(err: &ClientError) -> Self {
        if matches!(err, ClientError::NotConnected) {
            return FailureKind::WalletLocked;
        }
        Self::classify_message(&err.to_string())
    }

    pub fn classify_message(msg: &str) -> Self {
        if msg.contains("unlocked wallet") || msg.contains("Wallet is required") {
            FailureKind::WalletLocked
        } else if msg.contains("User rejected") {
            FailureKind::UserRejected
        } else {
            FailureKind::Other
        }
    }

    /// Fixed user-facing text, or `None` for unclassified failures whose text
    /// depends on the operation.
    pub fn user_message(self) -> Option<&'static str> {
        match self {
            FailureKind::WalletLocked => Some(WALLET_LOCKED_MESSAGE),
            FailureKind::UserRejected => Some(USER_REJECTED_MESSAGE),
            FailureKind::Other => None,
        }
    }
}

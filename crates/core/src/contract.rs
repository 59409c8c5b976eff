//! Seam to the deployed campaign contract.
//!
//! Implementations wrap a generated proxy (browser) or the in-memory
//! development contract. Futures are not required to be `Send`: every caller
//! runs on a single cooperative executor.

use crate::campaign::{Address, AssetId, Campaign};
use crate::error::ClientError;

/// Asset amount attached to a payable call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forward {
    pub amount: u64,
    pub asset_id: AssetId,
}

/// Result of a state-changing call, available once the transaction is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt<T> {
    pub transaction_id: String,
    pub value: T,
}

#[allow(async_fn_in_trait)]
pub trait CampaignContract {
    /// Returns the new campaign id.
    async fn create_campaign(
        &self,
        target_goal: u64,
        deadline_ms: u64,
    ) -> Result<CallReceipt<u64>, ClientError>;

    /// Read-only simulated call; still needs an unlocked session to fund the
    /// dry run.
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ClientError>;

    /// Raw lookup. Callers pass the result through
    /// [`normalize_lookup`](crate::campaign::normalize_lookup).
    async fn get_campaign(&self, id: u64) -> Result<Option<Campaign>, ClientError>;

    /// Returns the campaign's `total_raised` after the contribution.
    async fn contribute(
        &self,
        id: u64,
        amount: u64,
        forward: Forward,
    ) -> Result<CallReceipt<u64>, ClientError>;
}

/// Read-only bookkeeping helpers the contract also exposes. No page needs
/// them; the development console does.
#[allow(async_fn_in_trait)]
pub trait CampaignDirectory {
    async fn campaign_count(&self) -> Result<u64, ClientError>;

    async fn next_id(&self) -> Result<u64, ClientError>;

    /// Owner address, or `None` when the owner is a contract.
    async fn campaign_owner_address(&self, id: u64) -> Result<Option<Address>, ClientError>;
}

use crowdfund::campaign::Campaign;
use crowdfund::contract::{CallReceipt, CampaignContract, Forward};
use crowdfund::error::ClientError;
use tracing::debug;

use super::bridge;
use crate::bridge_model;

/// Contract proxy bound to one deployed contract id.
#[derive(Debug, Clone)]
pub(super) struct BrowserContract {
    contract_id: String,
}

impl BrowserContract {
    pub(super) fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
        }
    }
}

impl CampaignContract for BrowserContract {
    async fn create_campaign(
        &self,
        target_goal: u64,
        deadline_ms: u64,
    ) -> Result<CallReceipt<u64>, ClientError> {
        debug!(target_goal, deadline_ms, "create_campaign");
        let value = bridge::create_campaign(
            &self.contract_id,
            &target_goal.to_string(),
            &deadline_ms.to_string(),
        )
        .await
        .map_err(bridge::call_error)?;
        bridge_model::decode_receipt(bridge::to_json(&value)?)
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        let value = bridge::list_campaigns(&self.contract_id)
            .await
            .map_err(bridge::call_error)?;
        bridge_model::decode_campaigns(bridge::to_json(&value)?)
    }

    async fn get_campaign(&self, id: u64) -> Result<Option<Campaign>, ClientError> {
        let value = bridge::get_campaign(&self.contract_id, &id.to_string())
            .await
            .map_err(bridge::call_error)?;
        bridge_model::decode_lookup(bridge::to_json(&value)?)
    }

    async fn contribute(
        &self,
        id: u64,
        amount: u64,
        forward: Forward,
    ) -> Result<CallReceipt<u64>, ClientError> {
        debug!(id, amount, asset_id = forward.asset_id.as_str(), "contribute");
        // The proxy forwards exactly `amount`; a mismatched forward is a caller bug.
        if forward.amount != amount {
            return Err(ClientError::Call(format!(
                "forward of {} does not match amount {amount}",
                forward.amount
            )));
        }
        let value = bridge::contribute(
            &self.contract_id,
            &id.to_string(),
            &amount.to_string(),
            forward.asset_id.as_str(),
        )
        .await
        .map_err(bridge::call_error)?;
        bridge_model::decode_receipt(bridge::to_json(&value)?)
    }
}

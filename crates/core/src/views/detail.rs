//! Campaign detail page and its contribution dialog.
//!
//! Loading and contributing are split into `begin_*` / async call /
//! `finish_*` so a reactive host can keep state in signals between the
//! steps. [`CampaignDetailView::load`] and
//! [`CampaignDetailView::submit_contribution`] run the whole sequence for
//! hosts that own the view directly.

use chrono::FixedOffset;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::amount;
use crate::campaign::{normalize_lookup, Campaign, CampaignCard};
use crate::contract::{CampaignContract, Forward};
use crate::error::{ClientError, FailureKind};
use crate::request::RequestState;
use crate::wallet::WalletSession;

pub const CONNECT_PROMPT: &str = "Please connect your Fuel wallet.";
pub const CONNECT_FIRST_ALERT: &str = "Please connect your Fuel wallet first.";
pub const INVALID_ID_MESSAGE: &str = "Invalid campaign id.";
pub const NOT_FOUND_MESSAGE: &str = "Campaign not found.";
pub const LOAD_FAILED: &str = "Failed to load campaign";
pub const CONTRIBUTION_FAILED: &str = "Contribution failed. Check console for details.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid campaign id {0:?}")]
pub struct InvalidCampaignId(pub String);

/// Ids are positive integers; anything else is rejected before any call.
pub fn parse_campaign_id(raw: &str) -> Result<u64, InvalidCampaignId> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InvalidCampaignId(raw.to_string())),
    }
}

/// Fetch one campaign. Absent and zeroed records resolve to `Success(None)`.
pub async fn load_campaign<C: CampaignContract>(
    contract: &C,
    id: u64,
) -> RequestState<Option<Campaign>> {
    match contract.get_campaign(id).await {
        Ok(found) => RequestState::Success(normalize_lookup(found)),
        Err(e) => {
            error!(id, error = %e, "failed to load campaign");
            RequestState::Error(LOAD_FAILED.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionOutcome {
    Completed {
        transaction_id: String,
        total_raised: u64,
        /// `None` when the follow-up read failed; the old snapshot stays.
        refreshed: Option<Option<Campaign>>,
    },
    Failed(String),
}

/// Resolve the base asset, send `amount` forwarding exactly `amount` of it,
/// wait for the result, then re-read the campaign.
pub async fn contribute<W: WalletSession, C: CampaignContract>(
    session: &W,
    contract: &C,
    id: u64,
    amount: u64,
) -> ContributionOutcome {
    let receipt = match send_contribution(session, contract, id, amount).await {
        Ok(r) => r,
        Err(e) => {
            error!(id, amount, error = %e, "contribution failed");
            let msg = FailureKind::classify(&e)
                .user_message()
                .unwrap_or(CONTRIBUTION_FAILED);
            return ContributionOutcome::Failed(msg.to_string());
        }
    };
    info!(
        id,
        transaction_id = %receipt.transaction_id,
        total_raised = receipt.value,
        "contribution finalized"
    );

    let refreshed = match contract.get_campaign(id).await {
        Ok(found) => Some(normalize_lookup(found)),
        Err(e) => {
            warn!(id, error = %e, "contribution succeeded but refreshing the campaign failed");
            None
        }
    };

    ContributionOutcome::Completed {
        transaction_id: receipt.transaction_id,
        total_raised: receipt.value,
        refreshed,
    }
}

async fn send_contribution<W: WalletSession, C: CampaignContract>(
    session: &W,
    contract: &C,
    id: u64,
    amount: u64,
) -> Result<crate::contract::CallReceipt<u64>, ClientError> {
    if !session.is_connected() {
        return Err(ClientError::NotConnected);
    }
    let asset_id = session.base_asset_id().await?;
    contract
        .contribute(id, amount, Forward { amount, asset_id })
        .await
}

/// Amount entry for a contribution. Text is kept digit-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributeDialog {
    open: bool,
    amount: String,
}

impl ContributeDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing discards whatever was typed.
    pub fn close(&mut self) {
        self.open = false;
        self.amount.clear();
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.amount = amount::sanitize_digits(raw);
    }

    pub fn preview(&self) -> String {
        amount::preview(&self.amount)
    }

    /// Positive base-unit amount, or `None` when Send should do nothing.
    pub fn confirm_amount(&self) -> Option<u64> {
        amount::parse_base_units(&self.amount)
            .ok()
            .filter(|a| *a > 0)
    }

    pub fn can_send(&self, pending: bool) -> bool {
        !pending && !self.amount.is_empty()
    }

    pub fn send_label(pending: bool) -> &'static str {
        if pending {
            "Sending…"
        } else {
            "Send"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailScreen {
    ConnectPrompt,
    InvalidId,
    Loading,
    Error(String),
    NotFound,
    Loaded {
        card: CampaignCard,
        notice: Option<String>,
        contributing: bool,
    },
}

#[derive(Debug, Clone)]
pub struct CampaignDetailView {
    id: Result<u64, InvalidCampaignId>,
    pub campaign: RequestState<Option<Campaign>>,
    pub contribution: RequestState<u64>,
    pub dialog: ContributeDialog,
}

impl CampaignDetailView {
    pub fn new(raw_id: &str) -> Self {
        Self {
            id: parse_campaign_id(raw_id),
            campaign: RequestState::Idle,
            contribution: RequestState::Idle,
            dialog: ContributeDialog::default(),
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id.as_ref().ok().copied()
    }

    pub fn heading(&self) -> String {
        match self.id() {
            Some(id) => format!("Campaign #{id} Details"),
            None => "Campaign Details".to_string(),
        }
    }

    /// Returns the id to fetch, or `None` when no call may be issued.
    pub fn begin_load(&mut self, connected: bool) -> Option<u64> {
        if !connected {
            return None;
        }
        let id = self.id()?;
        self.campaign = RequestState::Loading;
        Some(id)
    }

    pub fn finish_load(&mut self, state: RequestState<Option<Campaign>>) {
        self.campaign = state;
    }

    pub async fn load<W: WalletSession, C: CampaignContract>(&mut self, session: &W, contract: &C) {
        if let Some(id) = self.begin_load(session.is_connected()) {
            let state = load_campaign(contract, id).await;
            self.finish_load(state);
        }
    }

    /// Open the dialog, or return the alert to show instead.
    pub fn open_dialog(&mut self, connected: bool) -> Result<(), &'static str> {
        if !connected {
            return Err(CONNECT_FIRST_ALERT);
        }
        if self.id().is_none() {
            return Err(INVALID_ID_MESSAGE);
        }
        self.dialog.open();
        Ok(())
    }

    /// Close the dialog unless a contribution is in flight, so a failure
    /// still lands in an open dialog. Returns whether it closed.
    pub fn cancel_dialog(&mut self) -> bool {
        if self.contribution.is_loading() {
            return false;
        }
        self.dialog.close();
        true
    }

    /// Returns `(id, amount)` to send, or `None` when Send should do nothing.
    pub fn begin_contribution(&mut self) -> Option<(u64, u64)> {
        let id = self.id()?;
        let amount = self.dialog.confirm_amount()?;
        self.contribution = RequestState::Loading;
        Some((id, amount))
    }

    pub fn finish_contribution(&mut self, outcome: ContributionOutcome) {
        match outcome {
            ContributionOutcome::Completed {
                total_raised,
                refreshed,
                ..
            } => {
                self.contribution = RequestState::Success(total_raised);
                if let Some(found) = refreshed {
                    self.campaign = RequestState::Success(found);
                }
                self.dialog.close();
            }
            ContributionOutcome::Failed(msg) => {
                self.contribution = RequestState::Error(msg);
            }
        }
    }

    pub async fn submit_contribution<W: WalletSession, C: CampaignContract>(
        &mut self,
        session: &W,
        contract: &C,
    ) {
        if let Some((id, amount)) = self.begin_contribution() {
            let outcome = contribute(session, contract, id, amount).await;
            self.finish_contribution(outcome);
        }
    }

    pub fn render(&self, connected: bool, offset: FixedOffset) -> DetailScreen {
        if !connected {
            return DetailScreen::ConnectPrompt;
        }
        if self.id().is_none() {
            return DetailScreen::InvalidId;
        }
        match &self.campaign {
            RequestState::Idle | RequestState::Loading => DetailScreen::Loading,
            RequestState::Error(e) => DetailScreen::Error(e.clone()),
            RequestState::Success(None) => DetailScreen::NotFound,
            RequestState::Success(Some(c)) => DetailScreen::Loaded {
                card: CampaignCard::new(c, offset),
                notice: self.contribution.error().map(str::to_string),
                contributing: self.contribution.is_loading(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::utc;
    use crate::error::{USER_REJECTED_MESSAGE, WALLET_LOCKED_MESSAGE};
    use crate::sim::{dev_address, dev_pair, DevCall, DevContract, DevWallet, BASE_ASSET_ID};
    use std::rc::Rc;

    const FAR_FUTURE: u64 = 4_102_444_800_000;

    #[test]
    fn rejects_bad_ids() {
        for raw in ["0", "-3", "abc", "", "1.5", "NaN", "Infinity", "99999999999999999999"] {
            assert!(parse_campaign_id(raw).is_err(), "{raw:?} should be rejected");
        }
        assert_eq!(parse_campaign_id("3"), Ok(3));
        assert_eq!(parse_campaign_id(" 12 "), Ok(12));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn invalid_id_renders_message_without_calls() {
        let (wallet, contract) = dev_pair(0);
        for raw in ["0", "-1", "abc"] {
            let mut view = CampaignDetailView::new(raw);
            view.load(&wallet, &contract).await;
            assert_eq!(view.render(true, utc()), DetailScreen::InvalidId);
            assert_eq!(view.open_dialog(true), Err(INVALID_ID_MESSAGE));
        }
        assert!(contract.calls().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn disconnected_session_prompts_and_skips_calls() {
        let wallet = Rc::new(DevWallet::new(dev_address(2), 0));
        let contract = DevContract::new(wallet.clone());
        let mut view = CampaignDetailView::new("1");

        view.load(&wallet, &contract).await;

        assert!(contract.calls().is_empty());
        assert_eq!(view.render(false, utc()), DetailScreen::ConnectPrompt);
        assert_eq!(view.open_dialog(false), Err(CONNECT_FIRST_ALERT));
        assert!(!view.dialog.is_open());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn absent_record_is_not_found() {
        let (wallet, contract) = dev_pair(0);
        let mut view = CampaignDetailView::new("5");
        view.load(&wallet, &contract).await;
        assert_eq!(view.render(true, utc()), DetailScreen::NotFound);
        assert_eq!(view.campaign.error(), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn zeroed_record_is_not_found() {
        let (wallet, contract) = dev_pair(0);
        contract.return_zeroed_for_missing(true);
        let mut view = CampaignDetailView::new("5");
        view.load(&wallet, &contract).await;
        assert_eq!(view.render(true, utc()), DetailScreen::NotFound);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn load_failure_is_an_error() {
        let (wallet, contract) = dev_pair(0);
        contract.fail_next_lookups(1);
        let mut view = CampaignDetailView::new("1");
        view.load(&wallet, &contract).await;
        assert_eq!(
            view.render(true, utc()),
            DetailScreen::Error(LOAD_FAILED.to_string())
        );
    }

    async fn three_campaigns(contract: &DevContract) {
        for goal in [1_000, 2_000, 3_000] {
            contract.create_campaign(goal, FAR_FUTURE).await.unwrap();
        }
        contract.clear_calls();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn contribution_forwards_amount_and_refreshes_total() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;

        let mut view = CampaignDetailView::new("3");
        view.load(&wallet, &contract).await;
        view.open_dialog(true).unwrap();
        view.dialog.set_amount("5a0b0");
        assert_eq!(view.dialog.amount(), "500");
        assert_eq!(view.dialog.preview(), "≈ 0.000000500 ETH");

        view.submit_contribution(&wallet, &contract).await;

        let calls = contract.calls();
        assert_eq!(
            calls[1],
            DevCall::Contribute {
                id: 3,
                amount: 500,
                forward: Forward {
                    amount: 500,
                    asset_id: crate::campaign::Bits256(BASE_ASSET_ID.to_string()),
                },
            }
        );
        assert_eq!(calls[2], DevCall::GetCampaign { id: 3 });

        let DetailScreen::Loaded { card, notice, contributing } = view.render(true, utc()) else {
            panic!("expected loaded campaign");
        };
        assert_eq!(card.raised.raw, "500");
        assert_eq!(notice, None);
        assert!(!contributing);
        assert!(!view.dialog.is_open());
        assert_eq!(view.dialog.amount(), "");
        assert_eq!(view.contribution, RequestState::Success(500));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn refresh_failure_keeps_success_and_closes_dialog() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;

        let mut view = CampaignDetailView::new("2");
        view.load(&wallet, &contract).await;
        view.open_dialog(true).unwrap();
        view.dialog.set_amount("250");
        contract.fail_next_lookups(1);

        view.submit_contribution(&wallet, &contract).await;

        assert_eq!(view.contribution, RequestState::Success(250));
        assert!(!view.dialog.is_open());
        let DetailScreen::Loaded { card, notice, .. } = view.render(true, utc()) else {
            panic!("expected loaded campaign");
        };
        // Stale snapshot stays on screen.
        assert_eq!(card.raised.raw, "0");
        assert_eq!(notice, None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_contribution_keeps_dialog_open() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;

        let mut view = CampaignDetailView::new("1");
        view.load(&wallet, &contract).await;
        view.open_dialog(true).unwrap();
        view.dialog.set_amount("10");
        wallet.reject_next();

        view.submit_contribution(&wallet, &contract).await;

        assert!(view.dialog.is_open());
        let DetailScreen::Loaded { notice, .. } = view.render(true, utc()) else {
            panic!("expected loaded campaign");
        };
        assert_eq!(notice.as_deref(), Some(USER_REJECTED_MESSAGE));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn cancel_is_ignored_while_contribution_is_pending() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;

        let mut view = CampaignDetailView::new("2");
        view.load(&wallet, &contract).await;
        view.open_dialog(true).unwrap();
        view.dialog.set_amount("40");
        let (id, amount) = view.begin_contribution().unwrap();

        assert!(!view.cancel_dialog());
        assert!(view.dialog.is_open());
        assert_eq!(view.dialog.amount(), "40");

        wallet.reject_next();
        let outcome = contribute(&wallet, &contract, id, amount).await;
        view.finish_contribution(outcome);
        assert!(view.dialog.is_open());
        assert_eq!(view.contribution.error(), Some(USER_REJECTED_MESSAGE));

        assert!(view.cancel_dialog());
        assert!(!view.dialog.is_open());
        assert_eq!(view.dialog.amount(), "");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn contract_revert_gets_generic_message() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;
        contract.set_now_ms(Some(FAR_FUTURE + 1));

        let outcome = contribute(&wallet, &contract, 1, 10).await;
        assert_eq!(
            outcome,
            ContributionOutcome::Failed(CONTRIBUTION_FAILED.to_string())
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn locked_wallet_contribution_asks_to_unlock() {
        let (wallet, contract) = dev_pair(10_000);
        three_campaigns(&contract).await;
        wallet.set_locked(true);

        let outcome = contribute(&wallet, &contract, 1, 10).await;
        assert_eq!(
            outcome,
            ContributionOutcome::Failed(WALLET_LOCKED_MESSAGE.to_string())
        );
        assert!(contract.calls().is_empty());
    }

    #[test]
    fn dialog_send_rules() {
        let mut d = ContributeDialog::default();
        d.open();
        assert!(!d.can_send(false));
        assert_eq!(d.confirm_amount(), None);

        d.set_amount("0");
        assert!(d.can_send(false));
        assert_eq!(d.confirm_amount(), None);

        d.set_amount("42");
        assert!(!d.can_send(true));
        assert_eq!(d.confirm_amount(), Some(42));
        assert_eq!(ContributeDialog::send_label(true), "Sending…");

        d.close();
        assert!(!d.is_open());
        assert_eq!(d.amount(), "");
    }
}

//! "Create Campaign" form.

use chrono::FixedOffset;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::amount::{self, AmountError};
use crate::campaign::Address;
use crate::config::ClientConfig;
use crate::contract::CampaignContract;
use crate::deadline::{self, DeadlineError};
use crate::request::RequestState;
use crate::route::Route;
use crate::wallet::WalletSession;

pub const CONNECT_PROMPT: &str = "Please connect your Fuel wallet to create a campaign.";
pub const INVALID_INPUT_ALERT: &str = "Please enter valid numbers for goal and deadline.";
pub const CREATE_FAILED_ALERT: &str = "Failed to create campaign. Check console for details.";
pub const CONTRACT_NOT_LOADED: &str = "Contract not loaded";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("invalid goal: {0}")]
    Goal(#[from] AmountError),
    #[error("invalid deadline: {0}")]
    Deadline(#[from] DeadlineError),
}

/// Validated creation arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignDraft {
    pub target_goal: u64,
    pub deadline_ms: u64,
}

pub async fn create_campaign<C: CampaignContract>(
    contract: &C,
    draft: CampaignDraft,
) -> Result<u64, &'static str> {
    match contract
        .create_campaign(draft.target_goal, draft.deadline_ms)
        .await
    {
        Ok(receipt) => {
            info!(
                id = receipt.value,
                transaction_id = %receipt.transaction_id,
                "campaign created"
            );
            Ok(receipt.value)
        }
        Err(e) => {
            error!(?draft, error = %e, "failed to create campaign");
            Err(CREATE_FAILED_ALERT)
        }
    }
}

/// Base-asset balance for the faucet hint; failures only hide the hint.
pub async fn load_balance<W: WalletSession>(session: &W) -> Option<u64> {
    if !session.is_connected() {
        return None;
    }
    match session.balance().await {
        Ok(b) => Some(b),
        Err(e) => {
            warn!(error = %e, "could not read wallet balance");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Navigate(Route),
    Alert(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateScreen {
    ConnectPrompt,
    Form {
        goal_preview: String,
        /// Faucet link shown instead of the submit button.
        faucet: Option<String>,
        submit_label: &'static str,
        submit_disabled: bool,
        created_id: Option<u64>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CreateCampaignForm {
    target_goal: String,
    deadline: String,
    pub created_id: Option<u64>,
    pub state: RequestState<u64>,
}

impl CreateCampaignForm {
    pub fn target_goal(&self) -> &str {
        &self.target_goal
    }

    pub fn deadline(&self) -> &str {
        &self.deadline
    }

    pub fn set_target_goal(&mut self, raw: &str) {
        self.target_goal = amount::sanitize_digits(raw);
    }

    pub fn set_deadline(&mut self, raw: &str) {
        self.deadline = raw.to_string();
    }

    pub fn goal_preview(&self) -> String {
        amount::preview(&self.target_goal)
    }

    pub fn clear(&mut self) {
        self.target_goal.clear();
        self.deadline.clear();
    }

    pub fn draft(&self, offset: FixedOffset) -> Result<CampaignDraft, DraftError> {
        let target_goal = amount::parse_base_units(&self.target_goal)?;
        let deadline_ms = deadline::parse_datetime_local(&self.deadline, offset)?;
        Ok(CampaignDraft {
            target_goal,
            deadline_ms,
        })
    }

    /// Validate and enter `Loading`, or return the alert to show.
    pub fn begin_submit(
        &mut self,
        connected: bool,
        offset: FixedOffset,
    ) -> Result<CampaignDraft, &'static str> {
        if !connected {
            return Err(CONTRACT_NOT_LOADED);
        }
        let draft = self.draft(offset).map_err(|e| {
            warn!(error = %e, "rejected campaign form");
            INVALID_INPUT_ALERT
        })?;
        self.state = RequestState::Loading;
        Ok(draft)
    }

    /// On success the form clears and the caller navigates; on failure the
    /// input stays for a retry.
    pub fn finish_submit(&mut self, result: Result<u64, &'static str>) -> SubmitOutcome {
        match result {
            Ok(id) => {
                self.created_id = Some(id);
                self.state = RequestState::Success(id);
                self.clear();
                SubmitOutcome::Navigate(Route::ListCampaigns)
            }
            Err(alert) => {
                self.state = RequestState::Error(alert.to_string());
                SubmitOutcome::Alert(alert)
            }
        }
    }

    pub async fn submit<W: WalletSession, C: CampaignContract>(
        &mut self,
        session: &W,
        contract: &C,
        offset: FixedOffset,
    ) -> SubmitOutcome {
        let draft = match self.begin_submit(session.is_connected(), offset) {
            Ok(d) => d,
            Err(alert) => return SubmitOutcome::Alert(alert),
        };
        let result = create_campaign(contract, draft).await;
        self.finish_submit(result)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.state.is_loading() {
            "Creating…"
        } else {
            "Create Campaign"
        }
    }

    pub fn render(
        &self,
        connected: bool,
        balance: Option<u64>,
        address: Option<&Address>,
        cfg: &ClientConfig,
    ) -> CreateScreen {
        if !connected {
            return CreateScreen::ConnectPrompt;
        }
        let faucet = match (balance, address) {
            (Some(0), Some(a)) => Some(cfg.faucet_link(a.as_str())),
            _ => None,
        };
        CreateScreen::Form {
            goal_preview: self.goal_preview(),
            faucet,
            submit_label: self.submit_label(),
            submit_disabled: self.state.is_loading(),
            created_id: self.created_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::{parse_datetime_local, utc};
    use crate::sim::{dev_address, dev_pair, DevCall, DevContract, DevWallet};
    use std::rc::Rc;

    #[tokio::test(flavor = "current_thread")]
    async fn creates_and_navigates_to_list() {
        let (wallet, contract) = dev_pair(1);
        let mut form = CreateCampaignForm::default();
        form.set_target_goal("1000");
        form.set_deadline("2099-06-01T12:30");

        let outcome = form.submit(&wallet, &contract, utc()).await;

        let expected_ms = parse_datetime_local("2099-06-01T12:30", utc()).unwrap();
        assert_eq!(
            contract.calls(),
            vec![DevCall::CreateCampaign {
                target_goal: 1000,
                deadline_ms: expected_ms,
            }]
        );
        assert_eq!(outcome, SubmitOutcome::Navigate(Route::ListCampaigns));
        assert_eq!(form.created_id, Some(1));
        assert_eq!(form.target_goal(), "");
        assert_eq!(form.deadline(), "");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn invalid_input_alerts_without_calling() {
        let (wallet, contract) = dev_pair(1);
        let mut form = CreateCampaignForm::default();

        form.set_target_goal("abc");
        form.set_deadline("2099-06-01T12:30");
        assert_eq!(
            form.submit(&wallet, &contract, utc()).await,
            SubmitOutcome::Alert(INVALID_INPUT_ALERT)
        );

        form.set_target_goal("1000");
        form.set_deadline("not a date");
        assert_eq!(
            form.submit(&wallet, &contract, utc()).await,
            SubmitOutcome::Alert(INVALID_INPUT_ALERT)
        );

        assert!(contract.calls().is_empty());
        assert_eq!(form.target_goal(), "1000");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_goal_is_rejected_not_zero() {
        let (wallet, contract) = dev_pair(1);
        let mut form = CreateCampaignForm::default();
        form.set_deadline("2099-06-01T12:30");

        assert_eq!(
            form.draft(utc()),
            Err(DraftError::Goal(AmountError::Empty))
        );
        assert_eq!(
            form.submit(&wallet, &contract, utc()).await,
            SubmitOutcome::Alert(INVALID_INPUT_ALERT)
        );
        assert!(contract.calls().is_empty());
        assert_eq!(form.deadline(), "2099-06-01T12:30");

        // An explicit zero goes through.
        form.set_target_goal("0");
        assert_eq!(
            form.submit(&wallet, &contract, utc()).await,
            SubmitOutcome::Navigate(Route::ListCampaigns)
        );
        assert!(matches!(
            contract.calls().as_slice(),
            [DevCall::CreateCampaign { target_goal: 0, .. }]
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failure_keeps_form_for_retry() {
        let (wallet, contract) = dev_pair(1);
        wallet.reject_next();
        let mut form = CreateCampaignForm::default();
        form.set_target_goal("5000");
        form.set_deadline("2099-01-01T00:00");

        let outcome = form.submit(&wallet, &contract, utc()).await;

        assert_eq!(outcome, SubmitOutcome::Alert(CREATE_FAILED_ALERT));
        assert_eq!(form.target_goal(), "5000");
        assert_eq!(form.deadline(), "2099-01-01T00:00");
        assert_eq!(form.created_id, None);
        assert_eq!(form.submit_label(), "Create Campaign");

        let retry = form.submit(&wallet, &contract, utc()).await;
        assert_eq!(retry, SubmitOutcome::Navigate(Route::ListCampaigns));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn disconnected_session_prompts() {
        let wallet = Rc::new(DevWallet::new(dev_address(3), 0));
        let contract = DevContract::new(wallet.clone());
        let mut form = CreateCampaignForm::default();
        form.set_target_goal("1");
        form.set_deadline("2099-01-01");

        assert_eq!(
            form.render(false, None, None, &ClientConfig::default()),
            CreateScreen::ConnectPrompt
        );
        assert_eq!(
            form.submit(&wallet, &contract, utc()).await,
            SubmitOutcome::Alert(CONTRACT_NOT_LOADED)
        );
        assert_eq!(load_balance(&wallet).await, None);
        assert!(contract.calls().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_balance_shows_faucet() {
        let (wallet, _contract) = dev_pair(0);
        let form = CreateCampaignForm::default();
        let balance = load_balance(&wallet).await;
        let address = wallet.address();

        let CreateScreen::Form { faucet, goal_preview, .. } =
            form.render(true, balance, address.as_ref(), &ClientConfig::default())
        else {
            panic!("expected form");
        };
        assert!(faucet.unwrap().ends_with(address.unwrap().as_str()));
        assert_eq!(goal_preview, "≈ 0.000000000 ETH");

        wallet.set_balance(10);
        let CreateScreen::Form { faucet, .. } = form.render(
            true,
            load_balance(&wallet).await,
            wallet.address().as_ref(),
            &ClientConfig::default(),
        ) else {
            panic!("expected form");
        };
        assert_eq!(faucet, None);
    }

    #[test]
    fn goal_input_is_digit_filtered() {
        let mut form = CreateCampaignForm::default();
        form.set_target_goal("1e3");
        assert_eq!(form.target_goal(), "13");
        form.set_target_goal("-1,000");
        assert_eq!(form.target_goal(), "1000");
        assert_eq!(form.goal_preview(), "≈ 0.000001000 ETH");
    }
}

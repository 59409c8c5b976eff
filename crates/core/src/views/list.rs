//! "Campaigns" page: every campaign, with a manual refresh.

use chrono::FixedOffset;
use tracing::{debug, error};

use crate::campaign::{Campaign, CampaignCard};
use crate::contract::CampaignContract;
use crate::error::FailureKind;
use crate::request::RequestState;
use crate::wallet::WalletSession;

pub const CONNECT_PROMPT: &str = "Please connect your Fuel wallet to list campaigns.";
pub const FETCH_FAILED: &str = "Failed to fetch campaigns";
pub const EMPTY_MESSAGE: &str = "No campaigns found.";

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScreen {
    ConnectPrompt,
    Loading,
    Error(String),
    Empty,
    Cards(Vec<CampaignCard>),
}

/// Run the list call and resolve it to a terminal state. Never fails.
pub async fn fetch_campaigns<C: CampaignContract>(contract: &C) -> RequestState<Vec<Campaign>> {
    match contract.list_campaigns().await {
        Ok(campaigns) => {
            debug!(count = campaigns.len(), "campaigns fetched");
            RequestState::Success(campaigns)
        }
        Err(e) => {
            error!(error = %e, "failed to fetch campaigns");
            let msg = match FailureKind::classify(&e) {
                FailureKind::WalletLocked => crate::error::WALLET_LOCKED_MESSAGE,
                _ => FETCH_FAILED,
            };
            RequestState::Error(msg.to_string())
        }
    }
}

/// Request state plus the rows from the last successful fetch, which stay on
/// screen while a refresh is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub request: RequestState<Vec<Campaign>>,
    shown: Option<Vec<Campaign>>,
}

impl ListState {
    pub fn begin_refresh(&mut self) {
        if let RequestState::Success(rows) = std::mem::take(&mut self.request) {
            self.shown = Some(rows);
        }
        self.request = RequestState::Loading;
    }

    /// An error replaces the rows; nothing stale is shown beside it.
    pub fn finish_refresh(&mut self, result: RequestState<Vec<Campaign>>) {
        self.request = result;
        self.shown = None;
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error()
    }

    fn visible_rows(&self) -> Option<&Vec<Campaign>> {
        match &self.request {
            RequestState::Success(rows) => Some(rows),
            RequestState::Idle | RequestState::Loading => self.shown.as_ref(),
            RequestState::Error(_) => None,
        }
    }
}

pub fn render(connected: bool, state: &ListState, offset: FixedOffset) -> ListScreen {
    if !connected {
        return ListScreen::ConnectPrompt;
    }
    if let Some(e) = state.error() {
        return ListScreen::Error(e.to_string());
    }
    match state.visible_rows() {
        None => ListScreen::Loading,
        Some(rows) if rows.is_empty() => ListScreen::Empty,
        Some(rows) => {
            ListScreen::Cards(rows.iter().map(|c| CampaignCard::new(c, offset)).collect())
        }
    }
}

pub fn refresh_label(state: &ListState) -> &'static str {
    if state.is_loading() {
        "Refreshing…"
    } else {
        "Refresh"
    }
}

/// Controller for hosts that own the state directly (console, tests).
#[derive(Debug, Default)]
pub struct ListCampaignsView {
    pub state: ListState,
}

impl ListCampaignsView {
    /// Fetch on mount/connect and on every refresh. Disconnected sessions
    /// issue no call.
    pub async fn refresh<W: WalletSession, C: CampaignContract>(
        &mut self,
        session: &W,
        contract: &C,
    ) {
        if !session.is_connected() {
            return;
        }
        self.state.begin_refresh();
        let result = fetch_campaigns(contract).await;
        self.state.finish_refresh(result);
    }

    pub fn render<W: WalletSession>(&self, session: &W, offset: FixedOffset) -> ListScreen {
        render(session.is_connected(), &self.state, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::utc;
    use crate::error::WALLET_LOCKED_MESSAGE;
    use crate::sim::{dev_address, dev_pair, DevCall, DevContract, DevWallet};
    use std::rc::Rc;

    #[tokio::test(flavor = "current_thread")]
    async fn disconnected_session_issues_no_call() {
        let wallet = Rc::new(DevWallet::new(dev_address(1), 0));
        let contract = DevContract::new(wallet.clone());
        let mut view = ListCampaignsView::default();

        view.refresh(&wallet, &contract).await;

        assert!(contract.calls().is_empty());
        assert_eq!(view.render(&wallet, utc()), ListScreen::ConnectPrompt);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn lists_created_campaigns() {
        let (wallet, contract) = dev_pair(0);
        contract.create_campaign(1_000, 1_767_225_600_000).await.unwrap();
        contract.create_campaign(2_000, 1_767_225_600_000).await.unwrap();
        contract.clear_calls();

        let mut view = ListCampaignsView::default();
        view.refresh(&wallet, &contract).await;

        assert_eq!(contract.calls(), vec![DevCall::ListCampaigns]);
        let ListScreen::Cards(cards) = view.render(&wallet, utc()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Campaign #1");
        assert_eq!(cards[0].goal.value_line(), "0.000001000 ETH");
        assert_eq!(cards[0].deadline, "2026-01-01 00:00:00");
        assert_eq!(cards[1].details_path, "/campaigns/2/details");
        assert_eq!(refresh_label(&view.state), "Refresh");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn refresh_keeps_previous_rows_visible() {
        let (wallet, contract) = dev_pair(0);
        contract.create_campaign(1_000, 1_767_225_600_000).await.unwrap();
        let mut view = ListCampaignsView::default();
        view.refresh(&wallet, &contract).await;

        view.state.begin_refresh();
        assert_eq!(refresh_label(&view.state), "Refreshing…");
        let ListScreen::Cards(cards) = view.render(&wallet, utc()) else {
            panic!("expected previous cards while refreshing");
        };
        assert_eq!(cards.len(), 1);

        contract.create_campaign(2_000, 1_767_225_600_000).await.unwrap();
        let result = fetch_campaigns(&contract).await;
        view.state.finish_refresh(result);
        let ListScreen::Cards(cards) = view.render(&wallet, utc()) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(refresh_label(&view.state), "Refresh");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_refresh_drops_previous_rows() {
        let (wallet, contract) = dev_pair(0);
        contract.create_campaign(1_000, 1_767_225_600_000).await.unwrap();
        let mut view = ListCampaignsView::default();
        view.refresh(&wallet, &contract).await;

        wallet.set_locked(true);
        view.refresh(&wallet, &contract).await;

        assert_eq!(
            view.render(&wallet, utc()),
            ListScreen::Error(WALLET_LOCKED_MESSAGE.to_string())
        );
    }

    #[test]
    fn first_load_shows_loading() {
        let mut state = ListState::default();
        state.begin_refresh();
        assert_eq!(render(true, &state, utc()), ListScreen::Loading);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_list_is_not_an_error() {
        let (wallet, contract) = dev_pair(0);
        let mut view = ListCampaignsView::default();
        view.refresh(&wallet, &contract).await;
        assert_eq!(view.render(&wallet, utc()), ListScreen::Empty);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn locked_wallet_gets_unlock_message() {
        let (wallet, contract) = dev_pair(0);
        wallet.set_locked(true);
        let mut view = ListCampaignsView::default();

        view.refresh(&wallet, &contract).await;

        assert_eq!(view.state.error(), Some(WALLET_LOCKED_MESSAGE));
        assert!(!view.state.is_loading());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unclassified_failure_gets_generic_message() {
        struct Broken;
        impl CampaignContract for Broken {
            async fn create_campaign(
                &self,
                _: u64,
                _: u64,
            ) -> Result<crate::contract::CallReceipt<u64>, crate::error::ClientError> {
                unreachable!()
            }
            async fn list_campaigns(&self) -> Result<Vec<Campaign>, crate::error::ClientError> {
                Err(crate::error::ClientError::Call("timeout".into()))
            }
            async fn get_campaign(
                &self,
                _: u64,
            ) -> Result<Option<Campaign>, crate::error::ClientError> {
                unreachable!()
            }
            async fn contribute(
                &self,
                _: u64,
                _: u64,
                _: crate::contract::Forward,
            ) -> Result<crate::contract::CallReceipt<u64>, crate::error::ClientError> {
                unreachable!()
            }
        }

        let state = fetch_campaigns(&Broken).await;
        assert_eq!(state.error(), Some(FETCH_FAILED));
    }
}

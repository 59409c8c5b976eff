use chrono::FixedOffset;
use crowdfund::campaign::Address;
use crowdfund::config::ClientConfig;
use crowdfund::deadline;
use crowdfund::route::Route;
use crowdfund::wallet::WalletSession;
use leptos::prelude::*;
use tracing::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;

mod bridge;
mod components;
mod contract;
mod create_page;
mod detail_page;
mod list_page;
mod logging;
mod shell;
mod wallet;

use contract::BrowserContract;
use wallet::{current_account, BrowserWallet};

pub fn start() {
    logging::init();
    mount_to_body(|| view! { <App /> });
}

/// Shared by every page through `use_context`.
#[derive(Clone)]
pub(super) struct AppContext {
    cfg: ClientConfig,
    account: RwSignal<Option<Address>>,
}

impl AppContext {
    /// Tracked: pages re-run their fetch effects when this flips.
    pub(super) fn connected(&self) -> bool {
        self.account.with(Option::is_some)
    }

    pub(super) fn connected_untracked(&self) -> bool {
        self.account.with_untracked(Option::is_some)
    }

    pub(super) fn account(&self) -> Option<Address> {
        self.account.get()
    }

    pub(super) fn wallet(&self) -> BrowserWallet {
        BrowserWallet::new(self.account.get_untracked())
    }

    pub(super) fn contract(&self) -> BrowserContract {
        BrowserContract::new(self.cfg.contract_id.as_str())
    }

    pub(super) fn cfg(&self) -> &ClientConfig {
        &self.cfg
    }
}

pub(super) fn app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Display offset for deadlines.
pub(super) fn local_offset() -> FixedOffset {
    deadline::offset_from_js_minutes(bridge::timezone_offset_minutes(""))
}

/// Offset in effect at a `datetime-local` value, so DST is honoured.
pub(super) fn offset_at(local: &str) -> FixedOffset {
    deadline::offset_from_js_minutes(bridge::timezone_offset_minutes(local))
}

pub(super) fn navigate(route: &Route) {
    if let Some(w) = web_sys::window() {
        let _ = w.location().set_hash(&route.path());
    }
}

/// Resolve the location hash, rewriting it when it does not name a route.
fn sync_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::default();
    };
    let hash = location.hash().unwrap_or_default();
    let route = Route::parse(&hash);
    if hash != route.hash() {
        debug!(from = %hash, to = %route.path(), "redirecting");
        let _ = location.replace(&route.hash());
    }
    route
}

#[component]
fn App() -> impl IntoView {
    let cfg = ClientConfig::with_contract_override(option_env!("CROWDFUND_CONTRACT_ID"));
    if cfg.uses_placeholder() {
        warn!("CROWDFUND_CONTRACT_ID not set at build time; using placeholder contract id");
    }

    let account = RwSignal::new(None::<Address>);
    let connecting = RwSignal::new(false);
    let route = RwSignal::new(sync_route());
    provide_context(AppContext { cfg, account });

    let _ = window_event_listener(leptos::ev::hashchange, move |_| route.set(sync_route()));

    // Pick up a session the connector already authorised.
    spawn_local(async move {
        match current_account().await {
            Ok(found) => account.set(found),
            Err(e) => debug!(error = %e, "no existing wallet session"),
        }
    });

    let connect = Callback::new(move |_: ()| {
        if connecting.get_untracked() {
            return;
        }
        connecting.set(true);
        spawn_local(async move {
            let wallet = BrowserWallet::default();
            let result = match wallet.connect().await {
                Ok(()) => current_account().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(found) => {
                    info!(address = ?found, "wallet connected");
                    account.set(found);
                }
                Err(e) => error!(error = %e, "wallet connection failed"),
            }
            connecting.set(false);
        });
    });

    let disconnect = Callback::new(move |_: ()| {
        spawn_local(async move {
            let wallet = BrowserWallet::new(account.get_untracked());
            if let Err(e) = wallet.disconnect().await {
                error!(error = %e, "wallet disconnect failed");
            }
            account.set(None);
        });
    });

    view! {
        <div class="app">
            <shell::Header account=account connecting=connecting connect=connect />
            <shell::MainMenu route=route />
            <main class="page">
                {move || match route.get() {
                    Route::CreateCampaign => view! { <create_page::CreateCampaignPage /> }.into_any(),
                    Route::ListCampaigns => view! { <list_page::ListCampaignsPage /> }.into_any(),
                    Route::CampaignDetails(raw_id) => {
                        view! { <detail_page::CampaignDetailPage raw_id=raw_id /> }.into_any()
                    }
                }}
            </main>
            <shell::Footer account=account disconnect=disconnect />
        </div>
    }
}

//! Interactive console over the in-memory development contract.
//!
//! Renders the same screens as the browser app, one command per line:
//!   connect | disconnect | lock | unlock | reject
//!   balance [N]
//!   create GOAL DATETIME        e.g. create 1000 2027-01-01T12:00
//!   list
//!   show ID
//!   contribute ID AMOUNT
//!   count | next | owner ID
//!   route PATH                  e.g. route /campaigns/1/details
//!   clock MS|host
//!   help | quit
//!
//! Start with `--balance N` to fund the development wallet (base units).
//! Logs go to stderr; set `RUST_LOG=crowdfund=debug` for call traces.

use std::process;
use std::rc::Rc;

use chrono::{FixedOffset, Local, Offset};
use crowdfund::amount::AmountDisplay;
use crowdfund::campaign::CampaignCard;
use crowdfund::config::ClientConfig;
use crowdfund::contract::CampaignDirectory;
use crowdfund::route::{MenuLink, Route};
use crowdfund::sim::{dev_address, DevContract, DevWallet};
use crowdfund::views::create::{self, CreateCampaignForm, CreateScreen, SubmitOutcome};
use crowdfund::views::detail::{self, CampaignDetailView, DetailScreen};
use crowdfund::views::list::{self, ListCampaignsView, ListScreen};
use crowdfund::wallet::{connect_session, SessionBar, WalletSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_BALANCE: u64 = 1_000_000_000;

fn usage() -> ! {
    eprintln!("usage: crowdfund-cli [--balance N]");
    process::exit(2);
}

fn parse_args() -> u64 {
    let mut args = std::env::args().skip(1);
    let mut balance = DEFAULT_BALANCE;
    while let Some(a) = args.next() {
        match a.as_str() {
            "--balance" => {
                balance = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| usage());
            }
            "-h" | "--help" => usage(),
            _ => usage(),
        }
    }
    balance
}

struct Console {
    cfg: ClientConfig,
    offset: FixedOffset,
    wallet: Rc<DevWallet>,
    contract: DevContract,
    list: ListCampaignsView,
    create: CreateCampaignForm,
}

impl Console {
    fn new(balance: u64) -> Self {
        let wallet = Rc::new(DevWallet::new(dev_address(0xa1), balance));
        let contract = DevContract::new(wallet.clone());
        Self {
            cfg: ClientConfig::from_env(),
            offset: Local::now().offset().fix(),
            wallet,
            contract,
            list: ListCampaignsView::default(),
            create: CreateCampaignForm::default(),
        }
    }

    /// Returns `false` when the console should exit.
    async fn run_line(&mut self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, rest)) = words.split_first() else {
            return true;
        };

        match (cmd, rest) {
            ("quit" | "exit", _) => return false,
            ("help", _) => print_help(),
            ("connect", _) => match connect_session(&self.wallet).await {
                Ok(_) => self.print_session(),
                Err(e) => println!("! {e}"),
            },
            ("disconnect", _) => {
                if let Err(e) = self.wallet.disconnect().await {
                    println!("! {e}");
                }
                self.print_session();
            }
            ("lock", _) => self.wallet.set_locked(true),
            ("unlock", _) => self.wallet.set_locked(false),
            ("reject", _) => self.wallet.reject_next(),
            ("balance", []) => match self.wallet.balance().await {
                Ok(b) => print_amount(&AmountDisplay::new("Balance", b)),
                Err(e) => println!("! {e}"),
            },
            ("balance", [n]) => match n.parse() {
                Ok(b) => self.wallet.set_balance(b),
                Err(_) => println!("! balance must be an unsigned integer"),
            },
            ("clock", ["host"]) => self.contract.set_now_ms(None),
            ("clock", [ms]) => match ms.parse() {
                Ok(ms) => self.contract.set_now_ms(Some(ms)),
                Err(_) => println!("! clock takes milliseconds or `host`"),
            },
            ("create", [goal, deadline]) => self.create_campaign(goal, deadline).await,
            ("list", []) => self.show_list().await,
            ("show", [id]) => self.show_detail(id).await,
            ("contribute", [id, amount]) => self.contribute(id, amount).await,
            ("count", []) => match self.contract.campaign_count().await {
                Ok(n) => println!("campaigns: {n}"),
                Err(e) => println!("! {e}"),
            },
            ("next", []) => match self.contract.next_id().await {
                Ok(n) => println!("next id: {n}"),
                Err(e) => println!("! {e}"),
            },
            ("owner", [id]) => self.print_owner(id).await,
            ("route", [path]) => self.navigate(Route::parse(path)).await,
            _ => println!("! unknown command; try `help`"),
        }
        true
    }

    fn print_session(&self) {
        let bar = SessionBar::from_session(&self.wallet, false);
        if let Some(label) = bar.connect_label() {
            println!("[{label}]");
        }
        if let Some(footer) = bar.footer() {
            println!("{footer}");
        }
    }

    async fn navigate(&mut self, route: Route) {
        println!("→ {}", route.path());
        match route {
            Route::CreateCampaign => self.show_create().await,
            Route::ListCampaigns => self.show_list().await,
            Route::CampaignDetails(id) => self.show_detail(&id).await,
        }
    }

    async fn show_create(&mut self) {
        let balance = create::load_balance(&self.wallet).await;
        let address = self.wallet.address();
        let screen = self.create.render(
            self.wallet.is_connected(),
            balance,
            address.as_ref(),
            &self.cfg,
        );
        match screen {
            CreateScreen::ConnectPrompt => println!("{}", create::CONNECT_PROMPT),
            CreateScreen::Form {
                goal_preview,
                faucet,
                submit_label,
                created_id,
                ..
            } => {
                println!("Create Campaign");
                println!("  Target Goal: {:?}  Preview: {goal_preview}", self.create.target_goal());
                println!("  Deadline: {:?}", self.create.deadline());
                match faucet {
                    Some(url) => println!("  Get testnet funds from the Fuel Faucet: {url}"),
                    None => println!("  [{submit_label}]"),
                }
                if let Some(id) = created_id {
                    println!("  Created campaign id: {id}");
                }
            }
        }
    }

    async fn create_campaign(&mut self, goal: &str, deadline: &str) {
        self.create.set_target_goal(goal);
        self.create.set_deadline(deadline);
        let outcome = self
            .create
            .submit(&self.wallet, &self.contract, self.offset)
            .await;
        match outcome {
            SubmitOutcome::Navigate(route) => self.navigate(route).await,
            SubmitOutcome::Alert(msg) => println!("! {msg}"),
        }
    }

    async fn show_list(&mut self) {
        self.list.refresh(&self.wallet, &self.contract).await;
        match self.list.render(&self.wallet, self.offset) {
            ListScreen::ConnectPrompt => println!("{}", list::CONNECT_PROMPT),
            ListScreen::Loading => println!("Loading…"),
            ListScreen::Error(e) => println!("! {e}"),
            ListScreen::Empty => println!("{}", list::EMPTY_MESSAGE),
            ListScreen::Cards(cards) => {
                println!("Campaigns");
                for card in &cards {
                    print_card(card);
                }
            }
        }
    }

    async fn show_detail(&mut self, raw_id: &str) {
        let mut view = CampaignDetailView::new(raw_id);
        view.load(&self.wallet, &self.contract).await;
        self.print_detail(&view);
    }

    fn print_detail(&self, view: &CampaignDetailView) {
        match view.render(self.wallet.is_connected(), self.offset) {
            DetailScreen::ConnectPrompt => println!("{}", detail::CONNECT_PROMPT),
            DetailScreen::InvalidId => println!("{}", detail::INVALID_ID_MESSAGE),
            DetailScreen::Loading => println!("Loading…"),
            DetailScreen::Error(e) => println!("! {e}"),
            DetailScreen::NotFound => println!("{}", detail::NOT_FOUND_MESSAGE),
            DetailScreen::Loaded { card, notice, .. } => {
                println!("{}", view.heading());
                print_card(&card);
                if let Some(n) = notice {
                    println!("! {n}");
                }
            }
        }
    }

    async fn print_owner(&self, raw_id: &str) {
        let Ok(id) = detail::parse_campaign_id(raw_id) else {
            println!("{}", detail::INVALID_ID_MESSAGE);
            return;
        };
        match self.contract.campaign_owner_address(id).await {
            Ok(Some(address)) => println!("owner: {}", address.as_str()),
            Ok(None) => println!("owner: none (unknown campaign or contract owner)"),
            Err(e) => println!("! {e}"),
        }
    }

    async fn contribute(&mut self, raw_id: &str, amount: &str) {
        let mut view = CampaignDetailView::new(raw_id);
        view.load(&self.wallet, &self.contract).await;
        if let Err(alert) = view.open_dialog(self.wallet.is_connected()) {
            println!("! {alert}");
            return;
        }
        view.dialog.set_amount(amount);
        println!("Preview: {}", view.dialog.preview());
        if view.dialog.confirm_amount().is_none() {
            println!("! amount must be a positive integer");
            return;
        }
        view.submit_contribution(&self.wallet, &self.contract).await;
        self.print_detail(&view);
    }
}

fn print_amount(a: &AmountDisplay) {
    println!("    {}: {} {}", a.label, a.value_line(), a.base_units_hint());
}

fn print_card(card: &CampaignCard) {
    println!("  {}  Owner: {}", card.title, card.owner_short);
    print_amount(&card.goal);
    print_amount(&card.raised);
    println!("    Deadline: {}", card.deadline);
    println!("    View details → {}", card.details_path);
}

fn print_help() {
    println!("commands:");
    println!("  connect | disconnect | lock | unlock | reject");
    println!("  balance [N] | clock MS|host");
    println!("  create GOAL DATETIME | list | show ID | contribute ID AMOUNT");
    println!("  count | next | owner ID");
    println!("  route PATH | help | quit");
    for m in MenuLink::all() {
        println!("  menu: {} ({})", m.label(), m.route().path());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let balance = parse_args();
    let rt = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            process::exit(1);
        }
    };

    rt.block_on(async move {
        let mut console = Console::new(balance);
        console.print_session();
        console.navigate(Route::default()).await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !console.run_line(&line).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
}

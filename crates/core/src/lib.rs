//! # crowdfund
//!
//! Client core for the crowdfunding contract: everything the browser app
//! needs that does not touch the DOM.
//!
//! - [`amount`]: base units to fixed-decimal text, and digit-only input
//! - [`campaign`]: read-only campaign snapshots as the contract returns them
//! - [`contract`] / [`wallet`]: async seams to the contract proxy and wallet
//! - [`views`]: per-page request state machines and screen models
//! - [`route`]: navigation table
//! - [`sim`]: in-memory contract and wallet for tests and the console
//!
//! ## Feature Flags
//!
//! - `cli`: builds `crowdfund-cli`, an interactive console over [`sim`]

pub mod amount;
pub mod campaign;
pub mod config;
pub mod contract;
pub mod deadline;
pub mod error;
pub mod request;
pub mod route;
pub mod sim;
pub mod views;
pub mod wallet;

pub mod prelude {
    pub use crate::amount::{format_units, sanitize_digits, AmountDisplay, BASE_DECIMALS};
    pub use crate::campaign::{Bits256, Campaign, CampaignCard, Identity};
    pub use crate::config::ClientConfig;
    pub use crate::contract::{CallReceipt, CampaignContract, CampaignDirectory, Forward};
    pub use crate::error::{ClientError, FailureKind};
    pub use crate::request::RequestState;
    pub use crate::route::{MenuLink, Route};
    pub use crate::wallet::{SessionBar, WalletSession};
}

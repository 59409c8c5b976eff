//! In-memory development contract and wallet.
//!
//! Mirrors what the deployed contract does closely enough to drive every view
//! without a network: ids start at 1 and increment, new campaigns start with
//! nothing raised, contributions must forward exactly the amount they name in
//! the base asset and land before the deadline. Every call attempt is recorded
//! so tests can assert what was (and was not) issued.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::campaign::{Address, AssetId, Bits256, Campaign, Identity};
use crate::contract::{CallReceipt, CampaignContract, CampaignDirectory, Forward};
use crate::error::ClientError;
use crate::wallet::WalletSession;

/// Base asset id of the Fuel testnet.
pub const BASE_ASSET_ID: &str =
    "0xf8f8b6283d7fa5b672b530cbb84fcccb4ff8dc40f8176ef4544ddb1f1952ad07";

pub const LOCKED_MESSAGE: &str =
    "Cannot fund the dry-run: the account requires an unlocked wallet";
pub const REJECTED_MESSAGE: &str = "User rejected the transaction request";

#[derive(Debug, Clone)]
struct WalletState {
    connected: bool,
    locked: bool,
    reject_next: bool,
    balance: u64,
    address: Address,
}

/// Development wallet. Interior mutability only; one cooperative thread.
#[derive(Debug)]
pub struct DevWallet {
    state: RefCell<WalletState>,
}

impl DevWallet {
    pub fn new(address: Address, balance: u64) -> Self {
        Self {
            state: RefCell::new(WalletState {
                connected: false,
                locked: false,
                reject_next: false,
                balance,
                address,
            }),
        }
    }

    pub fn connected(address: Address, balance: u64) -> Self {
        let w = Self::new(address, balance);
        w.state.borrow_mut().connected = true;
        w
    }

    pub fn set_locked(&self, locked: bool) {
        self.state.borrow_mut().locked = locked;
    }

    pub fn set_balance(&self, balance: u64) {
        self.state.borrow_mut().balance = balance;
    }

    /// Decline the next transaction prompt.
    pub fn reject_next(&self) {
        self.state.borrow_mut().reject_next = true;
    }

    fn ensure_usable(&self) -> Result<(), ClientError> {
        let s = self.state.borrow();
        if !s.connected {
            return Err(ClientError::NotConnected);
        }
        if s.locked {
            return Err(ClientError::Wallet(LOCKED_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Prompt for a signature; consumes a pending rejection.
    fn approve(&self) -> Result<(), ClientError> {
        self.ensure_usable()?;
        let mut s = self.state.borrow_mut();
        if s.reject_next {
            s.reject_next = false;
            return Err(ClientError::Wallet(REJECTED_MESSAGE.to_string()));
        }
        Ok(())
    }

    fn spend(&self, amount: u64) -> Result<(), ClientError> {
        let mut s = self.state.borrow_mut();
        if s.balance < amount {
            return Err(ClientError::Call(format!(
                "not enough coins to fit the target: have {}, need {}",
                s.balance, amount
            )));
        }
        s.balance -= amount;
        Ok(())
    }

    fn current_address(&self) -> Address {
        self.state.borrow().address.clone()
    }
}

impl WalletSession for DevWallet {
    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    fn address(&self) -> Option<Address> {
        let s = self.state.borrow();
        s.connected.then(|| s.address.clone())
    }

    async fn connect(&self) -> Result<(), ClientError> {
        let mut s = self.state.borrow_mut();
        if s.reject_next {
            s.reject_next = false;
            return Err(ClientError::Wallet(REJECTED_MESSAGE.to_string()));
        }
        s.connected = true;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ClientError> {
        self.state.borrow_mut().connected = false;
        Ok(())
    }

    async fn balance(&self) -> Result<u64, ClientError> {
        self.ensure_usable()?;
        Ok(self.state.borrow().balance)
    }

    async fn base_asset_id(&self) -> Result<AssetId, ClientError> {
        self.ensure_usable()?;
        Ok(Bits256(BASE_ASSET_ID.to_string()))
    }
}

/// One recorded call attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevCall {
    CreateCampaign { target_goal: u64, deadline_ms: u64 },
    ListCampaigns,
    GetCampaign { id: u64 },
    Contribute { id: u64, amount: u64, forward: Forward },
    CampaignCount,
    NextId,
    CampaignOwner { id: u64 },
}

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    campaigns: BTreeMap<u64, Campaign>,
    tx_counter: u64,
}

/// Development contract bound to a [`DevWallet`], as a generated proxy is
/// bound to the connected account.
#[derive(Debug)]
pub struct DevContract {
    wallet: Rc<DevWallet>,
    ledger: RefCell<Ledger>,
    calls: RefCell<Vec<DevCall>>,
    now_ms: Cell<Option<u64>>,
    fail_lookups: Cell<u32>,
    zeroed_missing: Cell<bool>,
}

impl DevContract {
    pub fn new(wallet: Rc<DevWallet>) -> Self {
        Self {
            wallet,
            ledger: RefCell::new(Ledger {
                next_id: 1,
                ..Ledger::default()
            }),
            calls: RefCell::new(Vec::new()),
            now_ms: Cell::new(None),
            fail_lookups: Cell::new(0),
            zeroed_missing: Cell::new(false),
        }
    }

    pub fn wallet(&self) -> &Rc<DevWallet> {
        &self.wallet
    }

    pub fn calls(&self) -> Vec<DevCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Pin the contract clock (ms since epoch); `None` uses the host clock.
    pub fn set_now_ms(&self, now: Option<u64>) {
        self.now_ms.set(now);
    }

    /// Make the next `n` `get_campaign` calls fail.
    pub fn fail_next_lookups(&self, n: u32) {
        self.fail_lookups.set(n);
    }

    /// Answer lookups of unknown ids with a zeroed record instead of `None`,
    /// as older interface versions did.
    pub fn return_zeroed_for_missing(&self, on: bool) {
        self.zeroed_missing.set(on);
    }

    fn record(&self, call: DevCall) {
        tracing::debug!(?call, "dev contract call");
        self.calls.borrow_mut().push(call);
    }

    fn now(&self) -> u64 {
        self.now_ms.get().unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }

    fn next_tx_id(&self) -> String {
        let mut l = self.ledger.borrow_mut();
        l.tx_counter += 1;
        format!("0x{:064x}", l.tx_counter)
    }

    fn zeroed(&self) -> Campaign {
        Campaign {
            id: 0,
            owner: Identity::Address {
                bits: Bits256::zero(),
            },
            target_goal: 0,
            total_raised: 0,
            deadline: 0,
            asset_id: None,
        }
    }
}

impl CampaignContract for DevContract {
    async fn create_campaign(
        &self,
        target_goal: u64,
        deadline_ms: u64,
    ) -> Result<CallReceipt<u64>, ClientError> {
        self.record(DevCall::CreateCampaign {
            target_goal,
            deadline_ms,
        });
        self.wallet.approve()?;

        let owner = Identity::Address {
            bits: self.wallet.current_address(),
        };
        let id = {
            let mut l = self.ledger.borrow_mut();
            let id = l.next_id;
            l.next_id += 1;
            l.campaigns.insert(
                id,
                Campaign {
                    id,
                    owner,
                    target_goal,
                    total_raised: 0,
                    deadline: deadline_ms,
                    asset_id: None,
                },
            );
            id
        };
        Ok(CallReceipt {
            transaction_id: self.next_tx_id(),
            value: id,
        })
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        self.record(DevCall::ListCampaigns);
        self.wallet.ensure_usable()?;
        Ok(self.ledger.borrow().campaigns.values().cloned().collect())
    }

    async fn get_campaign(&self, id: u64) -> Result<Option<Campaign>, ClientError> {
        self.record(DevCall::GetCampaign { id });
        self.wallet.ensure_usable()?;
        let pending = self.fail_lookups.get();
        if pending > 0 {
            self.fail_lookups.set(pending - 1);
            return Err(ClientError::Call("node unavailable".to_string()));
        }
        let found = self.ledger.borrow().campaigns.get(&id).cloned();
        match found {
            Some(c) => Ok(Some(c)),
            None if self.zeroed_missing.get() => Ok(Some(self.zeroed())),
            None => Ok(None),
        }
    }

    async fn contribute(
        &self,
        id: u64,
        amount: u64,
        forward: Forward,
    ) -> Result<CallReceipt<u64>, ClientError> {
        self.record(DevCall::Contribute {
            id,
            amount,
            forward: forward.clone(),
        });
        self.wallet.approve()?;

        if amount == 0 {
            return Err(ClientError::Call("Revert: amount must be positive".into()));
        }
        if forward.amount != amount {
            return Err(ClientError::Call(
                "Revert: forwarded amount does not match".into(),
            ));
        }
        if forward.asset_id.as_str() != BASE_ASSET_ID {
            return Err(ClientError::Call("Revert: unsupported asset".into()));
        }
        let deadline = match self.ledger.borrow().campaigns.get(&id) {
            Some(c) => c.deadline,
            None => return Err(ClientError::Call("Revert: campaign does not exist".into())),
        };
        if self.now() >= deadline {
            return Err(ClientError::Call("Revert: campaign has ended".into()));
        }

        self.wallet.spend(amount)?;
        let total = {
            let mut l = self.ledger.borrow_mut();
            let Some(c) = l.campaigns.get_mut(&id) else {
                return Err(ClientError::Call("Revert: campaign does not exist".into()));
            };
            c.total_raised = c.total_raised.saturating_add(amount);
            c.total_raised
        };
        Ok(CallReceipt {
            transaction_id: self.next_tx_id(),
            value: total,
        })
    }
}

impl CampaignDirectory for DevContract {
    async fn campaign_count(&self) -> Result<u64, ClientError> {
        self.record(DevCall::CampaignCount);
        self.wallet.ensure_usable()?;
        Ok(self.ledger.borrow().campaigns.len() as u64)
    }

    async fn next_id(&self) -> Result<u64, ClientError> {
        self.record(DevCall::NextId);
        self.wallet.ensure_usable()?;
        Ok(self.ledger.borrow().next_id)
    }

    async fn campaign_owner_address(&self, id: u64) -> Result<Option<Address>, ClientError> {
        self.record(DevCall::CampaignOwner { id });
        self.wallet.ensure_usable()?;
        Ok(self
            .ledger
            .borrow()
            .campaigns
            .get(&id)
            .and_then(|c| match &c.owner {
                Identity::Address { bits } => Some(bits.clone()),
                Identity::ContractId { .. } => None,
            }))
    }
}

/// Deterministic address for tests and the console.
pub fn dev_address(seed: u8) -> Address {
    Bits256(format!("0x{}", format!("{seed:02x}").repeat(32)))
}

/// A connected wallet with `balance` and a contract bound to it.
pub fn dev_pair(balance: u64) -> (Rc<DevWallet>, DevContract) {
    let wallet = Rc::new(DevWallet::connected(dev_address(0xa1), balance));
    let contract = DevContract::new(wallet.clone());
    (wallet, contract)
}

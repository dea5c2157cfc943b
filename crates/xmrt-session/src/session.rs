//! Connection state for one dashboard instance.
//!
//! The caller owns the `Session` and passes it into every controller call;
//! there is no global. Interior mutability keeps it usable from several
//! in-flight commands on a single-threaded event loop: borrows are never
//! held across an await.

use std::cell::{Cell, RefCell};
use xmrt_api_types::{ContractAddress, WalletAddress, WalletId};
use xmrt_chain_client::WalletHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Default)]
struct SessionState {
    connection: ConnectionState,
    /// Only ever `Some` while `Connected`.
    wallet: Option<WalletHandle>,
    contract_address: Option<ContractAddress>,
    staked: f64,
}

#[derive(Debug, Default)]
pub struct Session {
    inner: RefCell<SessionState>,
    /// Bumped whenever a connection is established or torn down. Handlers
    /// that await a backend compare it before writing their result back.
    generation: Cell<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.borrow().connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    pub fn wallet_id(&self) -> Option<WalletId> {
        self.inner.borrow().wallet.as_ref().map(|w| w.id.clone())
    }

    /// The connected account, present iff `Connected`.
    pub fn account_address(&self) -> Option<WalletAddress> {
        self.inner
            .borrow()
            .wallet
            .as_ref()
            .map(|w| w.account.address.clone())
    }

    pub fn contract_address(&self) -> Option<ContractAddress> {
        self.inner.borrow().contract_address.clone()
    }

    pub fn staked_amount(&self) -> f64 {
        self.inner.borrow().staked
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    fn bump_generation(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    pub(crate) fn begin_connect(&self) {
        let mut state = self.inner.borrow_mut();
        state.connection = ConnectionState::Connecting;
        state.wallet = None;
    }

    /// A new connection starts without a deployed contract or stake.
    pub(crate) fn establish(&self, wallet: WalletHandle) {
        *self.inner.borrow_mut() = SessionState {
            connection: ConnectionState::Connected,
            wallet: Some(wallet),
            ..SessionState::default()
        };
        self.bump_generation();
    }

    pub(crate) fn reset(&self) {
        *self.inner.borrow_mut() = SessionState::default();
        self.bump_generation();
    }

    pub(crate) fn set_contract_address(&self, address: ContractAddress) {
        self.inner.borrow_mut().contract_address = Some(address);
    }

    pub(crate) fn add_staked(&self, amount: f64) -> f64 {
        let mut state = self.inner.borrow_mut();
        state.staked += amount;
        state.staked
    }

    /// Never goes below zero.
    pub(crate) fn remove_staked(&self, amount: f64) -> f64 {
        let mut state = self.inner.borrow_mut();
        state.staked = (state.staked - amount).max(0.0);
        state.staked
    }
}

use anyhow::anyhow;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::{debug, info, warn};
use xmrt_api_types::{
    ContractAddress, Notification, Severity, TransactionKind, TransactionReceipt, WalletAddress,
};
use xmrt_chain_client::{
    ChainProvider, SubmitTxRequest, TokenLedger, TransactionFeed, TransactionSubmitter,
    WalletConnector,
};
use xmrt_storage::SessionStore;

use crate::busy::BusyGuard;
use crate::clock::{Clock, SystemClock};
use crate::command::{Command, Dispatch};
use crate::config::DashboardConfig;
use crate::error::SessionError;
use crate::format::{
    BALANCE_PLACES, NATIVE_DECIMALS, format_address, format_amount, format_units, parse_amount,
};
use crate::notify::NotificationCenter;
use crate::session::{ConnectionState, Session};
use crate::view::{ElementId, View};

/// External collaborators the controller drives.
pub struct Backends {
    pub connector: Rc<dyn WalletConnector>,
    pub provider: Rc<dyn ChainProvider>,
    pub ledger: Rc<dyn TokenLedger>,
    pub feed: Rc<dyn TransactionFeed>,
    pub submitter: Rc<dyn TransactionSubmitter>,
    pub store: Rc<dyn SessionStore>,
}

pub struct SessionController {
    config: DashboardConfig,
    backends: Backends,
    view: Rc<dyn View>,
    clock: Rc<dyn Clock>,
    notifications: NotificationCenter,
    busy: RefCell<BTreeSet<ElementId>>,
}

impl SessionController {
    pub fn new(config: DashboardConfig, backends: Backends, view: Rc<dyn View>) -> Self {
        let notifications = NotificationCenter::new(config.notification_ttl_ms);
        Self {
            config,
            backends,
            view,
            clock: Rc::new(SystemClock),
            notifications,
            busy: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_busy(&self, command: Command) -> bool {
        self.busy.borrow().contains(&command.control())
    }

    pub fn live_notifications(&self) -> Vec<Notification> {
        self.notifications.live(self.clock.now_epoch_ms())
    }

    /// Renders the initial view and reconnects when the store remembers a
    /// wallet. Returns the reconnect outcome, if one was attempted.
    pub async fn restore(&self, session: &Session) -> Option<Dispatch> {
        self.render_status(session);
        self.render_cleared_balances();

        let wallet_id = match self.backends.store.load_last_wallet().await {
            Ok(marker) => marker?,
            Err(err) => {
                warn!("failed to read last wallet marker: {:#}", err);
                return None;
            }
        };

        info!("reconnecting last wallet {}", wallet_id);
        Some(self.dispatch(session, Command::Connect).await)
    }

    /// Runs one command with its control held busy for the duration.
    ///
    /// Failures are logged and shown as a notification here, so handlers
    /// only return them.
    pub async fn dispatch(&self, session: &Session, command: Command) -> Dispatch {
        let Some(_guard) = BusyGuard::acquire(&*self.view, &self.busy, command.control()) else {
            debug!("{:?} ignored, control still busy", command);
            return Dispatch::Ignored;
        };

        let result = match command {
            Command::Connect => self.connect(session).await,
            Command::Disconnect => self.disconnect(session).await,
            Command::RefreshBalance => self.refresh_balance(session).await,
            Command::Stake => self.stake_tokens(session).await,
            Command::Unstake => self.unstake_tokens(session).await,
            Command::LoadTransactions => self.load_transactions(session).await,
            Command::DeployContract => self.deploy_contract(session).await,
            Command::CallContract => self.call_contract(session).await,
        };

        match result {
            Ok(()) => Dispatch::Completed,
            Err(err) => {
                self.report(&err);
                Dispatch::Failed(err)
            }
        }
    }

    async fn connect(&self, session: &Session) -> Result<(), SessionError> {
        if session.is_connected() {
            return Err(SessionError::AlreadyConnected);
        }
        session.begin_connect();
        self.render_status(session);

        let options = self.config.connect_options();
        let wallet = match self.backends.connector.connect(&options).await {
            Ok(wallet) if wallet.is_connected => wallet,
            Ok(wallet) => {
                let err = anyhow!("wallet {} did not report a connected account", wallet.id);
                return Err(self.abort_connect(session, err));
            }
            Err(err) => return Err(self.abort_connect(session, err)),
        };

        let wallet_id = wallet.id.clone();
        let address = wallet.account.address.clone();
        session.establish(wallet);
        info!("wallet {} connected as {}", wallet_id, address);

        if let Err(err) = self.backends.store.save_last_wallet(&wallet_id).await {
            warn!("failed to remember wallet {}: {:#}", wallet_id, err);
        }

        self.view
            .set_text(ElementId::WalletAddress, &format_address(&address.0));
        self.render_status(session);

        self.refresh_after_connect(session).await;
        self.notify("Wallet connected successfully!", Severity::Success);
        Ok(())
    }

    fn abort_connect(&self, session: &Session, err: anyhow::Error) -> SessionError {
        warn!("failed to connect wallet: {:#}", err);
        session.reset();
        self.render_status(session);
        SessionError::external("Failed to connect wallet", err)
    }

    async fn refresh_after_connect(&self, session: &Session) {
        let Some(_guard) = BusyGuard::acquire(&*self.view, &self.busy, ElementId::RefreshBalance)
        else {
            return;
        };
        if let Err(err) = self.refresh_balance(session).await {
            self.report(&err);
        }
    }

    /// Local state is cleared even when the wallet refuses to disconnect.
    async fn disconnect(&self, session: &Session) -> Result<(), SessionError> {
        if let Err(err) = self.backends.connector.disconnect().await {
            warn!("wallet disconnect failed, clearing session anyway: {:#}", err);
        }

        session.reset();
        if let Err(err) = self.backends.store.clear_last_wallet().await {
            warn!("failed to forget last wallet: {:#}", err);
        }

        self.render_status(session);
        self.render_cleared_balances();
        info!("wallet disconnected");
        self.notify("Wallet disconnected", Severity::Info);
        Ok(())
    }

    async fn refresh_balance(&self, session: &Session) -> Result<(), SessionError> {
        let address = session.account_address().ok_or(SessionError::NotConnected)?;

        let native = self
            .backends
            .provider
            .get_balance(&address)
            .await
            .map_err(|err| SessionError::external("Failed to refresh balance", err))?;
        let tokens = self
            .backends
            .ledger
            .token_balance(&address)
            .await
            .map_err(|err| SessionError::external("Failed to refresh balance", err))?;

        let eth = format_units(native.amount, NATIVE_DECIMALS, BALANCE_PLACES);
        self.view.set_text(ElementId::Balance, &format!("{eth} ETH"));
        self.view.set_text(
            ElementId::XmrtBalance,
            &format!("{} {}", tokens, self.backends.ledger.symbol()),
        );
        self.notify("Balance updated", Severity::Success);
        Ok(())
    }

    async fn stake_tokens(&self, session: &Session) -> Result<(), SessionError> {
        let from = self.require_connected(session)?;
        let amount = self.prompt_amount("Enter amount to stake (XMRT):")?;
        let generation = session.generation();

        self.submit(TransactionKind::Stake, from, None, format_amount(amount))
            .await
            .map_err(|err| SessionError::external("Staking failed", err))?;

        if !self.still_current(session, generation, TransactionKind::Stake) {
            return Ok(());
        }
        let staked = session.add_staked(amount);
        self.render_staked(staked);
        self.notify(
            format!("Successfully staked {} XMRT", format_amount(amount)),
            Severity::Success,
        );
        Ok(())
    }

    async fn unstake_tokens(&self, session: &Session) -> Result<(), SessionError> {
        let from = self.require_connected(session)?;
        let amount = self.prompt_amount("Enter amount to unstake (XMRT):")?;
        let generation = session.generation();

        self.submit(TransactionKind::Unstake, from, None, format_amount(amount))
            .await
            .map_err(|err| SessionError::external("Unstaking failed", err))?;

        if !self.still_current(session, generation, TransactionKind::Unstake) {
            return Ok(());
        }
        let staked = session.remove_staked(amount);
        self.render_staked(staked);
        self.notify(
            format!("Successfully unstaked {} XMRT", format_amount(amount)),
            Severity::Success,
        );
        Ok(())
    }

    async fn load_transactions(&self, session: &Session) -> Result<(), SessionError> {
        let address = session.account_address().ok_or(SessionError::NotConnected)?;

        let records = self
            .backends
            .feed
            .recent_transactions(&address, self.clock.now_epoch_ms())
            .await
            .map_err(|err| SessionError::external("Failed to load transactions", err))?;

        self.view.render_transactions(&records);
        self.notify("Transactions loaded", Severity::Success);
        Ok(())
    }

    async fn deploy_contract(&self, session: &Session) -> Result<(), SessionError> {
        let from = self.require_connected(session)?;
        let generation = session.generation();

        let receipt = self
            .submit(TransactionKind::Deploy, from, None, "XMRT Contract".to_owned())
            .await
            .map_err(|err| SessionError::external("Contract deployment failed", err))?;
        let address = receipt.contract_address.ok_or_else(|| {
            SessionError::external(
                "Contract deployment failed",
                anyhow!("transaction {} returned no contract address", receipt.tx_hash),
            )
        })?;

        if !self.still_current(session, generation, TransactionKind::Deploy) {
            return Ok(());
        }
        session.set_contract_address(address.clone());
        self.notify(format!("Contract deployed at: {address}"), Severity::Success);
        Ok(())
    }

    async fn call_contract(&self, session: &Session) -> Result<(), SessionError> {
        let from = self.require_connected(session)?;
        let contract = session.contract_address().ok_or(SessionError::NotDeployed)?;

        self.submit(TransactionKind::Call, from, Some(contract), "get_balance".to_owned())
            .await
            .map_err(|err| SessionError::external("Contract call failed", err))?;

        self.notify("Contract call successful", Severity::Success);
        Ok(())
    }

    async fn submit(
        &self,
        kind: TransactionKind,
        from: WalletAddress,
        target: Option<ContractAddress>,
        payload: String,
    ) -> anyhow::Result<TransactionReceipt> {
        let receipt = self
            .backends
            .submitter
            .submit_transaction(SubmitTxRequest {
                kind,
                from,
                target,
                payload,
            })
            .await?;
        info!("{} transaction {} {}", kind, receipt.tx_hash, receipt.status);
        Ok(receipt)
    }

    /// False when the wallet was disconnected or replaced while `kind` was
    /// in flight; its result must not land in the new session.
    fn still_current(&self, session: &Session, generation: u64, kind: TransactionKind) -> bool {
        if session.generation() == generation {
            return true;
        }
        warn!("{} finished after the wallet session changed, result discarded", kind);
        false
    }

    fn require_connected(&self, session: &Session) -> Result<WalletAddress, SessionError> {
        match session.connection_state() {
            ConnectionState::Connected => session.account_address().ok_or(SessionError::NotConnected),
            _ => Err(SessionError::NotConnected),
        }
    }

    fn prompt_amount(&self, message: &str) -> Result<f64, SessionError> {
        let input = self.view.prompt(message).ok_or(SessionError::InvalidAmount)?;
        parse_amount(&input)
    }

    fn render_status(&self, session: &Session) {
        let (text, class) = match session.connection_state() {
            ConnectionState::Connected => ("Connected", "status connected"),
            ConnectionState::Connecting => ("Connecting...", "status connecting"),
            ConnectionState::Disconnected => ("Not Connected", "status disconnected"),
        };
        let connected = session.is_connected();

        self.view.set_text(ElementId::WalletStatus, text);
        self.view.set_class(ElementId::WalletStatus, class);
        self.view.set_visible(ElementId::WalletAddress, connected);
        self.view.set_visible(ElementId::ConnectWallet, !connected);
        self.view.set_visible(ElementId::DisconnectWallet, connected);
        if !connected {
            self.view.set_text(ElementId::WalletAddress, "");
        }
    }

    fn render_cleared_balances(&self) {
        let eth = format_units(0, NATIVE_DECIMALS, BALANCE_PLACES);
        self.view.set_text(ElementId::Balance, &format!("{eth} ETH"));
        self.view.set_text(
            ElementId::XmrtBalance,
            &format!("0 {}", self.backends.ledger.symbol()),
        );
        self.render_staked(0.0);
    }

    fn render_staked(&self, staked: f64) {
        self.view.set_text(
            ElementId::StakedAmount,
            &format!("{} XMRT", format_amount(staked)),
        );
    }

    fn report(&self, err: &SessionError) {
        warn!("{}", err);
        self.notify(err.to_string(), err.severity());
    }

    fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = self
            .notifications
            .push(message, severity, self.clock.now_epoch_ms());
        debug!(severity = severity.as_str(), "{}", notification.message);
        self.view.notify(&notification);
    }
}

//! In-memory view and backends for controller tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use xmrt_api_types::{
    ConnectOptions, ContractAddress, Notification, Severity, TransactionKind, TransactionReceipt,
    TransactionRecord, WalletAddress, WalletId,
};
use xmrt_chain_client::{
    BalanceResult, ChainProvider, SubmitTxRequest, TokenLedger, TransactionFeed,
    TransactionSubmitter, WalletAccount, WalletConnector, WalletHandle,
};
use xmrt_storage::InMemorySessionStore;

use crate::clock::Clock;
use crate::command::{Command, Dispatch};
use crate::config::DashboardConfig;
use crate::controller::{Backends, SessionController};
use crate::session::Session;
use crate::view::{ElementId, View};

pub(crate) const TEST_ADDRESS: &str = "0xABCDEF1234567890";

#[derive(Default)]
pub(crate) struct RecordingView {
    texts: RefCell<HashMap<ElementId, String>>,
    labels: RefCell<HashMap<ElementId, String>>,
    disabled: RefCell<HashMap<ElementId, bool>>,
    visible: RefCell<HashMap<ElementId, bool>>,
    classes: RefCell<HashMap<ElementId, String>>,
    transactions: RefCell<Option<Vec<TransactionRecord>>>,
    notifications: RefCell<Vec<Notification>>,
    prompts: RefCell<VecDeque<Option<String>>>,
    pub prompt_count: Cell<usize>,
    pub render_count: Cell<usize>,
}

impl RecordingView {
    pub fn text(&self, id: ElementId) -> Option<String> {
        self.texts.borrow().get(&id).cloned()
    }

    pub fn label(&self, id: ElementId) -> Option<String> {
        self.labels.borrow().get(&id).cloned()
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.disabled.borrow().get(&id).copied().unwrap_or(false)
    }

    pub fn is_visible(&self, id: ElementId) -> Option<bool> {
        self.visible.borrow().get(&id).copied()
    }

    pub fn class(&self, id: ElementId) -> Option<String> {
        self.classes.borrow().get(&id).cloned()
    }

    pub fn transactions(&self) -> Option<Vec<TransactionRecord>> {
        self.transactions.borrow().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn notifications_with(&self, severity: Severity) -> Vec<Notification> {
        self.notifications
            .borrow()
            .iter()
            .filter(|n| n.severity == severity)
            .cloned()
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn clear_notifications(&self) {
        self.notifications.borrow_mut().clear();
    }

    /// `None` answers the next prompt as if the user cancelled it.
    pub fn queue_prompt(&self, answer: Option<&str>) {
        self.prompts
            .borrow_mut()
            .push_back(answer.map(str::to_owned));
    }
}

impl View for RecordingView {
    fn set_text(&self, id: ElementId, text: &str) {
        self.texts.borrow_mut().insert(id, text.to_owned());
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        self.visible.borrow_mut().insert(id, visible);
    }

    fn set_disabled(&self, id: ElementId, disabled: bool) {
        self.disabled.borrow_mut().insert(id, disabled);
    }

    fn set_label(&self, id: ElementId, label: &str) {
        self.labels.borrow_mut().insert(id, label.to_owned());
    }

    fn set_class(&self, id: ElementId, class: &str) {
        self.classes.borrow_mut().insert(id, class.to_owned());
    }

    fn render_transactions(&self, records: &[TransactionRecord]) {
        self.render_count.set(self.render_count.get() + 1);
        *self.transactions.borrow_mut() = Some(records.to_vec());
    }

    fn notify(&self, notification: &Notification) {
        self.notifications.borrow_mut().push(notification.clone());
    }

    fn prompt(&self, _message: &str) -> Option<String> {
        self.prompt_count.set(self.prompt_count.get() + 1);
        self.prompts.borrow_mut().pop_front().flatten()
    }
}

/// Yields once per connect so a test can observe the `Connecting` state.
pub(crate) struct FakeConnector {
    pub fail_connect: Cell<bool>,
    pub fail_disconnect: Cell<bool>,
    pub report_connected: Cell<bool>,
    pub connects: Cell<usize>,
    pub disconnects: Cell<usize>,
    pub options: RefCell<Vec<ConnectOptions>>,
}

impl Default for FakeConnector {
    fn default() -> Self {
        Self {
            fail_connect: Cell::new(false),
            fail_disconnect: Cell::new(false),
            report_connected: Cell::new(true),
            connects: Cell::new(0),
            disconnects: Cell::new(0),
            options: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl WalletConnector for FakeConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<WalletHandle> {
        self.connects.set(self.connects.get() + 1);
        self.options.borrow_mut().push(options.clone());
        tokio::task::yield_now().await;

        if self.fail_connect.get() {
            bail!("User rejected request");
        }
        Ok(WalletHandle {
            id: WalletId("argentX".to_owned()),
            is_connected: self.report_connected.get(),
            account: WalletAccount {
                address: WalletAddress(TEST_ADDRESS.to_owned()),
            },
        })
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnects.set(self.disconnects.get() + 1);
        if self.fail_disconnect.get() {
            bail!("wallet extension unavailable");
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeProvider {
    pub fail: Cell<bool>,
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl ChainProvider for FakeProvider {
    fn network(&self) -> &str {
        "mainnet-alpha"
    }

    async fn get_balance(&self, wallet_address: &WalletAddress) -> Result<BalanceResult> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            bail!("rpc node unreachable");
        }
        Ok(BalanceResult {
            wallet_address: wallet_address.clone(),
            network: self.network().to_owned(),
            amount: 1_234_500_000_000_000_000,
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeLedger {
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl TokenLedger for FakeLedger {
    fn symbol(&self) -> &str {
        "XMRT"
    }

    async fn token_balance(&self, _wallet_address: &WalletAddress) -> Result<u64> {
        self.calls.set(self.calls.get() + 1);
        Ok(420)
    }
}

#[derive(Default)]
pub(crate) struct FakeFeed {
    pub fail: Cell<bool>,
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl TransactionFeed for FakeFeed {
    async fn recent_transactions(
        &self,
        _wallet_address: &WalletAddress,
        now_epoch_ms: u64,
    ) -> Result<Vec<TransactionRecord>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            bail!("indexer timed out");
        }
        Ok(vec![
            TransactionRecord {
                kind: TransactionKind::Stake,
                amount: "100 XMRT".to_owned(),
                hash: "0x123...abc".to_owned(),
                timestamp_epoch_ms: now_epoch_ms,
            },
            TransactionRecord {
                kind: TransactionKind::Reward,
                amount: "+5 XMRT".to_owned(),
                hash: "0x456...def".to_owned(),
                timestamp_epoch_ms: now_epoch_ms - 86_400_000,
            },
        ])
    }
}

/// Yields once per submission so concurrent dispatches interleave.
#[derive(Default)]
pub(crate) struct FakeSubmitter {
    pub fail: Cell<bool>,
    pub calls: Cell<usize>,
    pub requests: RefCell<Vec<SubmitTxRequest>>,
}

#[async_trait(?Send)]
impl TransactionSubmitter for FakeSubmitter {
    async fn submit_transaction(&self, req: SubmitTxRequest) -> Result<TransactionReceipt> {
        self.calls.set(self.calls.get() + 1);
        let n = self.calls.get();
        let kind = req.kind;
        self.requests.borrow_mut().push(req);
        tokio::task::yield_now().await;

        if self.fail.get() {
            bail!("Transaction failed due to network error");
        }
        let contract_address = (kind == TransactionKind::Deploy)
            .then(|| ContractAddress(format!("0x{n:040x}")));
        Ok(TransactionReceipt {
            tx_hash: format!("0x{n:064x}"),
            status: "ACCEPTED_ON_L2".to_owned(),
            contract_address,
        })
    }
}

pub(crate) struct FixedClock(Cell<u64>);

impl FixedClock {
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    pub fn set(&self, now_epoch_ms: u64) {
        self.0.set(now_epoch_ms);
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> u64 {
        self.0.get()
    }
}

pub(crate) struct Harness {
    pub view: Rc<RecordingView>,
    pub connector: Rc<FakeConnector>,
    pub provider: Rc<FakeProvider>,
    pub ledger: Rc<FakeLedger>,
    pub feed: Rc<FakeFeed>,
    pub submitter: Rc<FakeSubmitter>,
    pub store: Rc<InMemorySessionStore>,
    pub clock: Rc<FixedClock>,
    pub controller: SessionController,
    pub session: Session,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(InMemorySessionStore::default())
    }

    pub fn with_store(store: InMemorySessionStore) -> Self {
        let view = Rc::new(RecordingView::default());
        let connector = Rc::new(FakeConnector::default());
        let provider = Rc::new(FakeProvider::default());
        let ledger = Rc::new(FakeLedger::default());
        let feed = Rc::new(FakeFeed::default());
        let submitter = Rc::new(FakeSubmitter::default());
        let store = Rc::new(store);
        let clock = Rc::new(FixedClock(Cell::new(1_700_000_000_000)));

        let backends = Backends {
            connector: connector.clone(),
            provider: provider.clone(),
            ledger: ledger.clone(),
            feed: feed.clone(),
            submitter: submitter.clone(),
            store: store.clone(),
        };
        let controller = SessionController::new(DashboardConfig::default(), backends, view.clone())
            .with_clock(clock.clone());

        Self {
            view,
            connector,
            provider,
            ledger,
            feed,
            submitter,
            store,
            clock,
            controller,
            session: Session::new(),
        }
    }

    /// Connected, with the connect notifications already cleared from the view.
    pub async fn connected() -> Self {
        let harness = Self::new();
        assert_eq!(harness.run(Command::Connect).await, Dispatch::Completed);
        harness.view.clear_notifications();
        harness
    }

    pub async fn run(&self, command: Command) -> Dispatch {
        self.controller.dispatch(&self.session, command).await
    }
}

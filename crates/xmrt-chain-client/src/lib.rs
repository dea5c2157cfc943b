//! Seams to the collaborators the dashboard does not own: the wallet
//! extension, the chain RPC node, and whatever signs and submits
//! transactions.
//!
//! The dashboard runs on a single-threaded event loop, so the traits are
//! declared `?Send` and implementations are free to hold JS handles.

use anyhow::Result;
use async_trait::async_trait;
use xmrt_api_types::{
    ConnectOptions, ContractAddress, TransactionKind, TransactionReceipt, TransactionRecord,
    WalletAddress, WalletId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    pub address: WalletAddress,
}

/// What the wallet connector hands back after the user picks a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletHandle {
    pub id: WalletId,
    pub is_connected: bool,
    pub account: WalletAccount,
}

#[async_trait(?Send)]
pub trait WalletConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<WalletHandle>;
    async fn disconnect(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResult {
    pub wallet_address: WalletAddress,
    pub network: String,
    /// Native balance in the smallest unit (wei).
    pub amount: u128,
}

#[async_trait(?Send)]
pub trait ChainProvider {
    fn network(&self) -> &str;
    async fn get_balance(&self, wallet_address: &WalletAddress) -> Result<BalanceResult>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTxRequest {
    pub kind: TransactionKind,
    pub from: WalletAddress,
    pub target: Option<ContractAddress>,
    pub payload: String,
}

/// Signs and submits a transaction.
///
/// Implementations resolve with a hash and status, or fail with an error
/// whose message is shown to the user as-is.
#[async_trait(?Send)]
pub trait TransactionSubmitter {
    async fn submit_transaction(&self, req: SubmitTxRequest) -> Result<TransactionReceipt>;
}

/// Project-token balance lookup.
#[async_trait(?Send)]
pub trait TokenLedger {
    fn symbol(&self) -> &str;
    async fn token_balance(&self, wallet_address: &WalletAddress) -> Result<u64>;
}

#[async_trait(?Send)]
pub trait TransactionFeed {
    /// Newest first.
    async fn recent_transactions(
        &self,
        wallet_address: &WalletAddress,
        now_epoch_ms: u64,
    ) -> Result<Vec<TransactionRecord>>;
}

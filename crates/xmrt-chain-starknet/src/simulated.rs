//! Stand-ins for the contract calls the dashboard does not make yet.
//!
//! `SimulatedSubmitter` is the only place transactions are "sent". A real
//! signed-call implementation replaces it behind `TransactionSubmitter`
//! without touching the controller.

use anyhow::{Result, bail};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::time::Duration;
use tracing::debug;
use xmrt_api_types::{
    ContractAddress, TransactionKind, TransactionReceipt, TransactionRecord, WalletAddress,
};
use xmrt_chain_client::{SubmitTxRequest, TokenLedger, TransactionFeed, TransactionSubmitter};

pub const SIMULATED_LATENCY: Duration = Duration::from_millis(2000);
pub const SIMULATED_FAILURE_RATE: f64 = 0.1;
pub const ACCEPTED_ON_L2: &str = "ACCEPTED_ON_L2";
pub const NETWORK_ERROR: &str = "Transaction failed due to network error";

const DAY_MS: u64 = 86_400_000;

/// Timer used to model network round-trips.
#[async_trait(?Send)]
pub trait Delay {
    async fn wait(&self, duration: Duration);
}

#[cfg(feature = "tokio-delay")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[cfg(feature = "tokio-delay")]
#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct SimulatedSubmitter<D> {
    delay: D,
    latency: Duration,
    failure_rate: f64,
    rng: RefCell<StdRng>,
}

impl<D: Delay> SimulatedSubmitter<D> {
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            latency: SIMULATED_LATENCY,
            failure_rate: SIMULATED_FAILURE_RATE,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Clamped to `[0, 1]`; NaN disables failures.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.borrow_mut() = StdRng::seed_from_u64(seed);
        self
    }
}

#[async_trait(?Send)]
impl<D: Delay> TransactionSubmitter for SimulatedSubmitter<D> {
    async fn submit_transaction(&self, req: SubmitTxRequest) -> Result<TransactionReceipt> {
        self.delay.wait(self.latency).await;

        let (failed, nonce) = {
            let mut rng = self.rng.borrow_mut();
            (rng.gen_bool(self.failure_rate), rng.next_u64())
        };
        if failed {
            debug!("simulated {} transaction dropped", req.kind);
            bail!(NETWORK_ERROR);
        }

        let target = req.target.as_ref().map(|t| t.0.as_str()).unwrap_or_default();
        let payload = format!(
            "{}:{}:{}:{}:{}",
            req.kind, req.from.0, target, req.payload, nonce
        );
        let tx_hash = format!("0x{}", hex_lower(&Sha256::digest(payload.as_bytes())));

        let contract_address = (req.kind == TransactionKind::Deploy).then(|| {
            let digest = Sha256::digest(format!("deploy:{tx_hash}").as_bytes());
            ContractAddress(format!("0x{}", hex_lower(&digest[..20])))
        });

        debug!("simulated {} transaction {}: {}", req.kind, tx_hash, req.payload);

        Ok(TransactionReceipt {
            tx_hash,
            status: ACCEPTED_ON_L2.to_owned(),
            contract_address,
        })
    }
}

/// XMRT balance until the token contract is wired in: a random whole
/// amount below 1000.
pub struct SimulatedTokenLedger {
    rng: RefCell<StdRng>,
}

impl Default for SimulatedTokenLedger {
    fn default() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }
}

impl SimulatedTokenLedger {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait(?Send)]
impl TokenLedger for SimulatedTokenLedger {
    fn symbol(&self) -> &str {
        "XMRT"
    }

    async fn token_balance(&self, _wallet_address: &WalletAddress) -> Result<u64> {
        Ok(self.rng.borrow_mut().gen_range(0..1000))
    }
}

/// Reference history: a stake, a reward a day later, an unstake the day
/// after that.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedTransactionFeed;

#[async_trait(?Send)]
impl TransactionFeed for FixedTransactionFeed {
    async fn recent_transactions(
        &self,
        _wallet_address: &WalletAddress,
        now_epoch_ms: u64,
    ) -> Result<Vec<TransactionRecord>> {
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
                timestamp_epoch_ms: now_epoch_ms.saturating_sub(DAY_MS),
            },
            TransactionRecord {
                kind: TransactionKind::Unstake,
                amount: "50 XMRT".to_owned(),
                hash: "0x789...ghi".to_owned(),
                timestamp_epoch_ms: now_epoch_ms.saturating_sub(2 * DAY_MS),
            },
        ])
    }
}

fn hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use xmrt_api_types::WalletAddress;
use xmrt_chain_client::{BalanceResult, ChainProvider};

pub mod simulated;

pub use simulated::{
    ACCEPTED_ON_L2, Delay, FixedTransactionFeed, NETWORK_ERROR, SIMULATED_FAILURE_RATE,
    SIMULATED_LATENCY, SimulatedSubmitter, SimulatedTokenLedger,
};
#[cfg(feature = "tokio-delay")]
pub use simulated::TokioDelay;

pub const MAINNET_ALPHA: &str = "mainnet-alpha";
pub const SEPOLIA_ALPHA: &str = "sepolia-alpha";

/// ERC-20 ETH contract, identical on mainnet and sepolia.
pub const ETH_TOKEN_ADDRESS: &str =
    "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";

/// `starknet_keccak("balanceOf")`
const BALANCE_OF_SELECTOR: &str =
    "0x2e4263afad30923c891518314c3c95dbe830a16874e8abc5777a9a20b54c76e";

pub fn default_endpoint(network: &str) -> &'static str {
    match network {
        SEPOLIA_ALPHA | "goerli-alpha" => "https://starknet-sepolia.public.blastapi.io/rpc/v0_7",
        _ => "https://starknet-mainnet.public.blastapi.io/rpc/v0_7",
    }
}

/// JSON-RPC balance provider for a Starknet full node.
///
/// Reads `XMRT_STARKNET_RPC_URL` from environment at construction time when
/// no endpoint is given, and otherwise falls back to a public node for the
/// selected network.
pub struct StarknetRpcProvider {
    endpoint: String,
    network: String,
    token_address: String,
    http: reqwest::Client,
}

impl Default for StarknetRpcProvider {
    fn default() -> Self {
        Self::new(None, MAINNET_ALPHA)
    }
}

impl StarknetRpcProvider {
    pub fn new(endpoint: Option<String>, network: &str) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("XMRT_STARKNET_RPC_URL").ok())
            .unwrap_or_else(|| default_endpoint(network).to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            network: network.to_owned(),
            token_address: ETH_TOKEN_ADDRESS.to_owned(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token_address(mut self, token_address: impl Into<String>) -> Self {
        self.token_address = token_address.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// ── Starknet JSON-RPC types ─────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: CallParams<'a>,
}

#[derive(Debug, Serialize)]
struct CallParams<'a> {
    request: FunctionCall<'a>,
    block_id: &'static str,
}

#[derive(Debug, Serialize)]
struct FunctionCall<'a> {
    contract_address: &'a str,
    entry_point_selector: &'static str,
    calldata: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Vec<String>>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[async_trait(?Send)]
impl ChainProvider for StarknetRpcProvider {
    fn network(&self) -> &str {
        &self.network
    }

    async fn get_balance(&self, wallet_address: &WalletAddress) -> Result<BalanceResult> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "starknet_call",
            params: CallParams {
                request: FunctionCall {
                    contract_address: &self.token_address,
                    entry_point_selector: BALANCE_OF_SELECTOR,
                    calldata: vec![wallet_address.0.as_str()],
                },
                block_id: "latest",
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("starknet get_balance transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("starknet get_balance HTTP {status}: {text}");
        }

        let body: RpcResponse = response
            .json()
            .await
            .context("starknet get_balance parse")?;

        let amount = balance_from_response(body)?;
        Ok(BalanceResult {
            wallet_address: wallet_address.clone(),
            network: self.network.clone(),
            amount,
        })
    }
}

fn balance_from_response(body: RpcResponse) -> Result<u128> {
    if let Some(err) = body.error {
        warn!("starknet rpc error {}: {}", err.code, err.message);
        bail!("starknet rpc error {}: {}", err.code, err.message);
    }
    let words = body.result.context("starknet rpc response has no result")?;
    decode_uint256(&words)
}

/// Uint256 comes back as `[low, high]` felts.
fn decode_uint256(words: &[String]) -> Result<u128> {
    let [low, high] = words else {
        bail!("expected Uint256 as two felts, got {}", words.len());
    };
    if parse_felt(high)? != 0 {
        bail!("balance does not fit in 128 bits");
    }
    parse_felt(low)
}

fn parse_felt(raw: &str) -> Result<u128> {
    let digits = raw.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).with_context(|| format!("invalid felt '{raw}'"))
}

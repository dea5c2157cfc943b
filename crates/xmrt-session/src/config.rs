use serde::{Deserialize, Serialize};
use tracing::warn;
use xmrt_api_types::{ConnectOptions, ModalMode};

use crate::notify::NOTIFICATION_TTL_MS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub network: String,
    /// `None` lets the provider pick a public node for `network`.
    pub rpc_url: Option<String>,
    pub modal_theme: String,
    pub simulated_latency_ms: u64,
    pub failure_rate: f64,
    pub notification_ttl_ms: u64,
    pub eth_token_address: String,
    /// `tracing` filter directive, e.g. `info` or `xmrt_session=debug`.
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            network: "mainnet-alpha".to_owned(),
            rpc_url: None,
            modal_theme: "light".to_owned(),
            simulated_latency_ms: 2_000,
            failure_rate: 0.1,
            notification_ttl_ms: NOTIFICATION_TTL_MS,
            eth_token_address: "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
                .to_owned(),
            log_filter: "info".to_owned(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `XMRT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(network) = lookup("XMRT_NETWORK") {
            config.network = network;
        }
        if let Some(url) = lookup("XMRT_STARKNET_RPC_URL") {
            config.rpc_url = Some(url);
        }
        if let Some(theme) = lookup("XMRT_MODAL_THEME") {
            config.modal_theme = theme;
        }
        if let Some(address) = lookup("XMRT_ETH_TOKEN_ADDRESS") {
            config.eth_token_address = address;
        }
        if let Some(filter) = lookup("XMRT_LOG") {
            config.log_filter = filter;
        }
        if let Some(raw) = lookup("XMRT_SIMULATED_LATENCY_MS") {
            match raw.parse() {
                Ok(ms) => config.simulated_latency_ms = ms,
                Err(_) => warn!("ignoring non-numeric XMRT_SIMULATED_LATENCY_MS '{}'", raw),
            }
        }
        if let Some(raw) = lookup("XMRT_FAILURE_RATE") {
            match raw.parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => config.failure_rate = rate,
                _ => warn!("ignoring XMRT_FAILURE_RATE '{}', expected 0..=1", raw),
            }
        }
        if let Some(raw) = lookup("XMRT_NOTIFICATION_TTL_MS") {
            match raw.parse() {
                Ok(ms) => config.notification_ttl_ms = ms,
                Err(_) => warn!("ignoring non-numeric XMRT_NOTIFICATION_TTL_MS '{}'", raw),
            }
        }

        config
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            modal_mode: ModalMode::AlwaysAsk,
            modal_theme: self.modal_theme.clone(),
        }
    }
}

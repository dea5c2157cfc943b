//! XMRT dashboard WASM frontend.
//!
//! Binds the dashboard page to `xmrt_session::SessionController`: the DOM
//! becomes the controller's `View`, get-starknet becomes its wallet, and
//! `localStorage` keeps the reconnect marker.

pub mod connector;
pub mod dom;
pub mod events;
pub mod logging;
pub mod platform;
pub mod storage;

use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use xmrt_chain_starknet::{
    FixedTransactionFeed, SimulatedSubmitter, SimulatedTokenLedger, StarknetRpcProvider,
};
use xmrt_session::{Backends, DashboardConfig, Dispatch, Session, SessionController};
use xmrt_storage::{NoopSessionStore, SessionStore};

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let config = load_config();
    logging::init(&config.log_filter);
    tracing::info!("starting dashboard on {}", config.network);

    let els = dom::Elements::bind()?;
    let view = Rc::new(dom::DomView::new(els.clone()));

    let backends = backends(&config);
    let controller = Rc::new(
        SessionController::new(config, backends, view).with_clock(Rc::new(platform::BrowserClock)),
    );
    let session = Rc::new(Session::new());

    events::bind_events(&els, &controller, &session)?;

    match controller.restore(&session).await {
        Some(Dispatch::Completed) => tracing::info!("restored previous wallet session"),
        Some(outcome) => tracing::info!("no existing connection restored: {:?}", outcome),
        None => {}
    }

    Ok(())
}

fn backends(config: &DashboardConfig) -> Backends {
    let provider = StarknetRpcProvider::new(config.rpc_url.clone(), &config.network)
        .with_token_address(config.eth_token_address.clone());
    let submitter = SimulatedSubmitter::new(platform::TimeoutDelay)
        .with_latency(Duration::from_millis(config.simulated_latency_ms))
        .with_failure_rate(config.failure_rate);

    let store: Rc<dyn SessionStore> = if storage::available() {
        Rc::new(storage::LocalStorageSessionStore)
    } else {
        tracing::warn!("localStorage unavailable, wallet will not be remembered");
        Rc::new(NoopSessionStore)
    };

    Backends {
        connector: Rc::new(connector::GetStarknetConnector),
        provider: Rc::new(provider),
        ledger: Rc::new(SimulatedTokenLedger::default()),
        feed: Rc::new(FixedTransactionFeed),
        submitter: Rc::new(submitter),
        store,
    }
}

/// Reads `window.XMRT_CONFIG` when the page sets one.
fn load_config() -> DashboardConfig {
    let Some(window) = web_sys::window() else {
        return DashboardConfig::default();
    };
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str("XMRT_CONFIG"))
        .unwrap_or(JsValue::UNDEFINED);
    if raw.is_undefined() || raw.is_null() {
        return DashboardConfig::default();
    }

    match serde_wasm_bindgen::from_value(raw) {
        Ok(config) => config,
        Err(e) => {
            gloo_console::warn!(format!("ignoring malformed XMRT_CONFIG: {e}"));
            DashboardConfig::default()
        }
    }
}

//! get-starknet wallet connector.
//!
//! Opens the wallet picker through the `get-starknet` package and reads the
//! returned wallet object field by field.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use xmrt_api_types::{ConnectOptions, WalletAddress, WalletId};
use xmrt_chain_client::{WalletAccount, WalletConnector, WalletHandle};

#[wasm_bindgen(module = "get-starknet")]
extern "C" {
    #[wasm_bindgen(catch, js_name = connect)]
    async fn starknet_connect(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = disconnect)]
    async fn starknet_disconnect(options: JsValue) -> Result<JsValue, JsValue>;
}

pub struct GetStarknetConnector;

#[async_trait(?Send)]
impl WalletConnector for GetStarknetConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<WalletHandle> {
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| anyhow!("invalid connect options: {e}"))?;
        let wallet = starknet_connect(options).await.map_err(js_error)?;
        if wallet.is_null() || wallet.is_undefined() {
            bail!("No wallet selected");
        }
        wallet_handle(&wallet)
    }

    async fn disconnect(&self) -> Result<()> {
        let options = js_sys::Object::new();
        Reflect::set(&options, &"clearLastWallet".into(), &JsValue::TRUE).map_err(js_error)?;
        starknet_disconnect(options.into()).await.map_err(js_error)?;
        Ok(())
    }
}

fn wallet_handle(wallet: &JsValue) -> Result<WalletHandle> {
    let id = string_field(wallet, "id").ok_or_else(|| anyhow!("wallet object has no id"))?;
    let is_connected = Reflect::get(wallet, &"isConnected".into())
        .map(|v| v.is_truthy())
        .unwrap_or(false);

    // Older wallets only expose the address on the account object.
    let address = string_field(wallet, "selectedAddress").or_else(|| {
        let account = Reflect::get(wallet, &"account".into()).ok()?;
        string_field(&account, "address")
    });
    let address = match (is_connected, address) {
        (_, Some(address)) => address,
        (false, None) => String::new(),
        (true, None) => bail!("wallet {id} connected without an account address"),
    };

    Ok(WalletHandle {
        id: WalletId(id),
        is_connected,
        account: WalletAccount {
            address: WalletAddress(address),
        },
    })
}

fn string_field(object: &JsValue, key: &str) -> Option<String> {
    Reflect::get(object, &JsValue::from_str(key))
        .ok()?
        .as_string()
        .filter(|s| !s.is_empty())
}

/// Prefers `Error.message`, which is what the wallet shows its user.
fn js_error(err: JsValue) -> anyhow::Error {
    let message = string_field(&err, "message")
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    anyhow!(message)
}

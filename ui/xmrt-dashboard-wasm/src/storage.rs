//! `localStorage`-backed session marker.
//!
//! The wallet id is stored as a plain string under the same key get-starknet
//! uses, so either side can read what the other wrote.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;
use xmrt_api_types::WalletId;
use xmrt_storage::{LAST_WALLET_KEY, SessionStore};

/// Whether the page can use `localStorage` at all (private modes may not).
pub fn available() -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .is_some()
}

pub struct LocalStorageSessionStore;

#[async_trait(?Send)]
impl SessionStore for LocalStorageSessionStore {
    async fn load_last_wallet(&self) -> Result<Option<WalletId>> {
        let value = LocalStorage::raw()
            .get_item(LAST_WALLET_KEY)
            .map_err(storage_error)?;
        Ok(value.filter(|v| !v.is_empty()).map(WalletId))
    }

    async fn save_last_wallet(&self, wallet_id: &WalletId) -> Result<()> {
        LocalStorage::raw()
            .set_item(LAST_WALLET_KEY, &wallet_id.0)
            .map_err(storage_error)
    }

    async fn clear_last_wallet(&self) -> Result<()> {
        LocalStorage::delete(LAST_WALLET_KEY);
        Ok(())
    }
}

fn storage_error(err: JsValue) -> anyhow::Error {
    anyhow!("localStorage: {err:?}")
}

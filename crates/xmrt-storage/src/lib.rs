use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use xmrt_api_types::WalletId;

/// Client-storage key holding the id of the last connected wallet.
pub const LAST_WALLET_KEY: &str = "starknet-last-wallet";

/// Durable client storage for the session marker.
///
/// Read at startup to decide whether to reconnect, written on connect,
/// deleted on disconnect.
#[async_trait(?Send)]
pub trait SessionStore {
    async fn load_last_wallet(&self) -> Result<Option<WalletId>>;
    async fn save_last_wallet(&self, wallet_id: &WalletId) -> Result<()>;
    async fn clear_last_wallet(&self) -> Result<()>;
}

#[derive(Default)]
pub struct NoopSessionStore;

#[async_trait(?Send)]
impl SessionStore for NoopSessionStore {
    async fn load_last_wallet(&self) -> Result<Option<WalletId>> {
        Ok(None)
    }

    async fn save_last_wallet(&self, _wallet_id: &WalletId) -> Result<()> {
        Ok(())
    }

    async fn clear_last_wallet(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn with_last_wallet(wallet_id: &WalletId) -> Self {
        let mut entries = HashMap::new();
        entries.insert(LAST_WALLET_KEY.to_owned(), wallet_id.0.clone());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait(?Send)]
impl SessionStore for InMemorySessionStore {
    async fn load_last_wallet(&self) -> Result<Option<WalletId>> {
        let guard = self.entries.read().await;
        Ok(guard.get(LAST_WALLET_KEY).cloned().map(WalletId))
    }

    async fn save_last_wallet(&self, wallet_id: &WalletId) -> Result<()> {
        let mut guard = self.entries.write().await;
        guard.insert(LAST_WALLET_KEY.to_owned(), wallet_id.0.clone());
        Ok(())
    }

    async fn clear_last_wallet(&self) -> Result<()> {
        let mut guard = self.entries.write().await;
        guard.remove(LAST_WALLET_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_wallet_roundtrip() -> Result<()> {
        let store = InMemorySessionStore::default();
        assert_eq!(store.load_last_wallet().await?, None);

        let wallet_id = WalletId("argentX".to_owned());
        store.save_last_wallet(&wallet_id).await?;
        assert_eq!(store.load_last_wallet().await?, Some(wallet_id));

        Ok(())
    }

    #[tokio::test]
    async fn clearing_twice_is_harmless() -> Result<()> {
        let store = InMemorySessionStore::with_last_wallet(&WalletId("braavos".to_owned()));

        store.clear_last_wallet().await?;
        store.clear_last_wallet().await?;

        assert_eq!(store.load_last_wallet().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn noop_store_never_remembers() -> Result<()> {
        let store = NoopSessionStore;
        store.save_last_wallet(&WalletId("argentX".to_owned())).await?;
        assert_eq!(store.load_last_wallet().await?, None);
        Ok(())
    }
}

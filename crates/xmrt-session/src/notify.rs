use std::cell::RefCell;
use xmrt_api_types::{Notification, Severity};

/// Default lifetime of a toast.
pub const NOTIFICATION_TTL_MS: u64 = 5_000;

/// Live notifications. Entries drop out once their expiry passes; nothing
/// else owns them.
pub struct NotificationCenter {
    ttl_ms: u64,
    live: RefCell<Vec<Notification>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL_MS)
    }
}

impl NotificationCenter {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            live: RefCell::new(Vec::new()),
        }
    }

    pub fn push(&self, message: impl Into<String>, severity: Severity, now_epoch_ms: u64) -> Notification {
        let notification = Notification::new(message, severity, now_epoch_ms, self.ttl_ms);
        let mut live = self.live.borrow_mut();
        live.retain(|n| !n.is_expired(now_epoch_ms));
        live.push(notification.clone());
        notification
    }

    /// Unexpired notifications, oldest first.
    pub fn live(&self, now_epoch_ms: u64) -> Vec<Notification> {
        let mut live = self.live.borrow_mut();
        live.retain(|n| !n.is_expired(now_epoch_ms));
        live.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_five_seconds() {
        let center = NotificationCenter::default();
        center.push("Wallet connected successfully!", Severity::Success, 1_000);
        center.push("Balance updated", Severity::Success, 3_000);

        assert_eq!(center.live(5_999).len(), 2);
        let remaining = center.live(6_000);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "Balance updated");
        assert!(center.live(8_000).is_empty());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractAddress(pub String);

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Stake,
    Unstake,
    Reward,
    Deploy,
    Call,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Stake => "stake",
            TransactionKind::Unstake => "unstake",
            TransactionKind::Reward => "reward",
            TransactionKind::Deploy => "deploy",
            TransactionKind::Call => "call",
        }
    }

    /// Title-cased name shown in the transaction list.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Stake => "Stake",
            TransactionKind::Unstake => "Unstake",
            TransactionKind::Reward => "Reward",
            TransactionKind::Deploy => "Deploy",
            TransactionKind::Call => "Call",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub amount: String,
    pub hash: String,
    pub timestamp_epoch_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub tx_hash: String,
    pub status: String,
    #[serde(default)]
    pub contract_address: Option<ContractAddress>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Toast background colour.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#48bb78",
            Severity::Error => "#f56565",
            Severity::Warning => "#ed8936",
            Severity::Info => "#4299e1",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at_epoch_ms: u64,
    pub expires_at_epoch_ms: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, now_epoch_ms: u64, ttl_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at_epoch_ms: now_epoch_ms,
            expires_at_epoch_ms: now_epoch_ms.saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self, now_epoch_ms: u64) -> bool {
        now_epoch_ms >= self.expires_at_epoch_ms
    }

    pub fn ttl_ms(&self) -> u64 {
        self.expires_at_epoch_ms - self.created_at_epoch_ms
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ModalMode {
    AlwaysAsk,
    CanAsk,
    NeverAsk,
}

/// Options handed to the wallet connector when opening the chooser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    pub modal_mode: ModalMode,
    pub modal_theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_use_connector_field_names() {
        let options = ConnectOptions {
            modal_mode: ModalMode::AlwaysAsk,
            modal_theme: "light".to_owned(),
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["modalMode"], "alwaysAsk");
        assert_eq!(value["modalTheme"], "light");
    }

    #[test]
    fn severity_names_match_serialized_form() {
        for severity in [Severity::Success, Severity::Error, Severity::Warning, Severity::Info] {
            assert_eq!(serde_json::to_value(severity).unwrap(), severity.as_str());
        }
    }

    #[test]
    fn notification_expires_after_ttl() {
        let notification = Notification::new("Balance updated", Severity::Success, 1_000, 5_000);
        assert!(!notification.is_expired(5_999));
        assert!(notification.is_expired(6_000));
        assert_eq!(notification.ttl_ms(), 5_000);
    }
}

//! The id contract between the controller and whatever renders it.
//!
//! Ids match the dashboard markup. A browser view resolves them with
//! `getElementById`; tests record the writes instead.

use xmrt_api_types::{Notification, TransactionRecord};

/// Label shown on a control while its command runs.
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    ConnectWallet,
    DisconnectWallet,
    RefreshBalance,
    StakeTokens,
    UnstakeTokens,
    LoadTransactions,
    DeployContract,
    CallContract,
    WalletStatus,
    WalletAddress,
    Balance,
    XmrtBalance,
    StakedAmount,
    TransactionList,
}

impl ElementId {
    pub const ALL: [ElementId; 14] = [
        ElementId::ConnectWallet,
        ElementId::DisconnectWallet,
        ElementId::RefreshBalance,
        ElementId::StakeTokens,
        ElementId::UnstakeTokens,
        ElementId::LoadTransactions,
        ElementId::DeployContract,
        ElementId::CallContract,
        ElementId::WalletStatus,
        ElementId::WalletAddress,
        ElementId::Balance,
        ElementId::XmrtBalance,
        ElementId::StakedAmount,
        ElementId::TransactionList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::ConnectWallet => "connect-wallet",
            ElementId::DisconnectWallet => "disconnect-wallet",
            ElementId::RefreshBalance => "refresh-balance",
            ElementId::StakeTokens => "stake-tokens",
            ElementId::UnstakeTokens => "unstake-tokens",
            ElementId::LoadTransactions => "load-transactions",
            ElementId::DeployContract => "deploy-contract",
            ElementId::CallContract => "call-contract",
            ElementId::WalletStatus => "wallet-status",
            ElementId::WalletAddress => "wallet-address",
            ElementId::Balance => "balance",
            ElementId::XmrtBalance => "xmrt-balance",
            ElementId::StakedAmount => "staked-amount",
            ElementId::TransactionList => "transaction-list",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|el| el.as_str() == id)
    }

    /// Resting label for buttons; `None` for display fields.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ElementId::ConnectWallet => Some("Connect Starknet Wallet"),
            ElementId::DisconnectWallet => Some("Disconnect"),
            ElementId::RefreshBalance => Some("Refresh Balance"),
            ElementId::StakeTokens => Some("Stake XMRT"),
            ElementId::UnstakeTokens => Some("Unstake XMRT"),
            ElementId::LoadTransactions => Some("Load Transactions"),
            ElementId::DeployContract => Some("Deploy Contract"),
            ElementId::CallContract => Some("Call Contract"),
            _ => None,
        }
    }
}

/// Rendering surface driven by the controller.
///
/// Methods take `&self`: views are shared handles onto a UI that lives
/// elsewhere (the DOM, a terminal, a test recorder).
pub trait View {
    fn set_text(&self, id: ElementId, text: &str);
    fn set_visible(&self, id: ElementId, visible: bool);
    fn set_disabled(&self, id: ElementId, disabled: bool);
    fn set_label(&self, id: ElementId, label: &str);
    fn set_class(&self, id: ElementId, class: &str);
    /// Replaces the whole list in one step.
    fn render_transactions(&self, records: &[TransactionRecord]);
    fn notify(&self, notification: &Notification);
    /// `None` when the user dismisses the prompt.
    fn prompt(&self, message: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip() {
        for id in ElementId::ALL {
            assert_eq!(ElementId::from_id(id.as_str()), Some(id));
        }
        assert_eq!(ElementId::from_id("unknown-button"), None);
    }

    #[test]
    fn only_buttons_have_labels() {
        assert_eq!(ElementId::StakeTokens.label(), Some("Stake XMRT"));
        assert_eq!(ElementId::StakedAmount.label(), None);
        assert_eq!(ElementId::TransactionList.label(), None);
    }
}

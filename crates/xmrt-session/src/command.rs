use crate::error::SessionError;
use crate::view::ElementId;

/// Every user-triggerable operation, one per control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Disconnect,
    RefreshBalance,
    Stake,
    Unstake,
    LoadTransactions,
    DeployContract,
    CallContract,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Connect,
        Command::Disconnect,
        Command::RefreshBalance,
        Command::Stake,
        Command::Unstake,
        Command::LoadTransactions,
        Command::DeployContract,
        Command::CallContract,
    ];

    pub fn control(&self) -> ElementId {
        match self {
            Command::Connect => ElementId::ConnectWallet,
            Command::Disconnect => ElementId::DisconnectWallet,
            Command::RefreshBalance => ElementId::RefreshBalance,
            Command::Stake => ElementId::StakeTokens,
            Command::Unstake => ElementId::UnstakeTokens,
            Command::LoadTransactions => ElementId::LoadTransactions,
            Command::DeployContract => ElementId::DeployContract,
            Command::CallContract => ElementId::CallContract,
        }
    }

    pub fn from_control_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.control().as_str() == id)
    }
}

/// What `SessionController::dispatch` did with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Completed,
    /// The command ran and its failure was reported to the user.
    Failed(SessionError),
    /// The control was still busy with a previous run.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_owns_a_distinct_button() {
        for cmd in Command::ALL {
            let control = cmd.control();
            assert!(control.label().is_some(), "{cmd:?} has no label");
            assert_eq!(Command::from_control_id(control.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_control_id("wallet-status"), None);
    }
}

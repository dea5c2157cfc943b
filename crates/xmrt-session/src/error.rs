use thiserror::Error;
use xmrt_api_types::Severity;

/// Why a command did not complete. `Display` is the notification text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please connect wallet first")]
    NotConnected,
    #[error("Wallet already connected")]
    AlreadyConnected,
    #[error("Please deploy contract first")]
    NotDeployed,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("{action}: {message}")]
    External {
        action: &'static str,
        message: String,
    },
}

impl SessionError {
    pub(crate) fn external(action: &'static str, err: anyhow::Error) -> Self {
        SessionError::External {
            action,
            message: format!("{err:#}"),
        }
    }

    /// Unmet preconditions warn; bad input and failed calls are errors.
    pub fn severity(&self) -> Severity {
        match self {
            SessionError::NotConnected
            | SessionError::AlreadyConnected
            | SessionError::NotDeployed => Severity::Warning,
            SessionError::InvalidAmount | SessionError::External { .. } => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_error_keeps_the_cause() {
        let err = SessionError::external(
            "Staking failed",
            anyhow::anyhow!("Transaction failed due to network error"),
        );
        assert_eq!(
            err.to_string(),
            "Staking failed: Transaction failed due to network error"
        );
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn missing_preconditions_are_warnings() {
        assert_eq!(SessionError::NotConnected.severity(), Severity::Warning);
        assert_eq!(SessionError::NotDeployed.severity(), Severity::Warning);
        assert_ne!(
            SessionError::NotConnected.to_string(),
            SessionError::NotDeployed.to_string()
        );
    }
}

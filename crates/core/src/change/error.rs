//! Change computation error types.

use coinchange_shared::AppError;
use thiserror::Error;

/// Errors that prevent a change request from being computed.
///
/// An amount that simply cannot be made is not an error, see
/// [`ChangeOutcome::Unreachable`](super::ChangeOutcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// Missing or malformed amount, or no usable denomination.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request would exceed a configured computation ceiling.
    #[error("Resource limit exceeded: {0}")]
    ResourceLimitExceeded(String),
}

impl From<ChangeError> for AppError {
    fn from(err: ChangeError) -> Self {
        match err {
            ChangeError::InvalidInput(msg) => Self::Validation(msg),
            ChangeError::ResourceLimitExceeded(msg) => Self::LimitExceeded(msg),
        }
    }
}

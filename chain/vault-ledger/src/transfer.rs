//! Outbound value transfer
//!
//! The payout step of a withdrawal is the ledger's only call into code it
//! does not control. Implementations may fail, and may call back into the
//! ledger on the same thread before returning.

use thiserror::Error;
use types::ids::AccountId;
use types::numeric::Amount;

/// Rejection reported by a transfer mechanism.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Mechanism that moves value out of custody to an account.
pub trait ValueTransfer: Send + Sync {
    /// Move `amount` to `to`. Returning an error aborts the withdrawal.
    fn transfer(&self, to: AccountId, amount: Amount) -> Result<(), TransferError>;
}

/// Transfer that settles immediately and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransfer;

impl ValueTransfer for DirectTransfer {
    fn transfer(&self, _to: AccountId, _amount: Amount) -> Result<(), TransferError> {
        Ok(())
    }
}

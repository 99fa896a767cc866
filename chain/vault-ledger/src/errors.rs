//! Ledger error types
//!
//! Every variant carries the numeric context a caller needs to correct and
//! resubmit the request (attempted vs. available/limit).

use thiserror::Error;
use types::numeric::Amount;

/// Errors returned by ledger operations.
///
/// A returned error always means the call left no trace: balances, held
/// assets, counters and the event log are exactly as they were before it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Capacity exceeded: attempted {attempted}, available {available}")]
    CapacityExceeded { attempted: Amount, available: Amount },

    #[error("Withdrawal limit exceeded: attempted {attempted}, limit {limit}")]
    LimitExceeded { attempted: Amount, limit: Amount },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Arithmetic overflow in activity counter")]
    Overflow,
}

/// A broken custody invariant found by
/// [`LedgerSnapshot::check_invariants`](crate::snapshot::LedgerSnapshot::check_invariants).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Balances sum to {balances_total} but held assets are {held_assets}")]
    HeldAssetsMismatch {
        balances_total: Amount,
        held_assets: Amount,
    },

    #[error("Committed assets {committed} exceed capacity {capacity}")]
    CapacityBreached { committed: Amount, capacity: Amount },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid ledger config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Capacity not representable in smallest units: {value}")]
    InvalidCapacity { value: String },
}

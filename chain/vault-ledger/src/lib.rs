//! Single-asset custodial vault ledger
//!
//! Holds a fungible balance contributed by many depositors, enforces a global
//! capacity and a per-operation withdrawal limit, and counts activity.
//!
//! # Modules
//! - `config`: Deploy-time configuration (capacity)
//! - `errors`: Ledger, invariant and config error types
//! - `events`: `Deposit` / `Withdrawal` notifications
//! - `transfer`: Outbound payout seam used by withdrawals
//! - `ledger`: The ledger itself: deposit, withdraw, queries
//! - `snapshot`: Serializable point-in-time view and invariant check
//!
//! # Version
//! v0.1.0

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod snapshot;
pub mod transfer;

pub use config::LedgerConfig;
pub use errors::LedgerError;
pub use ledger::{VaultLedger, WITHDRAWAL_LIMIT};

/// Ledger ABI version — frozen after release
pub const LEDGER_ABI_VERSION: &str = "1.0.0";

//! Ledger notifications
//!
//! Events are immutable records appended to the ledger's log after the
//! state change they describe. They are never retracted: a withdrawal whose
//! payout fails is rolled back before its event would have been written.

use serde::{Deserialize, Serialize};
use types::ids::AccountId;
use types::numeric::Amount;

/// Value credited to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub account_id: AccountId,
    pub amount: Amount,
    /// Account balance right after the credit
    pub new_balance: Amount,
}

/// Value paid out of an account.
///
/// Only emitted once the external transfer has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub account_id: AccountId,
    pub amount: Amount,
    /// Account balance right after the debit
    pub new_balance: Amount,
}

/// Enum wrapper for all ledger notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
}

impl LedgerEvent {
    pub fn account_id(&self) -> AccountId {
        match self {
            LedgerEvent::Deposit(e) => e.account_id,
            LedgerEvent::Withdrawal(e) => e.account_id,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            LedgerEvent::Deposit(e) => e.amount,
            LedgerEvent::Withdrawal(e) => e.amount,
        }
    }
}

/// A notification with its position in the ledger's log.
///
/// Sequence numbers start at 1 and are contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    pub sequence: u64,
    pub event: LedgerEvent,
}

//! Point-in-time ledger view
//!
//! A snapshot is what external monitors read: every aggregate figure plus
//! all balances, captured under the ledger lock so the figures agree.

use serde::{Deserialize, Serialize};
use types::ids::AccountId;
use types::numeric::Amount;

use crate::errors::InvariantViolation;

/// Balance of one account at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub balance: Amount,
}

/// Serializable view of the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub capacity: Amount,
    pub withdrawal_limit: Amount,
    pub held_assets: Amount,
    /// Non-zero only when taken from inside a withdrawal payout
    pub pending_outflow: Amount,
    pub available_capacity: Amount,
    pub total_deposits: u64,
    pub total_withdrawals: u64,
    pub event_count: u64,
    /// Sorted by account
    pub balances: Vec<AccountBalance>,
}

impl LedgerSnapshot {
    /// Sum of all account balances (saturating).
    pub fn balances_total(&self) -> Amount {
        self.balances
            .iter()
            .fold(0, |acc: Amount, entry| acc.saturating_add(entry.balance))
    }

    /// Verify the custody invariants:
    /// - balances sum to held assets
    /// - held assets (plus payouts in flight) never exceed capacity
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let balances_total = self.balances_total();
        if balances_total != self.held_assets {
            return Err(InvariantViolation::HeldAssetsMismatch {
                balances_total,
                held_assets: self.held_assets,
            });
        }

        let committed = self.held_assets.saturating_add(self.pending_outflow);
        if committed > self.capacity {
            return Err(InvariantViolation::CapacityBreached {
                committed,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(capacity: Amount, held: Amount, balances: &[Amount]) -> LedgerSnapshot {
        LedgerSnapshot {
            capacity,
            withdrawal_limit: types::numeric::UNIT,
            held_assets: held,
            pending_outflow: 0,
            available_capacity: capacity.saturating_sub(held),
            total_deposits: balances.len() as u64,
            total_withdrawals: 0,
            event_count: balances.len() as u64,
            balances: balances
                .iter()
                .map(|balance| AccountBalance {
                    account_id: AccountId::new(),
                    balance: *balance,
                })
                .collect(),
        }
    }

    #[test]
    fn test_consistent_snapshot() {
        let snapshot = snapshot_with(10, 9, &[4, 5]);
        assert_eq!(snapshot.balances_total(), 9);
        assert!(snapshot.check_invariants().is_ok());
    }

    #[test]
    fn test_held_assets_mismatch() {
        let snapshot = snapshot_with(10, 8, &[4, 5]);
        assert_eq!(
            snapshot.check_invariants(),
            Err(InvariantViolation::HeldAssetsMismatch {
                balances_total: 9,
                held_assets: 8
            })
        );
    }

    #[test]
    fn test_capacity_breached() {
        let snapshot = snapshot_with(5, 9, &[4, 5]);
        assert!(matches!(
            snapshot.check_invariants(),
            Err(InvariantViolation::CapacityBreached { committed: 9, capacity: 5 })
        ));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = snapshot_with(10, 9, &[4, 5]);
        let json = serde_json::to_string(&snapshot).unwrap();
        let deser: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deser);
    }
}

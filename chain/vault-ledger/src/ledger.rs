//! Vault Ledger — custody, deposits, withdrawals and activity counters
//!
//! Every state-changing operation runs inside a single critical section and
//! follows the same order:
//! 1. Validate
//! 2. Mutate owned state
//! 3. Call out (withdrawal payout only)
//! 4. Notify
//!
//! The lock is re-entrant: a payout running on the calling thread may call
//! back into the ledger and sees the already-debited state. Other threads
//! wait until the whole operation, payout included, has finished.

use parking_lot::ReentrantMutex;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::ids::AccountId;
use types::numeric::{Amount, UNIT};

use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::events::{Deposit, LedgerEvent, SequencedEvent, Withdrawal};
use crate::snapshot::{AccountBalance, LedgerSnapshot};
use crate::transfer::{DirectTransfer, TransferError, ValueTransfer};

/// Maximum amount a single withdrawal may move out (one whole unit).
pub const WITHDRAWAL_LIMIT: Amount = UNIT;

/// Mutable ledger state, only ever touched while the ledger lock is held.
#[derive(Debug, Default)]
struct LedgerState {
    /// Balances: account -> amount. Absent key reads as zero.
    balances: HashMap<AccountId, Amount>,
    /// Sum of all balances
    held_assets: Amount,
    /// Debited by a withdrawal whose payout has not returned yet
    pending_outflow: Amount,
    total_deposits: u64,
    total_withdrawals: u64,
    /// Emitted events log (append-only)
    events: Vec<SequencedEvent>,
}

impl LedgerState {
    fn balance_of(&self, account_id: &AccountId) -> Amount {
        self.balances.get(account_id).copied().unwrap_or(0)
    }

    /// Value still occupying capacity, including payouts in flight.
    fn committed_assets(&self) -> Amount {
        self.held_assets + self.pending_outflow
    }

    fn record(&mut self, event: LedgerEvent) -> u64 {
        let sequence = self.events.len() as u64 + 1;
        self.events.push(SequencedEvent { sequence, event });
        sequence
    }
}

/// Single-asset custodial ledger.
///
/// Holds value for many accounts under a fixed global capacity, caps every
/// withdrawal at [`WITHDRAWAL_LIMIT`], and counts successful operations.
/// Share it across threads behind an `Arc`; all methods take `&self`.
pub struct VaultLedger {
    config: LedgerConfig,
    state: ReentrantMutex<RefCell<LedgerState>>,
    transfer: Arc<dyn ValueTransfer>,
}

impl VaultLedger {
    /// Create a ledger that pays out through [`DirectTransfer`].
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_transfer(config, Arc::new(DirectTransfer))
    }

    /// Create a ledger that pays out through the given transfer mechanism.
    pub fn with_transfer(config: LedgerConfig, transfer: Arc<dyn ValueTransfer>) -> Self {
        info!(
            capacity = %config.capacity,
            withdrawal_limit = %WITHDRAWAL_LIMIT,
            "VaultLedger initialized"
        );

        Self {
            config,
            state: ReentrantMutex::new(RefCell::new(LedgerState::default())),
            transfer,
        }
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Credit `amount` to `account_id` and return the new balance.
    ///
    /// The amount is the value received with the call; receipt and credit
    /// happen together. Emits a `Deposit` event after the state change.
    pub fn deposit(&self, account_id: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();

        if amount == 0 {
            debug!(%account_id, "Deposit rejected: zero amount");
            return Err(LedgerError::ZeroAmount);
        }

        // Relative to holdings before this deposit
        let available = self.config.capacity.saturating_sub(state.committed_assets());
        if amount > available {
            debug!(
                %account_id,
                amount = %amount,
                available = %available,
                "Deposit rejected: capacity exceeded"
            );
            return Err(LedgerError::CapacityExceeded {
                attempted: amount,
                available,
            });
        }

        let total_deposits = state
            .total_deposits
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = state.balance_of(&account_id) + amount;

        state.balances.insert(account_id, new_balance);
        state.held_assets += amount;
        state.total_deposits = total_deposits;

        let sequence = state.record(LedgerEvent::Deposit(Deposit {
            account_id,
            amount,
            new_balance,
        }));

        debug!(
            %account_id,
            amount = %amount,
            new_balance = %new_balance,
            sequence,
            "Deposit credited"
        );
        Ok(new_balance)
    }

    // ───────────────────────── Withdrawal ─────────────────────────

    /// Debit `amount` from `account_id`, pay it out, and return the new balance.
    ///
    /// The debit and the withdrawal counter are committed before the payout
    /// runs, so a payout that re-enters the ledger cannot spend the same
    /// balance twice. If the payout fails or panics the debit is reversed and
    /// `TransferFailed` is returned; no event is emitted.
    pub fn withdraw(&self, account_id: AccountId, amount: Amount) -> Result<Amount, LedgerError> {
        let guard = self.state.lock();

        {
            let mut state = guard.borrow_mut();

            if amount == 0 {
                debug!(%account_id, "Withdrawal rejected: zero amount");
                return Err(LedgerError::ZeroAmount);
            }

            if amount > WITHDRAWAL_LIMIT {
                debug!(%account_id, amount = %amount, "Withdrawal rejected: over limit");
                return Err(LedgerError::LimitExceeded {
                    attempted: amount,
                    limit: WITHDRAWAL_LIMIT,
                });
            }

            let available = state.balance_of(&account_id);
            if amount > available {
                debug!(
                    %account_id,
                    amount = %amount,
                    available = %available,
                    "Withdrawal rejected: insufficient balance"
                );
                return Err(LedgerError::InsufficientBalance {
                    requested: amount,
                    available,
                });
            }

            let total_withdrawals = state
                .total_withdrawals
                .checked_add(1)
                .ok_or(LedgerError::Overflow)?;

            state.balances.insert(account_id, available - amount);
            state.held_assets -= amount;
            state.pending_outflow += amount;
            state.total_withdrawals = total_withdrawals;
        }

        // No borrow is held across the payout; it may call back into the ledger.
        // A panicking payout is treated as a rejected one.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.transfer.transfer(account_id, amount)
        }))
        .unwrap_or_else(|payload| Err(TransferError::new(panic_reason(payload.as_ref()))));

        let mut state = guard.borrow_mut();
        if let Err(err) = outcome {
            *state.balances.entry(account_id).or_insert(0) += amount;
            state.held_assets += amount;
            state.pending_outflow -= amount;
            state.total_withdrawals -= 1;

            warn!(
                %account_id,
                amount = %amount,
                reason = %err.reason,
                "Withdrawal payout failed, debit reversed"
            );
            return Err(LedgerError::TransferFailed { reason: err.reason });
        }

        state.pending_outflow -= amount;
        // Includes any nested withdrawal that completed during the payout
        let new_balance = state.balance_of(&account_id);
        let sequence = state.record(LedgerEvent::Withdrawal(Withdrawal {
            account_id,
            amount,
            new_balance,
        }));

        debug!(
            %account_id,
            amount = %amount,
            new_balance = %new_balance,
            sequence,
            "Withdrawal paid out"
        );
        Ok(new_balance)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Balance of an account; zero if it never deposited.
    pub fn get_balance(&self, account_id: &AccountId) -> Amount {
        self.read(|state| state.balance_of(account_id))
    }

    /// Number of successful deposits.
    pub fn total_deposits(&self) -> u64 {
        self.read(|state| state.total_deposits)
    }

    /// Number of successful withdrawals.
    pub fn total_withdrawals(&self) -> u64 {
        self.read(|state| state.total_withdrawals)
    }

    /// Total value currently credited to accounts.
    pub fn held_assets(&self) -> Amount {
        self.read(|state| state.held_assets)
    }

    /// Largest deposit the ledger would currently accept.
    pub fn available_capacity(&self) -> Amount {
        self.read(|state| self.config.capacity.saturating_sub(state.committed_assets()))
    }

    /// Number of accounts that have ever deposited.
    pub fn account_count(&self) -> usize {
        self.read(|state| state.balances.len())
    }

    pub fn capacity(&self) -> Amount {
        self.config.capacity
    }

    pub fn withdrawal_limit(&self) -> Amount {
        WITHDRAWAL_LIMIT
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> Vec<SequencedEvent> {
        self.read(|state| state.events.clone())
    }

    /// Events with a sequence number greater than `sequence`.
    ///
    /// Pass the last sequence already seen (or 0) to poll incrementally.
    pub fn events_since(&self, sequence: u64) -> Vec<SequencedEvent> {
        self.read(|state| {
            state
                .events
                .iter()
                .skip(usize::try_from(sequence).unwrap_or(usize::MAX))
                .cloned()
                .collect()
        })
    }

    // ───────────────────────── Snapshot ─────────────────────────

    /// Consistent point-in-time view of the whole ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read(|state| {
            let mut balances: Vec<AccountBalance> = state
                .balances
                .iter()
                .map(|(account_id, balance)| AccountBalance {
                    account_id: *account_id,
                    balance: *balance,
                })
                .collect();
            balances.sort_by_key(|entry| entry.account_id);

            LedgerSnapshot {
                capacity: self.config.capacity,
                withdrawal_limit: WITHDRAWAL_LIMIT,
                held_assets: state.held_assets,
                pending_outflow: state.pending_outflow,
                available_capacity: self
                    .config
                    .capacity
                    .saturating_sub(state.committed_assets()),
                total_deposits: state.total_deposits,
                total_withdrawals: state.total_withdrawals,
                event_count: state.events.len() as u64,
                balances,
            }
        })
    }

    fn read<R>(&self, f: impl FnOnce(&LedgerState) -> R) -> R {
        let guard = self.state.lock();
        let state = guard.borrow();
        f(&state)
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("payout panicked: {message}")
}

impl fmt::Debug for VaultLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultLedger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

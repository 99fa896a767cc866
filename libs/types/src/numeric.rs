//! Asset amounts
//!
//! The ledger does all arithmetic on unsigned integers in the asset's smallest
//! unit. `rust_decimal` is used only at the edges, where humans and config
//! files speak in whole units ("2.5") rather than smallest units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Quantity of the custodied asset, in smallest units.
pub type Amount = u128;

/// Number of decimal places between a whole unit and the smallest unit.
pub const UNIT_DECIMALS: u32 = 18;

/// Smallest units per whole unit (10^18).
pub const UNIT: Amount = 1_000_000_000_000_000_000;

/// Convert a smallest-unit amount into whole units.
///
/// Returns `None` when the amount is too large for `Decimal`'s 96-bit mantissa
/// (roughly 79 billion whole units).
pub fn to_whole_units(amount: Amount) -> Option<Decimal> {
    let mantissa = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, UNIT_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

/// Convert a whole-unit quantity into smallest units.
///
/// Rejects negative values and values carrying more precision than the
/// smallest unit can represent.
pub fn from_whole_units(value: Decimal) -> Option<Amount> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    let scaled = value.checked_mul(Decimal::from(UNIT as u64))?;
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.trunc().to_u128()
}

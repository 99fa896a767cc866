//! Ledger configuration
//!
//! Capacity is the only deploy-time parameter. The per-operation withdrawal
//! limit is the constant [`crate::ledger::WITHDRAWAL_LIMIT`], shared by every
//! ledger instance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::{from_whole_units, Amount};

use crate::errors::ConfigError;

/// Immutable ledger configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Maximum total value the ledger may hold, in smallest units
    pub capacity: Amount,
}

impl LedgerConfig {
    /// Create a config with a capacity in smallest units.
    pub fn new(capacity: Amount) -> Self {
        Self { capacity }
    }

    /// Create a config with a capacity in whole units (e.g. `10.5`).
    pub fn from_whole_units(capacity: Decimal) -> Result<Self, ConfigError> {
        let capacity = from_whole_units(capacity).ok_or_else(|| ConfigError::InvalidCapacity {
            value: capacity.to_string(),
        })?;
        Ok(Self { capacity })
    }

    /// Parse a config from JSON, e.g. `{"capacity": 10000000000000000000}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::UNIT;

    #[test]
    fn test_default_capacity_is_zero() {
        assert_eq!(LedgerConfig::default().capacity, 0);
    }

    #[test]
    fn test_from_whole_units() {
        let config = LedgerConfig::from_whole_units(Decimal::new(105, 1)).unwrap();
        assert_eq!(config.capacity, 10 * UNIT + UNIT / 2);
    }

    #[test]
    fn test_from_whole_units_negative() {
        let result = LedgerConfig::from_whole_units(Decimal::from(-3));
        assert!(matches!(result, Err(ConfigError::InvalidCapacity { .. })));
    }

    #[test]
    fn test_from_json() {
        let config = LedgerConfig::from_json(r#"{"capacity": 10000000000000000000}"#).unwrap();
        assert_eq!(config.capacity, 10 * UNIT);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = LedgerConfig::from_json(r#"{"capacity": -1}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip_large_capacity() {
        let config = LedgerConfig::new(u128::MAX);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LedgerConfig::from_json(&json).unwrap(), config);
    }
}

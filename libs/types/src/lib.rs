//! Types library for the vault ledger
//!
//! Shared, frozen type definitions used by the ledger contract and by any
//! collaborator (deployment tooling, monitors) that reads its state.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId)
//! - `numeric`: Asset amounts in smallest units and whole-unit conversion

pub mod ids;
pub mod numeric;

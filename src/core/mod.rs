//! Aggregation engine: pure per-month calculators plus the service layer that
//! feeds them from the entity store.

pub mod balance;
pub mod rollup;
pub mod services;

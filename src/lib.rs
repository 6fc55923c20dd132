#![doc(test(attr(deny(warnings))))]

//! Hearth Core provides the financial aggregation and allocation-consistency
//! engine behind a multi-tenant household budgeting application: allocation
//! validation, per-account balances, category rollups, monthly dashboard
//! snapshots, multi-month reports, and budget copy/template resolution.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Hearth Core tracing initialized.");
    });
}

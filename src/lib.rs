#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps a personal transaction and budget store and derives
//! filtered lists, category aggregates, reports, and budget progress from it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{EntityStore, FixedClock, PeriodSelector, SystemClock};
pub use crate::errors::{FinanceError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

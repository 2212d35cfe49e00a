#![doc(test(attr(deny(warnings))))]

//! Birth Prep Core keeps a birth preparedness plan (checklist, emergency
//! contacts and savings projection) and persists it to a key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{BirthPrepPlanner, PlanSummary};
pub use errors::{PlannerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Birth Prep Core tracing initialized.");
    });
}

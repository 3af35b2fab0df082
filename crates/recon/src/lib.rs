//! `gensettle-recon` — Settlement reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded carrier and fulfillment records,
//! returns the classified detail, rollups, and consistency report.
//! No CLI or file I/O dependencies.

pub mod aggregate;
pub mod checker;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod markers;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod rollup;

pub use config::RunConfig;
pub use engine::run;
pub use error::SettleError;
pub use markers::{CompiledMarkers, Markers};
pub use model::{RawCarrierRecord, RawFulfillmentRecord, SettleInput, SettleReport};

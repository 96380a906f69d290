//! Cross-module tests for the battle pipeline.
//!
//! - `determinism.rs`: same seed and inputs give identical results
//! - `integration.rs`: end-to-end battles and engagements
//! - `properties.rs`: proptest invariants over generated formations
//! - `helpers.rs`: formation builders and proptest strategies

mod helpers;
mod integration;

pub use helpers::*;

//! Crate-level scenario tests.
//!
//! - `integration.rs`: multi-tick runs of the agent against a scripted host
//! - `properties.rs`: property tests over histories, geometry and tracking
//! - `helpers.rs`: the scripted host and snapshot builders

mod helpers;

pub use helpers::*;

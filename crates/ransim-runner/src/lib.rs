//! Scenario loading and report formatting for the downlink simulator CLI.
//!
//! The engine in `ransim-core` has a purely programmatic contract; this
//! crate supplies the external collaborators around it: YAML scenario files,
//! command-line overrides, and console/JSON rendering of the final counters.

pub mod report;
pub mod scenario;

pub use report::Report;
pub use scenario::{load_scenario, ScenarioError};

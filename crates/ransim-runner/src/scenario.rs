//! Scenario files: YAML documents deserialized straight into the engine's
//! configuration type.

use ransim_core::SimulationConfig;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid scenario document.
    #[error("failed to parse scenario {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load a scenario file. The schema is exactly [`SimulationConfig`];
/// distribution parameters and semantic constraints are validated by the
/// engine when the simulation is constructed.
pub fn load_scenario(path: &Path) -> Result<SimulationConfig, ScenarioError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ScenarioError::Parse {
        path: path.display().to_string(),
        source,
    })
}

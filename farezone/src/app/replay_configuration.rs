use farezone_core::controller::{EngineConfig, TapMode};
use serde::{Deserialize, Serialize};

use super::FarezoneCliError;

/// defines the engine settings for a replay session
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ReplayConfiguration {
    pub engine: EngineConfig,
    /// what taps mean when the session starts
    pub initial_mode: TapMode,
}

impl TryFrom<&String> for ReplayConfiguration {
    type Error = FarezoneCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                FarezoneCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                FarezoneCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                FarezoneCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                FarezoneCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(FarezoneCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

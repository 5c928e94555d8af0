use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::{validate_target_rate, DEFAULT_TARGET_RATE};
use crate::error::{Error, Result};
use crate::topology::Topology;
use crate::types::FrameIndex;

/// How a capture is interpreted and replayed.
///
/// ```json
/// { "topology": "full", "target_rate": 60.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Joint layout the capture source writes.
    pub topology: Topology,
    /// Frames per second of replay.
    pub target_rate: f64,
    /// Cursor position before the first play.
    pub start_frame: FrameIndex,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            target_rate: DEFAULT_TARGET_RATE,
            start_frame: 0,
        }
    }
}

impl PlaybackConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlaybackConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        validate_target_rate(self.target_rate)
    }
}

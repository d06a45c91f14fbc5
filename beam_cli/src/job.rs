//! JSON job files: one beam, its loads, and optional analysis settings.
//!
//! ```json
//! {
//!   "beam": { "length": 6.0, "elastic_modulus": 200e9,
//!             "moment_of_inertia": 5e-5, "section_modulus": 5e-4 },
//!   "loads": [ { "type": "Point", "magnitude": 10000.0, "position": 3.0 } ],
//!   "settings": { "sample_points": 200 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use beam_core::{AnalysisSettings, Beam, Load};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading a job file
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid job file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A complete analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub beam: Beam,
    #[serde(default)]
    pub loads: Vec<Load>,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl Job {
    /// Parse a job from JSON text. Beam properties are validated here.
    pub fn from_json(text: &str) -> Result<Self, JobError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a job file.
    pub fn load(path: &Path) -> Result<Self, JobError> {
        let text = fs::read_to_string(path).map_err(|source| JobError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

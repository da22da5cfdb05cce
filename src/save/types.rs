//! Progress data types
//!
//! The game persists one small record between runs: whether the area was
//! ever beaten and the best score so far. Serde handles the JSON shape.

use serde::{Deserialize, Serialize};

/// Current progress file version
pub const CURRENT_PROGRESS_VERSION: u32 = 1;

/// The whole progress file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressData {
    pub version: u32,
    /// The area has been cleared at least once
    pub beaten: bool,
    pub best_score: u32,
    /// Local wall-clock time of the last write, human-readable
    pub saved_at: String,
}

impl Default for ProgressData {
    fn default() -> Self {
        ProgressData {
            version: CURRENT_PROGRESS_VERSION,
            beaten: false,
            best_score: 0,
            saved_at: String::new(),
        }
    }
}

/// Error types for progress save/load operations
#[derive(Debug)]
pub enum ProgressError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    InvalidVersion(u32),
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressError::IoError(e) => write!(f, "IO error: {}", e),
            ProgressError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            ProgressError::InvalidVersion(v) => write!(f, "Invalid progress version: {}", v),
        }
    }
}

impl std::error::Error for ProgressError {}

impl From<std::io::Error> for ProgressError {
    fn from(err: std::io::Error) -> Self {
        ProgressError::IoError(err)
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(err: serde_json::Error) -> Self {
        ProgressError::SerializationError(err)
    }
}

//! Error types for scene generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::numeric::Float;

/// Errors that can occur while loading a scenario, converting boxes
/// or writing constraints.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Box with `from >= to`, or an infinite or NaN bound, on some axis.
    #[error("Invalid bounds for box {index}: {axis} axis has from = {from}, to = {to} (expected finite from < to)")]
    InvalidBoxBounds {
        index: usize,
        axis: char,
        from: Float,
        to: Float,
    },

    /// Finite bounds whose face normal or offset overflows.
    #[error("Box {index} gives a non-finite constraint on face {face}: bounds are too large")]
    NonFiniteConstraint {
        index: usize,
        face: &'static str,
    },

    /// Output could not be opened, written, flushed or renamed.
    #[error("Failed to write constraints to {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read scenario {}: {source}", path.display())]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse scenario {}: {source}", path.display())]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Scenario parsed but does not describe a usable run.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::InvalidBoxBounds { index: 3, axis: 'x', from: 5.0, to: 5.0 };
        let msg = err.to_string();
        assert!(msg.contains("box 3"));
        assert!(msg.contains("x axis"));

        let err = SceneError::NonFiniteConstraint { index: 1, face: "H2" };
        assert!(err.to_string().contains("face H2"));

        let err = SceneError::InvalidScenario("no boxes".to_string());
        assert!(err.to_string().contains("Invalid scenario"));
    }
}

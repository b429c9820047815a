//! Error types for parsing and simulating robot missions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a mission or running robots.
#[derive(Debug, Error)]
pub enum Error {
    /// The first line does not hold two integers in `0..=50`.
    #[error("Invalid grid size on line 1: {value:?} ({reason})")]
    InvalidGridSize {
        /// The offending line.
        value: String,
        /// Why the line was rejected.
        reason: String,
    },

    /// A robot position line is not `<x> <y> <N|E|S|W>` or lies outside the grid.
    #[error("Invalid robot line {line}: {value:?} ({reason})")]
    InvalidRobotLine {
        /// 1-based line number in the input.
        line: usize,
        /// The offending line.
        value: String,
        /// Why the line was rejected.
        reason: String,
    },

    /// A command line holds a character other than `L`, `R` or `F`.
    #[error("Invalid command {command:?} on line {line}: {value:?}")]
    InvalidCommand {
        /// 1-based line number in the input.
        line: usize,
        /// The unrecognised character.
        command: char,
        /// The full command line.
        value: String,
    },

    /// A robot block is incomplete, e.g. a position line without commands.
    #[error("Malformed input on line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number where the block starts.
        line: usize,
        /// What is missing.
        reason: String,
    },

    /// A robot was handed to the engine with a start position outside the grid.
    #[error("Robot starts at {x} {y}, outside the grid {max_x} {max_y}")]
    StartOutsideGrid {
        /// Start x.
        x: usize,
        /// Start y.
        y: usize,
        /// Grid upper-right x.
        max_x: usize,
        /// Grid upper-right y.
        max_y: usize,
    },

    /// A robot was run before the engine was given a grid.
    #[error("Simulation has no grid! Initialize it with a grid size before running robots.")]
    EngineNotInitialized,

    /// Reading the mission failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed (`-` for stdin).
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the replay file failed.
    #[error("Failed to write replay to {path}: {source}")]
    ReplayWrite {
        /// The replay path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for mission operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_displaying_errors_the_offending_input_is_included() {
        let err = Error::InvalidGridSize {
            value: "51 3".to_string(),
            reason: "51 exceeds 50".to_string(),
        };
        assert!(err.to_string().contains("51 3"));

        let err = Error::InvalidCommand {
            line: 4,
            command: 'X',
            value: "FFX".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'X'"));
        assert!(message.contains("line 4"));
    }
}

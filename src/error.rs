//! Error types for the ttt-rl crate

use thiserror::Error;

/// Main error type for the ttt-rl crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is out of bounds (rows and columns must be 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("state key must have {expected} cells, got {got} in '{key}'")]
    InvalidKeyLength {
        expected: usize,
        got: usize,
        key: String,
    },

    #[error("invalid character '{character}' at position {position} in state key '{key}'")]
    InvalidKeyCharacter {
        character: char,
        position: usize,
        key: String,
    },

    #[error("{name} = {value} is outside the allowed range {range}")]
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}

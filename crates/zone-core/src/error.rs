//! Error types for the few fallible edges of the crate
//!
//! Grid access, maze generation and autotiling never fail. Errors only come
//! from loading configuration, decoding legacy wall codes and swapping in a
//! caller-built wall grid.

use thiserror::Error;

/// Errors raised while reading a maze configuration file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),

    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidValue { option: String, value: String },
}

/// A legacy integer wall code that maps to no [`WallState`](crate::WallState)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown wall code: {0}")]
pub struct WallCodeError(pub i8);

/// Errors raised by zone-level operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Wall grid is {got_width}x{got_height}, zone is {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },

    #[error("Grid of {width}x{height} cannot hold {cells} cells")]
    CellCount {
        width: usize,
        height: usize,
        cells: usize,
    },
}

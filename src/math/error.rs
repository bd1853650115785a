// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },
}

impl MathError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;

/// Löst einen (ggf. negativen) Index gegen eine Länge auf.
///
/// Negative Indizes zählen vom Ende, `-1` ist das letzte Element.
pub fn resolve_index(index: isize, len: usize) -> MathResult<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };

    if resolved < 0 || resolved as usize >= len {
        return Err(MathError::IndexOutOfRange { index, len });
    }
    Ok(resolved as usize)
}

// src/spectrogram/error.rs
//! Error type shared by the spectrogram core.

use std::fmt;

/// Errors raised by the spectrogram pipeline.
///
/// Every variant is local to the call that produced it: the pipeline state is
/// left exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrogramError {
    /// An incoming row does not match the buffer width (`bins`).
    InputSize { expected: usize, actual: usize },
    /// A frequency range request was malformed or out of bounds.
    InvalidRange {
        fmin: f64,
        fmax: f64,
        min: f64,
        max: f64,
    },
    /// The pipeline was disposed.
    Disposed,
    /// Options or arguments outside their valid domain.
    InvalidConfig(String),
    /// A shared pipeline lock was poisoned by a panicking holder.
    Poisoned,
}

impl fmt::Display for SpectrogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrogramError::InputSize { expected, actual } => {
                write!(f, "row has {} values, expected {}", actual, expected)
            }
            SpectrogramError::InvalidRange {
                fmin,
                fmax,
                min,
                max,
            } => write!(
                f,
                "invalid frequency range {}..{} Hz (bins {}..{})",
                fmin, fmax, min, max
            ),
            SpectrogramError::Disposed => write!(f, "spectrogram has been disposed"),
            SpectrogramError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            SpectrogramError::Poisoned => write!(f, "spectrogram lock poisoned"),
        }
    }
}

impl std::error::Error for SpectrogramError {}

/// Convenience alias for results produced by the spectrogram core.
pub type Result<T> = std::result::Result<T, SpectrogramError>;

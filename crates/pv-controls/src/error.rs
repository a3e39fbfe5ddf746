//! Error types for controller derivation and simulation.

use pv_core::CoreError;
use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while deriving or simulating controllers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A numeric parameter is outside its valid domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Excitation mode tag is not one of the supported variants.
    #[error("Invalid excitation mode '{tag}' (expected step, sinusoid or two_added_sines)")]
    InvalidMode { tag: String },

    /// Coefficients do not describe a causal recursive filter.
    #[error("Invalid transfer function: {what}")]
    InvalidTransferFunction { what: &'static str },

    /// A produced sequence does not line up with the canonical time vector.
    #[error("Simulation timebase mismatch in {what} at index {index}: {detail}")]
    TimebaseMismatch {
        what: &'static str,
        index: usize,
        detail: String,
    },
}

impl From<CoreError> for ControlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidParameter {
                name,
                value,
                reason,
            } => ControlError::InvalidParameter {
                name,
                value,
                reason,
            },
            CoreError::NonFinite { what, value } => ControlError::InvalidParameter {
                name: what,
                value,
                reason: "must be finite",
            },
        }
    }
}

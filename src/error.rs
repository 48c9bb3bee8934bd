//! Error types shared by the three simulation models.

use thiserror::Error;

/// Result type for simulation and scenario operations.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Errors reported by the simulation models and the scenario loader.
///
/// A failing computation returns no metrics; there is no partial result.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A parameter is out of range, zero where a divisor is needed, or
    /// otherwise unusable.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A computation produced NaN or infinity from degenerate input.
    /// Detected before any metric is returned, never propagated silently.
    #[error("computation produced a non-finite value for `{0}`")]
    NonFinite(&'static str),

    /// The scenario file is structurally wrong (e.g. no model table).
    #[error("scenario error: {0}")]
    Scenario(String),

    /// TOML parse error while loading a scenario.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error while loading a scenario or writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    /// Shorthand for the common invalid-parameter case.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that a parameter is a finite number, returning a validation
/// error otherwise. Used by every model at its ingestion boundary.
pub fn require_finite(name: &'static str, value: f64) -> SimulationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::invalid(name, "must be a finite number"))
    }
}

/// Checks that a parameter is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> SimulationResult<f64> {
    let value = require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(name, "must be greater than zero"))
    }
}

/// Checks that a parameter is finite and non-negative.
pub fn require_non_negative(name: &'static str, value: f64) -> SimulationResult<f64> {
    let value = require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::invalid(name, "must not be negative"))
    }
}

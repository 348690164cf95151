//! Simulation-specific error types.
//!
//! Almost every operation in the crate is total: spawning, stepping and
//! drawing cannot fail.  The two things that can go wrong are a body handle
//! that no longer resolves and a configuration value outside its safe range.
//!
//! ## Usage
//!
//! ```rust
//! use boxfall::error::{SimError, SimResult};
//!
//! fn check(dt: f32) -> SimResult<()> {
//!     boxfall::error::validate_positive("fixed_dt", dt)
//! }
//!
//! assert!(matches!(check(0.0), Err(SimError::InvalidConfig { .. })));
//! ```

use std::fmt;

/// Top-level error enum for the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A Rapier body handle was looked up but is not in the world any more.
    BodyNotFound {
        /// Human-readable description of where the lookup occurred.
        context: &'static str,
    },

    /// A configuration value is outside its accepted range.
    InvalidConfig {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::BodyNotFound { context } => {
                write!(f, "body not found during '{}'", context)
            }
            SimError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `[0.0, 1.0]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value,
            expected: "[0.0, 1.0]",
        })
    }
}

/// Returns an error unless `value` is at least `min`.
pub fn validate_at_least(
    name: &'static str,
    value: usize,
    min: usize,
    expected: &'static str,
) -> SimResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value: value as f32,
            expected,
        })
    }
}

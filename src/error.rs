//! Error types for the integration engine and body models.

use thiserror::Error;

/// Errors raised by coordinate transforms, body setters, dynamics and the driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A transform was asked for something undefined at a singular point,
    /// e.g. the angle of the origin or a polar velocity at `r = 0`.
    #[error("domain error: {0}")]
    Domain(String),

    /// A right-hand side returned a derivative of the wrong length.
    #[error("shape mismatch: expected {expected} components, got {actual}")]
    ShapeMismatch {
        /// Length of the state vector.
        expected: usize,
        /// Length of the returned derivative.
        actual: usize,
    },

    /// A physical parameter or setter input is out of its domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The solve produced (or was about to produce) a non-finite value.
    #[error("numerical instability in {context}: {value}")]
    NumericalInstability {
        /// Where the instability was detected.
        context: &'static str,
        /// The offending value (denominator or derivative component).
        value: f64,
    },

    /// A velocity was set before the particle had a position.
    #[error("position must be set before velocity")]
    MissingPosition,
}

impl SimError {
    /// Creates a domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Creates an invalid argument error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a shape mismatch error.
    #[must_use]
    pub const fn shape(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Rejects values that are not finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("must be > 0, got {value}")))
    }
}

/// Rejects values that are not finite and non-negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("must be >= 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SimError::domain("angle undefined at (0, 0)");
        let msg = format!("{err}");
        assert!(msg.contains("domain error"));
        assert!(msg.contains("(0, 0)"));
    }

    #[test]
    fn error_shape_mismatch() {
        let err = SimError::shape(4, 2);
        let msg = format!("{err}");
        assert!(msg.contains('4'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn validators() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert!(ensure_positive("mass", 0.0).is_err());
        assert!(ensure_non_negative("length", 0.0).is_ok());
        assert!(ensure_non_negative("length", -1.0).is_err());
        assert!(matches!(
            ensure_finite("theta", f64::NAN),
            Err(SimError::InvalidArgument { name: "theta", .. })
        ));
    }
}

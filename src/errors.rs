//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Raised when a coil description or engine setting is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The shape name is not in the registry.
    #[error("unknown shape `{name}`, available shapes: {available}")]
    UnknownShape {
        /// Name that failed to resolve.
        name: String,
        /// Comma separated list of known shape names.
        available: String,
    },
    /// The formula name does not match any inductance formula.
    #[error("unknown inductance formula `{0}`, expected wheeler, monomial or cur_sheet")]
    UnknownFormula(String),
    /// The formula has no coefficient set for the chosen shape.
    #[error("formula `{formula}` is not defined for shape `{shape}`")]
    UnsupportedFormula {
        /// Canonical shape name.
        shape: &'static str,
        /// Canonical formula name.
        formula: &'static str,
    },
    /// A dimensional parameter is zero, negative or not finite.
    #[error("parameter `{name}` must be positive and finite, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// The angular resolution would need more samples than a render may hold.
    #[error("angular resolution {resolution:e} rad is too fine: {samples:e} samples exceed the limit of {limit}")]
    TooFine {
        /// Requested angular resolution in radians.
        resolution: Scalar,
        /// Number of samples the resolution would need.
        samples: Scalar,
        /// Largest sample count a render accepts.
        limit: usize,
    },
    /// A coil needs at least one copper layer.
    #[error("a coil needs at least one layer")]
    NoLayers,
}

/// Raised when the requested coil cannot be laid out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Too many turns for the outer diameter; the spiral would cross its own center.
    #[error("degenerate coil: inner diameter {inner_diam:.4} mm is not positive")]
    Degenerate {
        /// Computed inner diameter in millimeters.
        inner_diam: Scalar,
    },
}

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoilError {
    /// Wraps configuration errors.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Wraps geometry errors.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: CoilError = ConfigurationError::UnsupportedFormula {
            shape: "circle",
            formula: "monomial",
        }
        .into();
        assert_eq!(err.to_string(), "formula `monomial` is not defined for shape `circle`");
        assert!(matches!(err, CoilError::Configuration(_)));
    }
}

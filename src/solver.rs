//! Inverse design: find the outer diameter that hits a target resonant frequency.
//!
//! The resonance fit is inverted analytically into a target trace length. Trace
//! length is monotonic in the diameter but not invertible in closed form, so the
//! diameter is found with a damped walk: starting at the current diameter with a
//! step of half of it, move towards the target length and halve the step each
//! iteration. Without bracketing, only diameters in `(0, 2·diam)` are reachable.

use tracing::{debug, debug_span, warn};

use crate::coil::CoilSpec;
use crate::electrical::{resonance_fit, resonance_fit_length, resonance_length};
use crate::errors::{CoilError, ConfigurationError};
use crate::math::Scalar;

/// Stopping rules for the diameter search.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverCriteria {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Accepted trace-length error in millimeters.
    pub tolerance: Scalar,
}

impl Default for SolverCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: 1e-6,
        }
    }
}

/// Result of a diameter search.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySolution {
    /// Copy of the input spec carrying the suggested diameter.
    pub spec: CoilSpec,
    /// Suggested outer diameter in millimeters.
    pub diameter: Scalar,
    /// Frequency the fit predicts at the suggested diameter, in MHz.
    pub achieved_frequency: Scalar,
    /// Trace length the target frequency requires, in millimeters.
    pub target_length: Scalar,
    /// Remaining trace-length error at the suggested diameter, in millimeters.
    pub length_error: Scalar,
    /// Iterations spent.
    pub iterations: usize,
    /// Whether the error dropped below the tolerance.
    pub converged: bool,
    /// Whether the suggested diameter still holds every turn. A converged but
    /// infeasible solution asks for a coil smaller than its winding.
    pub feasible: bool,
}

/// Diameter search driven by the empirical resonance fit.
#[derive(Debug, Clone, Default)]
pub struct FrequencySolver {
    criteria: SolverCriteria,
}

impl FrequencySolver {
    /// Creates a solver with custom stopping rules.
    #[must_use]
    pub const fn new(criteria: SolverCriteria) -> Self {
        Self { criteria }
    }

    /// Active stopping rules.
    #[must_use]
    pub const fn criteria(&self) -> &SolverCriteria {
        &self.criteria
    }

    /// Searches for the outer diameter at which `spec` resonates at `target_mhz`.
    ///
    /// The input spec is left untouched. Failing to converge is not an error:
    /// the best diameter found is returned with `converged == false`. A target
    /// that needs more turns than the new diameter can hold is reported with
    /// `feasible == false`; its spec fails [`CoilSpec::check`].
    ///
    /// # Errors
    ///
    /// Fails when the starting spec is invalid or the target frequency is not
    /// a positive finite number.
    pub fn solve(&self, spec: &CoilSpec, target_mhz: Scalar) -> Result<FrequencySolution, CoilError> {
        spec.check()?;
        if !(target_mhz.is_finite() && target_mhz > 0.0) {
            return Err(ConfigurationError::NonPositive {
                name: "target_frequency",
                value: target_mhz,
            }
            .into());
        }

        let _span = debug_span!("frequency_solve", target_mhz, start_diam = spec.diam).entered();
        let target_length = resonance_fit_length(target_mhz);

        let mut candidate = spec.clone();
        let mut step = spec.diam / 2.0;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.criteria.max_iterations {
            iterations += 1;
            let error = resonance_length(&candidate) - target_length;
            if error.abs() < self.criteria.tolerance {
                converged = true;
                break;
            }
            if error < 0.0 {
                candidate.diam += step;
            } else {
                candidate.diam -= step;
            }
            step /= 2.0;
        }

        let achieved_length = resonance_length(&candidate);
        let feasible = candidate.fits();
        if converged {
            debug!(iterations, diameter = candidate.diam, "frequency solve converged");
        } else {
            warn!(
                iterations,
                diameter = candidate.diam,
                target_mhz,
                "frequency solve hit the iteration cap without converging"
            );
        }
        if !feasible {
            warn!(
                diameter = candidate.diam,
                target_mhz,
                "frequency solve needs a diameter too small for the winding"
            );
        }

        Ok(FrequencySolution {
            diameter: candidate.diam,
            achieved_frequency: resonance_fit(achieved_length),
            target_length,
            length_error: achieved_length - target_length,
            iterations,
            converged,
            feasible,
            spec: candidate,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::electrical::resonant_frequency;
    use crate::shape::Shape;

    #[test]
    fn own_frequency_converges_immediately() {
        let spec = CoilSpec::new(5.0, 20.0, 0.5, 0.5).with_shape(Shape::Square);
        let f = resonant_frequency(&spec, 1e-9).unwrap();
        let solution = FrequencySolver::default().solve(&spec, f).unwrap();
        assert!(solution.converged);
        assert!(solution.feasible);
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.diameter, spec.diam);
    }

    #[test]
    fn finds_a_larger_diameter() {
        let start = CoilSpec::new(5.0, 20.0, 0.5, 0.5).with_shape(Shape::Octagon);
        let wanted = start.with_diam(27.3);
        let f = resonant_frequency(&wanted, 1e-9).unwrap();
        let solution = FrequencySolver::default().solve(&start, f).unwrap();
        assert!(solution.converged);
        assert!(solution.length_error.abs() < 1e-6);
        assert_relative_eq!(solution.diameter, 27.3, epsilon = 1e-5);
        assert_relative_eq!(solution.achieved_frequency, f, max_relative = 1e-6);
        assert_eq!(solution.spec.diam, solution.diameter);
        assert_eq!(start.diam, 20.0);
    }

    #[test]
    fn unreachable_target_reports_non_convergence() {
        let start = CoilSpec::new(2.0, 20.0, 0.5, 0.5);
        // needs far more than twice the starting diameter
        let f = resonant_frequency(&start.with_diam(100.0), 1e-9).unwrap();
        let criteria = SolverCriteria {
            max_iterations: 200,
            ..SolverCriteria::default()
        };
        let solution = FrequencySolver::new(criteria).solve(&start, f).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 200);
        assert!(solution.diameter <= 40.0);
        assert!(solution.achieved_frequency > f);
    }

    #[test]
    fn too_small_a_coil_is_flagged_infeasible() {
        // ten square turns of 1 mm pitch need more than 19 mm
        let start = CoilSpec::new(10.0, 20.0, 0.5, 0.5).with_shape(Shape::Square);
        let f = resonance_fit(0.5 + 40.0 * 18.0 - 380.0);
        let solution = FrequencySolver::default().solve(&start, f).unwrap();
        assert!(solution.converged);
        assert!(!solution.feasible);
        assert_relative_eq!(solution.diameter, 18.0, epsilon = 1e-6);
        assert!(solution.spec.check().is_err());
    }

    #[test]
    fn rejects_non_positive_target() {
        let spec = CoilSpec::new(2.0, 20.0, 0.5, 0.5);
        for target in [0.0, -3.0, Scalar::NAN] {
            assert!(matches!(
                FrequencySolver::default().solve(&spec, target),
                Err(CoilError::Configuration(ConfigurationError::NonPositive { .. }))
            ));
        }
    }
}

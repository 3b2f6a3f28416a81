//! DC resistance, inductance and resonance estimates for planar coils.
//!
//! # Inductance
//!
//! Single-layer inductance uses one of three closed-form approximations from
//! Mohan et al. (1999), selected by [`Formula`](crate::shape::Formula):
//!
//! ```text
//! wheeler:    L = K1·μ0·n²·d_avg / (1 + K2·ρ)
//! monomial:   L = β·d_out^α1·w^α2·d_avg^α3·n^α4·s^α5 · 1e-6
//! cur_sheet:  L = c1·μ0·n²·d_avg·(ln(c2/ρ) + c3·ρ + c4·ρ²) / 2
//! ```
//!
//! with fill factor `ρ = (d_out − d_in)/(d_out + d_in)` and `d_avg = (d_out + d_in)/2`,
//! both taken from the true (formula-convention) diameters in meters.
//!
//! Stacked layers add mutual inductance through an empirical coupling fit that
//! decays with inter-layer distance.
//!
//! # References
//!
//! - Mohan, S. S., del Mar Hershenson, M., Boyd, S. P., & Lee, T. H. (1999). Simple
//!   Accurate Expressions for Planar Spiral Inductances. IEEE JSSC 34(10), 1419-1424.

use crate::coil::CoilSpec;
use crate::constants::{
    COPPER_RESISTIVITY, LAYER_COUPLING_DISTANCE, LAYER_COUPLING_PAIR, RESONANCE_FIT_INTERCEPT,
    RESONANCE_FIT_SLOPE, VACUUM_PERMEABILITY,
};
use crate::errors::{CoilError, ConfigurationError};
use crate::geometry::layer_length;
use crate::math::Scalar;
use crate::shape::Coefficients;
use crate::units::mm_to_m;

/// DC resistance of the whole coil (all layers in series), in ohms.
///
/// # Errors
///
/// Fails when the spec is invalid or the spiral would be degenerate.
pub fn resistance(spec: &CoilSpec) -> Result<Scalar, CoilError> {
    spec.check()?;
    Ok(dc_resistance(spec))
}

/// Resistance of an already checked spec.
pub(crate) fn dc_resistance(spec: &CoilSpec) -> Scalar {
    let sheet_resistance = COPPER_RESISTIVITY / mm_to_m(spec.copper_thickness);
    let squares = mm_to_m(layer_length(spec)) / mm_to_m(spec.trace_width);
    sheet_resistance * squares * Scalar::from(spec.layers)
}

/// Normalized difference between outer and inner true diameter.
///
/// # Errors
///
/// Fails when the spec is invalid or the spiral would be degenerate.
pub fn fill_factor(spec: &CoilSpec) -> Result<Scalar, CoilError> {
    spec.check()?;
    let (outer, inner) = (spec.true_diam(), spec.true_inner_diam());
    Ok((outer - inner) / (outer + inner))
}

/// Inductance of one layer, in henries.
///
/// # Errors
///
/// Fails with a configuration error when the formula has no coefficients for
/// the shape, or with a geometry error for a degenerate spiral.
pub fn single_layer_inductance(spec: &CoilSpec) -> Result<Scalar, CoilError> {
    spec.check()?;
    Ok(layer_inductance(spec)?)
}

/// Single-layer inductance of an already checked spec.
fn layer_inductance(spec: &CoilSpec) -> Result<Scalar, ConfigurationError> {
    let coefficients = spec.shape.coefficients(spec.formula)?;

    let n = spec.effective_turns();
    let outer = mm_to_m(spec.true_diam());
    let inner = mm_to_m(spec.true_inner_diam());
    let fill = (outer - inner) / (outer + inner);
    let average = (outer + inner) / 2.0;

    let inductance = match coefficients {
        Coefficients::Wheeler([k1, k2]) => k1 * VACUUM_PERMEABILITY * n.powi(2) * average / (1.0 + k2 * fill),
        Coefficients::Monomial([beta, a1, a2, a3, a4, a5]) => {
            // fitted with the clearance in millimeters and everything else in meters
            1.0e-6
                * beta
                * outer.powf(a1)
                * mm_to_m(spec.trace_width).powf(a2)
                * average.powf(a3)
                * n.powf(a4)
                * spec.clearance.powf(a5)
        }
        Coefficients::CurrentSheet([c1, c2, c3, c4]) => {
            c1 * VACUUM_PERMEABILITY * n.powi(2) * average
                * ((c2 / fill).ln() + c3 * fill + c4 * fill.powi(2))
                / 2.0
        }
    };
    Ok(inductance)
}

/// Multiplier turning single-layer inductance into the inductance of `layers`
/// identical stacked layers `layer_spacing` millimeters apart.
#[must_use]
pub fn layer_coupling_factor(layers: u32, layer_spacing: Scalar) -> Scalar {
    let n = Scalar::from(layers);
    let spacing_sum = layer_spacing * (n * (n + 1.0) * (n - 1.0)) / 6.0;
    let pairs = n * (n - 1.0) / 2.0;
    let coupling = LAYER_COUPLING_DISTANCE * spacing_sum + LAYER_COUPLING_PAIR * pairs;
    n + 2.0 * coupling
}

/// Total inductance of `layers` stacked copies of a coil with inductance `single`.
#[must_use]
pub fn multilayer_inductance(single: Scalar, layers: u32, layer_spacing: Scalar) -> Scalar {
    if layers <= 1 {
        return single;
    }
    single * layer_coupling_factor(layers, layer_spacing)
}

/// Inductance of the whole coil including inter-layer coupling, in henries.
///
/// # Errors
///
/// See [`single_layer_inductance`].
pub fn inductance(spec: &CoilSpec) -> Result<Scalar, CoilError> {
    spec.check()?;
    Ok(coil_inductance(spec)?)
}

/// Total inductance of an already checked spec.
pub(crate) fn coil_inductance(spec: &CoilSpec) -> Result<Scalar, ConfigurationError> {
    let single = layer_inductance(spec)?;
    Ok(multilayer_inductance(single, spec.layers, spec.layer_spacing()))
}

/// Resonant frequency in MHz predicted by the empirical length fit for a
/// total trace length of `length_mm`.
#[must_use]
pub fn resonance_fit(length_mm: Scalar) -> Scalar {
    (RESONANCE_FIT_SLOPE * length_mm.ln() + RESONANCE_FIT_INTERCEPT).exp()
}

/// Total trace length in millimeters at which [`resonance_fit`] gives `frequency_mhz`.
#[must_use]
pub fn resonance_fit_length(frequency_mhz: Scalar) -> Scalar {
    ((frequency_mhz.ln() - RESONANCE_FIT_INTERCEPT) / RESONANCE_FIT_SLOPE).exp()
}

/// Trace length fed to the resonance fit: all layers plus one trace width.
pub(crate) fn resonance_length(spec: &CoilSpec) -> Scalar {
    spec.trace_width + layer_length(spec) * Scalar::from(spec.layers)
}

/// Estimated self-resonant frequency of the coil, in MHz.
///
/// The estimate comes from a log-linear fit of measured resonance against
/// trace length. `_capacitance` is accepted for interface compatibility but
/// does not enter the fit; whether a lumped LC term was intended is unknown,
/// so none is added.
///
/// # Errors
///
/// Fails when the spec is invalid or the spiral would be degenerate.
pub fn resonant_frequency(spec: &CoilSpec, _capacitance: Scalar) -> Result<Scalar, CoilError> {
    spec.check()?;
    Ok(resonance_fit(resonance_length(spec)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shape::{Formula, Shape};

    fn square(formula: Formula) -> CoilSpec {
        CoilSpec::new(5.0, 20.0, 0.5, 0.5)
            .with_shape(Shape::Square)
            .with_formula(formula)
    }

    #[test]
    fn square_formulas_match_reference_values() {
        let expected = [
            (Formula::Wheeler, 6.335_986_607_784e-7),
            (Formula::Monomial, 4.576_291_837_731e-7),
            (Formula::CurrentSheet, 6.269_340_596_235e-7),
        ];
        for (formula, value) in expected {
            let l = single_layer_inductance(&square(formula)).unwrap();
            assert_relative_eq!(l, value, max_relative = 1.0e-9);
        }
    }

    #[test]
    fn hexagon_uses_true_diameters() {
        let spec = square(Formula::CurrentSheet).with_shape(Shape::Hexagon);
        assert_relative_eq!(
            single_layer_inductance(&spec).unwrap(),
            4.684_565_627_061e-7,
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn formulas_agree_within_thirty_percent() {
        let wheeler = single_layer_inductance(&square(Formula::Wheeler)).unwrap();
        for formula in [Formula::Monomial, Formula::CurrentSheet] {
            let other = single_layer_inductance(&square(formula)).unwrap();
            assert!((other / wheeler - 1.0).abs() < 0.3, "{formula}: {other} vs {wheeler}");
        }
    }

    #[test]
    fn missing_coefficients_fail_loudly() {
        let spec = CoilSpec::new(3.0, 20.0, 0.5, 0.5).with_formula(Formula::Monomial);
        let err = inductance(&spec).unwrap_err();
        assert_eq!(
            err,
            CoilError::Configuration(ConfigurationError::UnsupportedFormula {
                shape: "circle",
                formula: "monomial",
            })
        );
    }

    #[test]
    fn coupling_factor_for_stacked_layers() {
        assert_eq!(layer_coupling_factor(1, 0.0), 1.0);
        let spec = square(Formula::CurrentSheet).with_layers(2, 1.6);
        assert_relative_eq!(inductance(&spec).unwrap(), 2.144_941_713_586e-6, max_relative = 1.0e-9);
        let spec = square(Formula::CurrentSheet).with_layers(4, 1.6);
        assert_relative_eq!(inductance(&spec).unwrap(), 8.906_844_229_570e-6, max_relative = 1.0e-9);
    }

    #[test]
    fn single_layer_total_is_exactly_single_layer_value() {
        let spec = square(Formula::Wheeler);
        assert_eq!(inductance(&spec).unwrap(), single_layer_inductance(&spec).unwrap());
    }

    #[test]
    fn resistance_scales_with_layers_and_copper() {
        let spec = square(Formula::Wheeler);
        let base = resistance(&spec).unwrap();
        let doubled = resistance(&spec.clone().with_layers(2, 1.6)).unwrap();
        let thick = resistance(&spec.with_copper_thickness(0.070)).unwrap();
        assert_relative_eq!(doubled, 2.0 * base, max_relative = 1.0e-12);
        assert_relative_eq!(thick, base / 2.0, max_relative = 1.0e-12);
    }

    #[test]
    fn resonance_fit_inverts() {
        for f in [1.0, 13.56, 480.0, 5_000.0] {
            assert_relative_eq!(resonance_fit(resonance_fit_length(f)), f, max_relative = 1.0e-12);
        }
    }

    #[test]
    fn resonance_ignores_capacitance() {
        let spec = square(Formula::Wheeler);
        let a = resonant_frequency(&spec, 1.0e-12).unwrap();
        let b = resonant_frequency(&spec, 1.0e-6).unwrap();
        assert_eq!(a, b);
        // 310 mm of trace plus one trace width
        assert_relative_eq!(a, 483.286_978_758_9, max_relative = 1.0e-9);
    }
}

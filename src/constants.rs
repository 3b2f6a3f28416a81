//! Physical constants and empirical fit parameters used by the coil models.
//!
//! ## Accuracy
//!
//! μ₀ is provided with 12 significant figures, suitable for engineering
//! applications. The copper resistivity is the room-temperature handbook value
//! used by most PCB trace calculators.
//!
//! The empirical constants (layer coupling and the resonance fit) were obtained
//! by regression against measured coils. They are calibrated as a set and must
//! not be rounded or re-derived.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Mohan, S. S., del Mar Hershenson, M., Boyd, S. P., & Lee, T. H. (1999). Simple
//!   Accurate Expressions for Planar Spiral Inductances. IEEE JSSC 34(10), 1419-1424.

/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;

/// Electrical resistivity of copper ρ in ohm-meters (Ω·m).
pub const COPPER_RESISTIVITY: f64 = 1.72e-8;

/// Copper thickness per ounce of copper weight (oz/ft²), in micrometers.
pub const COPPER_MICROMETERS_PER_OUNCE: f64 = 34.8;

/// Pairwise coupling weight between stacked layers (per layer pair).
pub const LAYER_COUPLING_PAIR: f64 = 1.025_485_443;

/// Coupling decay per millimeter of inter-layer distance.
pub const LAYER_COUPLING_DISTANCE: f64 = -0.201_166_582;

/// Slope of the empirical `ln(f) = slope * ln(length) + intercept` resonance fit.
/// `length` in millimeters, `f` in megahertz.
pub const RESONANCE_FIT_SLOPE: f64 = -0.996_270_064_815_117_9;

/// Intercept of the empirical resonance fit.
pub const RESONANCE_FIT_INTERCEPT: f64 = 11.897_391_483_473_74;

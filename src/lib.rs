#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and empirical fit parameters.
pub mod constants;
/// Millimeter/meter and copper-weight conversions.
pub mod units;
/// Shared numerical primitives (scalars, points, polylines).
pub mod math;
/// Coil outlines and their closed-form geometry.
pub mod shape;
/// Coil description and derived diameters.
pub mod coil;
/// Polyline rendering and trace length.
pub mod geometry;
/// Loop antennas placed beside or around a coil.
pub mod antenna;
/// Resistance, inductance and resonance models.
pub mod electrical;
/// Diameter search for a target resonant frequency.
pub mod solver;
/// Scalar summaries and export naming.
pub mod report;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

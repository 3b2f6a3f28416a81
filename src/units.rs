//! Unit conversions between board-level millimeters and SI meters.
//!
//! All user-facing lengths in this crate are millimeters. The electrical
//! formulas work in meters, so conversions happen at the formula boundary.

use crate::constants::COPPER_MICROMETERS_PER_OUNCE;
use crate::math::Scalar;

/// Millimeters per meter.
pub const MM_PER_M: Scalar = 1_000.0;

/// Converts millimeters to meters.
#[inline]
#[must_use]
pub fn mm_to_m(mm: Scalar) -> Scalar {
    mm / MM_PER_M
}

/// Converts meters to millimeters.
#[inline]
#[must_use]
pub fn m_to_mm(m: Scalar) -> Scalar {
    m * MM_PER_M
}

/// Copper thickness in millimeters for a copper weight in oz/ft².
#[must_use]
pub fn copper_oz_to_mm(ounces: Scalar) -> Scalar {
    COPPER_MICROMETERS_PER_OUNCE * ounces * 1.0e-3
}

/// Copper thickness in meters for a copper weight in oz/ft².
#[must_use]
pub fn copper_oz_to_m(ounces: Scalar) -> Scalar {
    COPPER_MICROMETERS_PER_OUNCE * ounces * 1.0e-6
}

/// Copper weight in oz/ft² for a thickness in millimeters.
#[must_use]
pub fn copper_mm_to_oz(mm: Scalar) -> Scalar {
    mm * 1.0e3 / COPPER_MICROMETERS_PER_OUNCE
}

/// Copper weight in oz/ft² for a thickness in micrometers.
#[must_use]
pub fn copper_um_to_oz(um: Scalar) -> Scalar {
    um / COPPER_MICROMETERS_PER_OUNCE
}

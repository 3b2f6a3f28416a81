//! Pickup loops drawn beside or around a coil.
//!
//! A [`LoopAntenna`] is a single closed turn placed next to the coil, centered
//! [`LOOP_CLEARANCE`] past the coil's true outline and [`LOOP_DROP`] below its
//! top edge. A [`PaddedLoop`] is a square loop around (or inside) the coil with
//! two solder pads at the top edge.

use std::f64::consts::TAU;

use crate::coil::CoilSpec;
use crate::errors::ConfigurationError;
use crate::math::{segments_from_points, Point, Scalar, Segment};

/// Number of chords approximating a circular loop.
pub const LOOP_SEGMENTS: usize = 64;
/// Horizontal gap between the coil's true outline and the loop, in millimeters.
pub const LOOP_CLEARANCE: Scalar = 5.0;
/// Distance from the coil's top edge down to the loop center, in millimeters.
pub const LOOP_DROP: Scalar = 20.0;
/// Trace width of a padded loop, in millimeters (24 mil).
pub const PAD_LOOP_TRACE_WIDTH: Scalar = 0.6096;
/// Gap between the two pads, in millimeters (50 mil).
pub const PAD_GAP: Scalar = 1.27;
/// Scale applied to an inset loop and its pads.
pub const INSET_SCALE: Scalar = 0.8;
/// Coils up to this outer diameter get the small pads, in millimeters.
pub const SMALL_PAD_MAX_DIAM: Scalar = 12.0;

/// Outline of a loop antenna.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopShape {
    /// Circle sampled with [`LOOP_SEGMENTS`] chords.
    Circle,
    /// Axis-aligned square.
    Square,
}

/// A single-turn loop placed beside the coil.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopAntenna {
    /// Loop outline.
    pub shape: LoopShape,
    /// Outer diameter (or side length) of the loop, in millimeters.
    pub diameter: Scalar,
}

impl LoopAntenna {
    /// Creates a loop of the given outline and diameter.
    #[must_use]
    pub const fn new(shape: LoopShape, diameter: Scalar) -> Self {
        Self { shape, diameter }
    }

    /// Center of the loop for `spec`, relative to the coil center.
    #[must_use]
    pub fn center(&self, spec: &CoilSpec) -> Point {
        let coil_radius = spec.true_diam() / 2.0;
        Point::new(
            coil_radius + LOOP_CLEARANCE + self.diameter / 2.0,
            coil_radius - LOOP_DROP,
        )
    }

    /// Radius of the trace centerline; the loop is drawn in the coil's trace width.
    #[must_use]
    pub fn centerline_radius(&self, spec: &CoilSpec) -> Scalar {
        (self.diameter - spec.trace_width) / 2.0
    }

    /// Segments of a loop for an already checked spec.
    pub(crate) fn segments(&self, spec: &CoilSpec) -> Result<Vec<Segment>, ConfigurationError> {
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(ConfigurationError::NonPositive {
                name: "loop_diameter",
                value: self.diameter,
            });
        }
        let radius = self.centerline_radius(spec);
        if radius <= 0.0 {
            return Err(ConfigurationError::NonPositive {
                name: "loop_radius",
                value: radius,
            });
        }
        let center = self.center(spec);
        let segments = match self.shape {
            LoopShape::Circle => {
                let points: Vec<Point> = (0..=LOOP_SEGMENTS)
                    .map(|i| {
                        let angle = TAU * i as Scalar / LOOP_SEGMENTS as Scalar;
                        Point::new(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        )
                    })
                    .collect();
                segments_from_points(&points)
            }
            LoopShape::Square => {
                let corners = square_corners(center, radius);
                (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect()
            }
        };
        Ok(segments)
    }
}

/// Placement of a padded loop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadLayout {
    /// Loop on the same layer, one trace width outside the coil.
    Surround,
    /// Loop on another layer, shrunk to [`INSET_SCALE`] of the coil diameter.
    Inset,
}

/// Axis-aligned rectangular pad.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl Pad {
    fn centered(center: Point, width: Scalar, length: Scalar) -> Self {
        Self {
            min: Point::new(center.x - width / 2.0, center.y - length / 2.0),
            max: Point::new(center.x + width / 2.0, center.y + length / 2.0),
        }
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.max.y - self.min.y
    }
}

/// Square loop centered on the coil with leads to two pads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedLoop {
    /// The four sides of the loop.
    pub outline: Vec<Segment>,
    /// Leads from the two top corners to the inner pad edges.
    pub leads: [Segment; 2],
    /// Left and right pads.
    pub pads: [Pad; 2],
}

impl PaddedLoop {
    /// Lays out the padded loop for an already checked spec.
    pub(crate) fn layout(spec: &CoilSpec, layout: PadLayout) -> Self {
        let (pad_length, pad_width) = if spec.diam <= SMALL_PAD_MAX_DIAM {
            (1.905, 1.5875)
        } else {
            (3.81, 3.175)
        };
        let (half, scale) = match layout {
            PadLayout::Surround => {
                let loop_diam = spec.diam + 2.0 * (spec.trace_width + PAD_LOOP_TRACE_WIDTH);
                (loop_diam / 2.0, 1.0)
            }
            PadLayout::Inset => (spec.diam / 2.0 * INSET_SCALE, INSET_SCALE),
        };

        let pad_offset = (PAD_GAP / 2.0 + pad_width / 2.0) * scale;
        // pads overlap the loop's top edge by half the loop trace width
        let pad_y = (half + pad_length / 2.0 - PAD_LOOP_TRACE_WIDTH / 2.0) * scale;
        let left = Pad::centered(Point::new(-pad_offset, pad_y), pad_width, pad_length);
        let right = Pad::centered(Point::new(pad_offset, pad_y), pad_width, pad_length);

        let corners = square_corners(Point::origin(), half);
        Self {
            outline: (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect(),
            leads: [
                (Point::new(-half, half), Point::new(left.max.x, half)),
                (Point::new(half, half), Point::new(right.min.x, half)),
            ],
            pads: [left, right],
        }
    }
}

fn square_corners(center: Point, half: Scalar) -> [Point; 4] {
    [
        Point::new(center.x - half, center.y - half),
        Point::new(center.x + half, center.y - half),
        Point::new(center.x + half, center.y + half),
        Point::new(center.x - half, center.y + half),
    ]
}

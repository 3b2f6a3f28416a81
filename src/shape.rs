//! Coil outlines and their closed-form geometry.
//!
//! Each [`Shape`] maps a step index to a point on the spiral and to the trace
//! length accumulated up to that step. For the polygonal shapes the step index
//! counts corners (`steps_per_turn` corners make one turn); for the circle it is
//! an angle in radians (`2π` per turn).
//!
//! Every shape also carries the calibration coefficients for the empirical
//! inductance formulas of Mohan et al. (1999).

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigurationError;
use crate::math::{Point, Scalar};

/// Empirical single-layer inductance approximations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Modified Wheeler expression.
    Wheeler,
    /// Data-fitted monomial expression.
    Monomial,
    /// Current-sheet approximation.
    #[cfg_attr(feature = "serde", serde(rename = "cur_sheet"))]
    CurrentSheet,
}

impl Formula {
    /// All formulas, in canonical order.
    pub const ALL: [Self; 3] = [Self::Wheeler, Self::Monomial, Self::CurrentSheet];

    /// Canonical name of the formula.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wheeler => "wheeler",
            Self::Monomial => "monomial",
            Self::CurrentSheet => "cur_sheet",
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formula {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|formula| formula.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownFormula(s.to_owned()))
    }
}

/// Calibration coefficients of one formula for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coefficients {
    /// `(K1, K2)` of the modified Wheeler expression.
    Wheeler([Scalar; 2]),
    /// `(β, α1..α5)` of the monomial fit.
    Monomial([Scalar; 6]),
    /// `(c1, c2, c3, c4)` of the current-sheet expression.
    CurrentSheet([Scalar; 4]),
}

/// Trace dimensions shared by every shape function, in millimeters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Outer diameter.
    pub diam: Scalar,
    /// Gap between adjacent traces.
    pub clearance: Scalar,
    /// Copper trace width.
    pub trace_width: Scalar,
}

impl Dimensions {
    /// Creates a dimension set.
    #[must_use]
    pub const fn new(diam: Scalar, clearance: Scalar, trace_width: Scalar) -> Self {
        Self {
            diam,
            clearance,
            trace_width,
        }
    }

    /// Center-to-center pitch between adjacent turns.
    #[must_use]
    pub fn spacing(&self) -> Scalar {
        trace_spacing(self.clearance, self.trace_width)
    }
}

/// Center-to-center pitch between adjacent turns.
#[inline]
#[must_use]
pub fn trace_spacing(clearance: Scalar, trace_width: Scalar) -> Scalar {
    clearance + trace_width
}

/// Inner diameter after `turns` turns, with the square's one-turn correction
/// applied when `square` is set.
fn shrink_diam(turns: Scalar, diam: Scalar, spacing: Scalar, trace_width: Scalar, square: bool) -> Scalar {
    let counted = if square { turns - 1.0 } else { turns };
    ((diam / 2.0) - counted * spacing - trace_width) * 2.0
}

/// Supported coil outlines.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Square spiral, four corners per turn.
    Square,
    /// Hexagonal spiral, six corners per turn.
    Hexagon,
    /// Octagonal spiral, eight corners per turn.
    Octagon,
    /// Archimedean spiral, sampled at a configurable angular resolution.
    Circle,
}

impl Shape {
    /// All shapes, in canonical order.
    pub const ALL: [Self; 4] = [Self::Square, Self::Hexagon, Self::Octagon, Self::Circle];

    /// Canonical name of the shape.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Hexagon => "hexagon",
            Self::Octagon => "octagon",
            Self::Circle => "circle",
        }
    }

    /// Number of corners per turn, `None` for the circle.
    #[must_use]
    pub const fn sides(self) -> Option<u32> {
        match self {
            Self::Square => Some(4),
            Self::Hexagon => Some(6),
            Self::Octagon => Some(8),
            Self::Circle => None,
        }
    }

    /// True when the outline has a fixed number of corners per turn.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        self.sides().is_some()
    }

    /// Step-index span of one full turn: the corner count, or `2π` for the circle.
    #[must_use]
    pub fn steps_per_turn(self) -> Scalar {
        self.sides().map_or(TAU, Scalar::from)
    }

    /// Calibration coefficients of `formula` for this shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnsupportedFormula`] when the formula was
    /// never calibrated for the shape (the monomial fit has no circle data).
    pub fn coefficients(self, formula: Formula) -> Result<Coefficients, ConfigurationError> {
        let coefficients = match (self, formula) {
            (Self::Square, Formula::Wheeler) => Coefficients::Wheeler([2.34, 2.75]),
            (Self::Square, Formula::Monomial) => {
                Coefficients::Monomial([1.62, -1.21, -0.147, 2.40, 1.78, -0.030])
            }
            (Self::Square, Formula::CurrentSheet) => Coefficients::CurrentSheet([1.27, 2.07, 0.18, 0.13]),
            (Self::Hexagon, Formula::Wheeler) => Coefficients::Wheeler([2.33, 3.82]),
            (Self::Hexagon, Formula::Monomial) => {
                Coefficients::Monomial([1.28, -1.24, -0.174, 2.47, 1.77, -0.049])
            }
            (Self::Hexagon, Formula::CurrentSheet) => Coefficients::CurrentSheet([1.09, 2.23, 0.00, 0.17]),
            (Self::Octagon, Formula::Wheeler) => Coefficients::Wheeler([2.25, 3.55]),
            (Self::Octagon, Formula::Monomial) => {
                Coefficients::Monomial([1.33, -1.21, -0.163, 2.43, 1.75, -0.049])
            }
            (Self::Octagon, Formula::CurrentSheet) => Coefficients::CurrentSheet([1.07, 2.29, 0.00, 0.19]),
            (Self::Circle, Formula::Wheeler) => Coefficients::Wheeler([2.23, 3.45]),
            (Self::Circle, Formula::CurrentSheet) => Coefficients::CurrentSheet([1.00, 2.46, 0.00, 0.20]),
            (Self::Circle, Formula::Monomial) => {
                return Err(ConfigurationError::UnsupportedFormula {
                    shape: self.name(),
                    formula: formula.name(),
                })
            }
        };
        Ok(coefficients)
    }

    /// True when `formula` has a coefficient set for this shape.
    #[must_use]
    pub fn supports(self, formula: Formula) -> bool {
        self.coefficients(formula).is_ok()
    }

    /// Inner diameter reached after `turns` turns, without the true-diameter correction.
    #[must_use]
    pub fn simple_inner_diam(self, turns: Scalar, dims: &Dimensions) -> Scalar {
        shrink_diam(
            turns,
            dims.diam,
            dims.spacing(),
            dims.trace_width,
            self == Self::Square,
        )
    }

    /// Offset between the drawn diameter and the diameter convention of the
    /// inductance papers. Zero for the square.
    #[must_use]
    pub fn true_diam_offset(self, dims: &Dimensions) -> Scalar {
        match self {
            Self::Square => 0.0,
            _ => dims.spacing() / 4.0,
        }
    }

    /// Outer diameter in the convention of the inductance formulas.
    #[must_use]
    pub fn true_diam(self, dims: &Dimensions) -> Scalar {
        dims.diam - self.true_diam_offset(dims) * 2.0
    }

    /// Inner diameter in the convention of the inductance formulas.
    #[must_use]
    pub fn true_inner_diam(self, turns: Scalar, dims: &Dimensions) -> Scalar {
        self.simple_inner_diam(turns, dims) + self.true_diam_offset(dims) * 2.0
    }

    /// Point on the spiral at `step`, with polygons rotated so a flat edge faces up.
    ///
    /// `reverse` mirrors the winding direction.
    #[must_use]
    pub fn position(self, step: Scalar, dims: &Dimensions, reverse: bool) -> Point {
        self.position_with_rotation(step, dims, reverse, true)
    }

    /// Point on the spiral at `step`.
    ///
    /// When `rotate_polygons` is false hexagons and octagons start on a vertex.
    #[must_use]
    pub fn position_with_rotation(
        self,
        step: Scalar,
        dims: &Dimensions,
        reverse: bool,
        rotate_polygons: bool,
    ) -> Point {
        match self {
            Self::Square => square_position(step, dims, reverse),
            Self::Circle => {
                let radius = (dims.diam - dims.trace_width) / 2.0 - (step / TAU) * dims.spacing();
                spiral_point(step, radius, reverse)
            }
            Self::Hexagon | Self::Octagon => {
                let sides = self.steps_per_turn();
                let spacing = trace_spacing(
                    circumscribed(dims.clearance, sides),
                    circumscribed(dims.trace_width, sides),
                );
                let angle = step * TAU / sides;
                let radius = circumscribed(dims.diam - dims.trace_width, sides) / 2.0
                    - (angle / TAU) * spacing;
                let phase = if rotate_polygons {
                    let half_corner = PI / sides;
                    if reverse {
                        -half_corner
                    } else {
                        half_corner
                    }
                } else {
                    0.0
                };
                spiral_point(angle + phase, radius, reverse)
            }
        }
    }

    /// Trace length from the start of the spiral up to `step`, in millimeters.
    #[must_use]
    pub fn length(self, step: Scalar, dims: &Dimensions) -> Scalar {
        let spacing = dims.spacing();
        match self {
            Self::Square => {
                // Runs shrink by one spacing every two corners; sum both arithmetic series.
                let run = dims.diam - dims.trace_width;
                let horizontal = (step / 2.0).floor();
                let vertical = ((step + 1.0) / 2.0).floor();
                let widths = horizontal * run - ((horizontal - 1.0) * horizontal / 2.0) * spacing;
                let heights = vertical * run
                    - ((((vertical - 2.0) * (vertical - 1.0)) / 2.0).max(0.0) - 1.0) * spacing;
                widths + heights
            }
            Self::Circle => {
                let turns = step / TAU;
                PI * turns * (dims.diam + self.simple_inner_diam(turns, dims)) / 2.0
            }
            Self::Hexagon | Self::Octagon => {
                let sides = self.steps_per_turn();
                let outer = circumscribed(dims.diam, sides);
                let inner = shrink_diam(
                    step / sides,
                    outer,
                    trace_spacing(
                        circumscribed(dims.clearance, sides),
                        circumscribed(dims.trace_width, sides),
                    ),
                    circumscribed(dims.trace_width, sides),
                    false,
                );
                step * (PI / sides).sin() * (outer + inner) / 2.0
            }
        }
    }

    /// Prefix used in export file names.
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Square => "SQ",
            Self::Hexagon => "HE",
            Self::Octagon => "OC",
            Self::Circle => "CI",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeRegistry::standard().resolve(s)
    }
}

/// Diameter of the circle circumscribing a regular polygon whose inscribed
/// circle has diameter `inscribed`.
fn circumscribed(inscribed: Scalar, sides: Scalar) -> Scalar {
    inscribed / (PI / sides).cos()
}

fn spiral_point(angle: Scalar, radius: Scalar, reverse: bool) -> Point {
    let x_sign = if reverse { 1.0 } else { -1.0 };
    Point::new(x_sign * angle.sin() * radius, -angle.cos() * radius)
}

fn square_position(step: Scalar, dims: &Dimensions, reverse: bool) -> Point {
    let spacing = dims.spacing();
    let half = (dims.diam - dims.trace_width) / 2.0;
    let corner = step.rem_euclid(4.0);
    let x_sign = if (corner >= 2.0) ^ reverse { 1.0 } else { -1.0 };
    let y_sign = if (1.0..3.0).contains(&corner) { 1.0 } else { -1.0 };
    // y lags x by one corner, which is what closes each ring into the next.
    let x = x_sign * (half - (step / 4.0).floor() * spacing);
    let y = y_sign * (half - ((step - 1.0) / 4.0).floor() * spacing);
    Point::new(x, y)
}

/// Immutable name table for the available shapes.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    entries: Vec<(&'static str, Shape)>,
}

impl ShapeRegistry {
    /// Registry holding the four built-in outlines under their canonical names.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: Shape::ALL.iter().map(|shape| (shape.name(), *shape)).collect(),
        }
    }

    /// Looks up a shape by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownShape`] listing the known names.
    pub fn resolve(&self, name: &str) -> Result<Shape, ConfigurationError> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, shape)| *shape)
            .ok_or_else(|| ConfigurationError::UnknownShape {
                name: name.to_owned(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

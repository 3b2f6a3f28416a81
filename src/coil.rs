//! Coil description shared by the geometry, electrical and solver modules.

use tracing::warn;

use crate::errors::{CoilError, ConfigurationError, GeometryError};
use crate::math::Scalar;
use crate::shape::{Dimensions, Formula, Shape};

/// Complete description of one planar spiral coil. Lengths in millimeters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoilSpec {
    /// Number of turns. Discrete outlines use the integer part only.
    pub turns: Scalar,
    /// Outer diameter.
    pub diam: Scalar,
    /// Gap between adjacent traces.
    pub clearance: Scalar,
    /// Copper trace width.
    pub trace_width: Scalar,
    /// Number of stacked copper layers carrying the coil.
    pub layers: u32,
    /// Board thickness, used for the inter-layer distance.
    pub pcb_thickness: Scalar,
    /// Copper foil thickness.
    pub copper_thickness: Scalar,
    /// Outline of the spiral.
    pub shape: Shape,
    /// Inductance approximation.
    pub formula: Formula,
    /// Counter-clockwise winding.
    pub ccw: bool,
}

impl CoilSpec {
    /// Creates a single-layer clockwise circular coil on a 1.6 mm board with
    /// 35 µm copper, using the current-sheet formula.
    #[must_use]
    pub fn new(turns: Scalar, diam: Scalar, clearance: Scalar, trace_width: Scalar) -> Self {
        Self {
            turns,
            diam,
            clearance,
            trace_width,
            layers: 1,
            pcb_thickness: 1.6,
            copper_thickness: 0.035,
            shape: Shape::Circle,
            formula: Formula::CurrentSheet,
            ccw: false,
        }
    }

    /// Sets the outline.
    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the inductance formula.
    #[must_use]
    pub fn with_formula(mut self, formula: Formula) -> Self {
        self.formula = formula;
        self
    }

    /// Sets the layer count and board thickness.
    #[must_use]
    pub fn with_layers(mut self, layers: u32, pcb_thickness: Scalar) -> Self {
        self.layers = layers;
        self.pcb_thickness = pcb_thickness;
        self
    }

    /// Sets the copper foil thickness.
    #[must_use]
    pub fn with_copper_thickness(mut self, copper_thickness: Scalar) -> Self {
        self.copper_thickness = copper_thickness;
        self
    }

    /// Sets the winding direction.
    #[must_use]
    pub fn with_ccw(mut self, ccw: bool) -> Self {
        self.ccw = ccw;
        self
    }

    /// Copy of this spec with a different outer diameter.
    #[must_use]
    pub fn with_diam(&self, diam: Scalar) -> Self {
        Self {
            diam,
            ..self.clone()
        }
    }

    /// Checks every parameter and the shape/formula pairing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for non-positive dimensions, zero layers
    /// or a formula with no coefficients for the shape.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positive = [
            ("turns", self.turns),
            ("diam", self.diam),
            ("clearance", self.clearance),
            ("trace_width", self.trace_width),
            ("pcb_thickness", self.pcb_thickness),
            ("copper_thickness", self.copper_thickness),
        ];
        if let Some((name, value)) = positive
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(ConfigurationError::NonPositive { name, value });
        }
        if self.layers == 0 {
            return Err(ConfigurationError::NoLayers);
        }
        self.shape.coefficients(self.formula)?;
        Ok(())
    }

    /// Validates the spec and rejects coils whose spiral would collapse.
    ///
    /// Logs a warning when a discrete outline truncates a fractional turn count.
    ///
    /// # Errors
    ///
    /// Returns the configuration error from [`Self::validate`], or
    /// [`GeometryError::Degenerate`] when the inner diameter is not positive.
    pub fn check(&self) -> Result<(), CoilError> {
        self.validate()?;
        let whole = self.effective_turns();
        if whole != self.turns {
            warn!(
                shape = %self.shape,
                turns = self.turns,
                "{} coils take whole turns only; using {whole}",
                self.shape
            );
        }
        if !self.fits() {
            return Err(GeometryError::Degenerate {
                inner_diam: self.simple_inner_diam(),
            }
            .into());
        }
        Ok(())
    }

    /// True when the winding leaves a positive inner diameter.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.simple_inner_diam() > 0.0
    }

    /// Trace dimensions handed to the shape functions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.diam, self.clearance, self.trace_width)
    }

    /// Center-to-center pitch between adjacent turns.
    #[must_use]
    pub fn spacing(&self) -> Scalar {
        self.dimensions().spacing()
    }

    /// Turn count actually laid out: discrete outlines drop any fractional turn.
    #[must_use]
    pub fn effective_turns(&self) -> Scalar {
        if self.shape.is_discrete() {
            self.turns.trunc()
        } else {
            self.turns
        }
    }

    /// Step index at the end of the spiral.
    #[must_use]
    pub fn total_steps(&self) -> Scalar {
        self.shape.steps_per_turn() * self.effective_turns()
    }

    /// Inner diameter without the true-diameter correction.
    #[must_use]
    pub fn simple_inner_diam(&self) -> Scalar {
        self.shape
            .simple_inner_diam(self.effective_turns(), &self.dimensions())
    }

    /// Outer diameter in the convention of the inductance formulas.
    #[must_use]
    pub fn true_diam(&self) -> Scalar {
        self.shape.true_diam(&self.dimensions())
    }

    /// Inner diameter in the convention of the inductance formulas.
    #[must_use]
    pub fn true_inner_diam(&self) -> Scalar {
        self.shape
            .true_inner_diam(self.effective_turns(), &self.dimensions())
    }

    /// Distance between adjacent copper layers; zero for a single layer.
    #[must_use]
    pub fn layer_spacing(&self) -> Scalar {
        if self.layers <= 1 {
            return 0.0;
        }
        (self.pcb_thickness - self.copper_thickness) / Scalar::from(self.layers - 1)
    }

    /// Length of the trace leading from the center back out past the winding.
    ///
    /// Only needed with an odd layer count, where the spiral ends in the middle.
    #[must_use]
    pub fn return_trace_length(&self) -> Scalar {
        if self.layers % 2 == 0 {
            0.0
        } else {
            self.effective_turns() * self.spacing()
        }
    }
}

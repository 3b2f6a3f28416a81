//! Discretization of a coil into straight trace segments.

use tracing::{debug, warn};

use crate::antenna::{LoopAntenna, PadLayout, PaddedLoop};
use crate::coil::CoilSpec;
use crate::errors::{CoilError, ConfigurationError};
use crate::math::{segments_from_points, Point, Scalar, Segment};

/// Largest number of points a single rendered polyline may hold.
pub const MAX_RENDER_SAMPLES: usize = 1 << 24;

/// Sampling settings for rendering.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Angle between samples of the circular spiral, in radians.
    pub angular_resolution: Scalar,
    /// Rotate hexagons and octagons by half a corner so a flat edge faces up.
    pub rotate_polygons: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            angular_resolution: 5.0_f64.to_radians(),
            rotate_polygons: true,
        }
    }
}

impl RenderConfig {
    /// Configuration with a custom angular resolution for circular coils.
    #[must_use]
    pub fn with_angular_resolution(angular_resolution: Scalar) -> Self {
        Self {
            angular_resolution,
            ..Self::default()
        }
    }
}

/// Turns coil specs into polylines and closed-form trace lengths.
#[derive(Debug, Clone, Default)]
pub struct GeometryEngine {
    config: RenderConfig,
}

impl GeometryEngine {
    /// Creates an engine with the given sampling settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonPositive`] for a zero, negative or
    /// non-finite angular resolution.
    pub fn new(config: RenderConfig) -> Result<Self, ConfigurationError> {
        let resolution = config.angular_resolution;
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(ConfigurationError::NonPositive {
                name: "angular_resolution",
                value: resolution,
            });
        }
        Ok(Self { config })
    }

    /// Active sampling settings.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Points along the spiral, outermost first.
    ///
    /// `reverse_direction` mirrors the winding relative to `spec.ccw`.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid, the spiral would be degenerate or the
    /// angular resolution needs more than [`MAX_RENDER_SAMPLES`] samples.
    pub fn points(&self, spec: &CoilSpec, reverse_direction: bool) -> Result<Vec<Point>, CoilError> {
        spec.check()?;
        Ok(self.trace_points(spec, reverse_direction)?)
    }

    /// Renders the coil as a list of line segments, in millimeters.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid or the spiral would be degenerate.
    pub fn render(&self, spec: &CoilSpec, reverse_direction: bool) -> Result<Vec<Segment>, CoilError> {
        let points = self.points(spec, reverse_direction)?;
        Ok(segments_from_points(&points))
    }

    /// Like [`Self::render`], overriding the angular resolution for this call.
    ///
    /// The override only affects circular coils; for polygonal outlines it is
    /// ignored with a warning.
    ///
    /// # Errors
    ///
    /// Fails on an invalid resolution, an invalid spec or a degenerate spiral.
    pub fn render_with_resolution(
        &self,
        spec: &CoilSpec,
        reverse_direction: bool,
        angular_resolution: Scalar,
    ) -> Result<Vec<Segment>, CoilError> {
        if spec.shape.is_discrete() {
            warn!(shape = %spec.shape, "angular resolution override ignored, shape is not circular");
            return self.render(spec, reverse_direction);
        }
        let engine = Self::new(RenderConfig {
            angular_resolution,
            ..self.config
        })?;
        engine.render(spec, reverse_direction)
    }

    /// One polyline per copper layer. Odd layers are mirrored so consecutive
    /// layers wind the same way when viewed through the board and join end to end.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid or the spiral would be degenerate.
    pub fn render_layers(&self, spec: &CoilSpec) -> Result<Vec<Vec<Segment>>, CoilError> {
        spec.check()?;
        let top = segments_from_points(&self.trace_points(spec, false)?);
        if spec.layers == 1 {
            return Ok(vec![top]);
        }
        let mirrored = segments_from_points(&self.trace_points(spec, true)?);
        Ok((0..spec.layers)
            .map(|layer| {
                if layer % 2 == 0 {
                    top.clone()
                } else {
                    mirrored.clone()
                }
            })
            .collect())
    }

    /// Renders a single-turn loop antenna beside the coil.
    ///
    /// # Errors
    ///
    /// Fails when the coil spec is invalid or degenerate, or when the loop is
    /// not wider than the coil's trace width.
    pub fn render_loop(&self, spec: &CoilSpec, antenna: &LoopAntenna) -> Result<Vec<Segment>, CoilError> {
        spec.check()?;
        let segments = antenna.segments(spec)?;
        debug!(shape = ?antenna.shape, segments = segments.len(), "rendered loop antenna");
        Ok(segments)
    }

    /// Lays out a square loop with two pads around or inside the coil.
    ///
    /// # Errors
    ///
    /// Fails when the coil spec is invalid or degenerate.
    pub fn render_padded_loop(&self, spec: &CoilSpec, layout: PadLayout) -> Result<PaddedLoop, CoilError> {
        spec.check()?;
        Ok(PaddedLoop::layout(spec, layout))
    }

    /// Closed-form trace length of one layer, in millimeters.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid or the spiral would be degenerate.
    pub fn trace_length(&self, spec: &CoilSpec) -> Result<Scalar, CoilError> {
        spec.check()?;
        Ok(layer_length(spec))
    }

    /// Closed-form trace length summed over all layers, in millimeters.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid or the spiral would be degenerate.
    pub fn total_trace_length(&self, spec: &CoilSpec) -> Result<Scalar, CoilError> {
        Ok(self.trace_length(spec)? * Scalar::from(spec.layers))
    }

    /// Samples an already checked spec.
    fn trace_points(&self, spec: &CoilSpec, reverse_direction: bool) -> Result<Vec<Point>, ConfigurationError> {
        let dims = spec.dimensions();
        let reverse = spec.ccw ^ reverse_direction;
        let rotate = self.config.rotate_polygons;
        let (count, step) = self.sampling(spec)?;
        let points: Vec<Point> = (0..count)
            .map(|i| {
                spec.shape
                    .position_with_rotation(i as Scalar * step, &dims, reverse, rotate)
            })
            .collect();
        debug!(shape = %spec.shape, points = points.len(), "rendered coil");
        Ok(points)
    }

    /// Number of samples and step-index increment for `spec`.
    fn sampling(&self, spec: &CoilSpec) -> Result<(usize, Scalar), ConfigurationError> {
        // effective turns are whole for discrete shapes, so their step count is exact
        let step = if spec.shape.is_discrete() {
            1.0
        } else {
            self.config.angular_resolution
        };
        let steps = (spec.total_steps() / step).round();
        let too_fine = || ConfigurationError::TooFine {
            resolution: step,
            samples: steps + 1.0,
            limit: MAX_RENDER_SAMPLES,
        };
        if steps >= MAX_RENDER_SAMPLES as Scalar {
            return Err(too_fine());
        }
        let count = (steps as usize)
            .checked_add(1)
            .filter(|&count| count <= MAX_RENDER_SAMPLES)
            .ok_or_else(too_fine)?;
        Ok((count, step))
    }
}

/// Closed-form single-layer length without any validation.
pub(crate) fn layer_length(spec: &CoilSpec) -> Scalar {
    spec.shape.length(spec.total_steps(), &spec.dimensions())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::GeometryError;
    use crate::math::polyline_length;
    use crate::shape::Shape;

    #[test]
    fn discrete_render_has_one_segment_per_corner() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(5.0, 30.0, 0.3, 0.3).with_shape(Shape::Hexagon);
        let segments = engine.render(&spec, false).unwrap();
        assert_eq!(segments.len(), 30);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn circle_sample_count_follows_resolution() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(2.0, 30.0, 0.3, 0.3);
        // 2 turns at 5 degrees is 144 steps
        assert_eq!(engine.points(&spec, false).unwrap().len(), 145);
        let coarse = engine.render_with_resolution(&spec, false, PI / 2.0).unwrap();
        assert_eq!(coarse.len(), 8);
    }

    #[test]
    fn resolution_override_ignored_for_polygons() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(2.0, 30.0, 0.3, 0.3).with_shape(Shape::Square);
        let plain = engine.render(&spec, false).unwrap();
        let overridden = engine.render_with_resolution(&spec, false, 0.01).unwrap();
        assert_eq!(plain, overridden);
    }

    #[test]
    fn rejects_non_positive_resolution() {
        assert!(GeometryEngine::new(RenderConfig::with_angular_resolution(0.0)).is_err());
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(2.0, 30.0, 0.3, 0.3);
        assert!(engine.render_with_resolution(&spec, false, -1.0).is_err());
    }

    #[test]
    fn rejects_resolution_finer_than_sample_limit() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(1.0, 10.0, 0.5, 0.5);
        for resolution in [Scalar::MIN_POSITIVE, 1.0e-9] {
            match engine.render_with_resolution(&spec, false, resolution) {
                Err(CoilError::Configuration(ConfigurationError::TooFine { limit, samples, .. })) => {
                    assert_eq!(limit, MAX_RENDER_SAMPLES);
                    assert!(samples > MAX_RENDER_SAMPLES as Scalar);
                }
                other => panic!("expected a too-fine resolution error, got {other:?}"),
            }
        }
        let fine = engine.render_with_resolution(&spec, false, 1.0e-5).unwrap();
        assert_eq!(fine.len(), 628_319);
        let layers = GeometryEngine::new(RenderConfig::with_angular_resolution(1.0e-9))
            .unwrap()
            .render_layers(&spec);
        assert!(layers.is_err());
    }

    #[test]
    fn reverse_direction_matches_ccw_winding() {
        let engine = GeometryEngine::default();
        for shape in Shape::ALL {
            let spec = CoilSpec::new(3.0, 30.0, 0.3, 0.3).with_shape(shape);
            let forward = engine.points(&spec, false).unwrap();
            let backward = engine.points(&spec, true).unwrap();
            let ccw = engine.points(&spec.clone().with_ccw(true), false).unwrap();
            assert_eq!(backward, ccw, "{shape}: ccw and reversed render must match");
            for (a, b) in forward.iter().zip(&backward) {
                assert_relative_eq!(a.coords.norm(), b.coords.norm(), epsilon = 1.0e-9);
            }
        }
    }

    #[test]
    fn unrotated_reverse_mirrors_about_vertical_axis() {
        let engine = GeometryEngine::new(RenderConfig {
            rotate_polygons: false,
            ..RenderConfig::default()
        })
        .unwrap();
        for shape in Shape::ALL {
            let spec = CoilSpec::new(3.0, 30.0, 0.3, 0.3).with_shape(shape);
            let forward = engine.points(&spec, false).unwrap();
            let backward = engine.points(&spec, true).unwrap();
            for (a, b) in forward.iter().zip(&backward) {
                assert_relative_eq!(a.x, -b.x, epsilon = 1.0e-9);
                assert_relative_eq!(a.y, b.y, epsilon = 1.0e-9);
            }
        }
    }

    #[test]
    fn layers_alternate_winding() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(3.0, 30.0, 0.3, 0.3)
            .with_shape(Shape::Square)
            .with_layers(4, 1.6);
        let layers = engine.render_layers(&spec).unwrap();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0], layers[2]);
        assert_eq!(layers[1], layers[3]);
        assert_ne!(layers[0], layers[1]);
    }

    #[test]
    fn fractional_square_turns_are_truncated() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(2.6, 30.0, 0.3, 0.3).with_shape(Shape::Square);
        assert_eq!(engine.render(&spec, false).unwrap().len(), 8);
    }

    #[test]
    fn square_closed_form_matches_polyline() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(7.0, 40.0, 0.4, 0.6).with_shape(Shape::Square);
        let drawn = polyline_length(&engine.render(&spec, false).unwrap());
        assert_relative_eq!(engine.trace_length(&spec).unwrap(), drawn, max_relative = 1.0e-9);
    }

    #[test]
    fn total_length_scales_with_layers() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(4.0, 30.0, 0.3, 0.3).with_layers(2, 1.6);
        let single = engine.trace_length(&spec).unwrap();
        assert_relative_eq!(engine.total_trace_length(&spec).unwrap(), 2.0 * single);
    }

    #[test]
    fn loop_antennas_follow_the_coil() {
        use crate::antenna::{LoopShape, LOOP_SEGMENTS};

        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(5.0, 20.0, 0.5, 0.5);
        let circle = engine
            .render_loop(&spec, &LoopAntenna::new(LoopShape::Circle, 10.0))
            .unwrap();
        assert_eq!(circle.len(), LOOP_SEGMENTS);
        let square = engine
            .render_loop(&spec, &LoopAntenna::new(LoopShape::Square, 10.0))
            .unwrap();
        assert_eq!(square.len(), 4);
        assert_eq!(engine.render_padded_loop(&spec, PadLayout::Inset).unwrap().outline.len(), 4);

        let degenerate = CoilSpec::new(20.0, 20.0, 0.5, 0.5);
        assert!(matches!(
            engine.render_loop(&degenerate, &LoopAntenna::new(LoopShape::Circle, 10.0)),
            Err(CoilError::Geometry(GeometryError::Degenerate { .. }))
        ));
        assert!(engine.render_padded_loop(&degenerate, PadLayout::Surround).is_err());
    }

    #[test]
    fn degenerate_coil_is_not_rendered() {
        let engine = GeometryEngine::default();
        let spec = CoilSpec::new(20.0, 10.0, 0.5, 0.5).with_shape(Shape::Square);
        assert!(matches!(
            engine.render(&spec, false),
            Err(CoilError::Geometry(GeometryError::Degenerate { .. }))
        ));
    }
}

//! Convenience re-exports for designing coils.

pub use crate::antenna::{LoopAntenna, LoopShape, Pad, PadLayout, PaddedLoop};
pub use crate::coil::CoilSpec;
pub use crate::constants::*;
pub use crate::electrical::{
    fill_factor, inductance, layer_coupling_factor, multilayer_inductance, resistance,
    resonance_fit, resonance_fit_length, resonant_frequency, single_layer_inductance,
};
pub use crate::errors::{CoilError, ConfigurationError, GeometryError};
pub use crate::geometry::{GeometryEngine, RenderConfig, MAX_RENDER_SAMPLES};
pub use crate::math::{polyline_length, segment_length, Point, Scalar, Segment};
pub use crate::report::{file_stem, CoilReport};
pub use crate::shape::{Coefficients, Dimensions, Formula, Shape, ShapeRegistry};
pub use crate::solver::{FrequencySolution, FrequencySolver, SolverCriteria};
pub use crate::units::{copper_mm_to_oz, copper_oz_to_mm, mm_to_m};

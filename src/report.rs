//! Scalar summary of a coil for display and export metadata.

use std::fmt::Write as _;

use crate::coil::CoilSpec;
use crate::electrical;
use crate::errors::CoilError;
use crate::geometry::layer_length;
use crate::math::Scalar;

/// Electrical and geometric summary of one coil.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoilReport {
    /// DC resistance in ohms.
    pub resistance: Scalar,
    /// Inductance in henries.
    pub inductance: Scalar,
    /// Trace length over all layers, in millimeters.
    pub trace_length: Scalar,
    /// Estimated resonant frequency in MHz.
    pub resonant_frequency: Scalar,
    /// Inductance per resistance in µH/Ω.
    pub inductance_per_ohm: Scalar,
    /// Inductance per millimeter of outer radius in µH/mm.
    pub inductance_per_radius: Scalar,
    /// Base name for exported files.
    pub file_stem: String,
}

impl CoilReport {
    /// Evaluates every quantity for `spec`, validating it once.
    ///
    /// The resonant frequency is the empirical estimate of
    /// [`resonant_frequency`](crate::electrical::resonant_frequency), which
    /// takes no capacitance into account.
    ///
    /// # Errors
    ///
    /// Fails when the spec is invalid or the spiral would be degenerate.
    pub fn evaluate(spec: &CoilSpec) -> Result<Self, CoilError> {
        spec.check()?;
        let resistance = electrical::dc_resistance(spec);
        let inductance = electrical::coil_inductance(spec)?;
        let micro_henries = inductance * 1.0e6;
        Ok(Self {
            resistance,
            inductance,
            trace_length: layer_length(spec) * Scalar::from(spec.layers),
            resonant_frequency: electrical::resonance_fit(electrical::resonance_length(spec)),
            inductance_per_ohm: micro_henries / resistance,
            inductance_per_radius: micro_henries / (spec.diam / 2.0),
            file_stem: file_stem_with(spec, resistance, inductance),
        })
    }
}

/// Base name for exported files, e.g. `SQ_di20_tu10_wi500_cl500_cT35_Re412_In0`.
///
/// Widths and thicknesses are written in micrometers, resistance in
/// milliohms and inductance in microhenries, all truncated to integers.
///
/// # Errors
///
/// Fails when resistance or inductance cannot be computed for `spec`.
pub fn file_stem(spec: &CoilSpec) -> Result<String, CoilError> {
    spec.check()?;
    let resistance = electrical::dc_resistance(spec);
    let inductance = electrical::coil_inductance(spec)?;
    Ok(file_stem_with(spec, resistance, inductance))
}

fn file_stem_with(spec: &CoilSpec, resistance: Scalar, inductance: Scalar) -> String {
    let micro = |mm: Scalar| (mm * 1_000.0).trunc();
    let mut stem = format!(
        "{}_di{}_tu{}_wi{}_cl{}_cT{}",
        spec.shape.file_prefix(),
        spec.diam.trunc(),
        spec.effective_turns(),
        micro(spec.trace_width),
        micro(spec.clearance),
        micro(spec.copper_thickness),
    );
    if spec.layers > 1 {
        let _ = write!(stem, "_La{}_Pt{}", spec.layers, micro(spec.pcb_thickness));
    }
    let _ = write!(
        stem,
        "_Re{}_In{}",
        (resistance * 1_000.0).trunc(),
        (inductance * 1.0e6).trunc()
    );
    stem
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use approx::assert_relative_eq;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::geometry::GeometryEngine;
    use crate::shape::{Formula, Shape};

    #[test]
    fn file_stem_encodes_parameters() {
        let spec = CoilSpec::new(10.0, 20.0, 0.5, 0.5).with_shape(Shape::Square);
        let stem = file_stem(&spec).unwrap();
        assert_eq!(stem, "SQ_di20_tu10_wi500_cl500_cT35_Re412_In0");

        let stacked = spec.with_layers(2, 1.6);
        let stem = file_stem(&stacked).unwrap();
        assert!(stem.starts_with("SQ_di20_tu10_wi500_cl500_cT35_La2_Pt1600_Re"), "{stem}");
    }

    #[test]
    fn report_ratios_follow_components() {
        let spec = CoilSpec::new(4.0, 30.0, 0.4, 0.4)
            .with_shape(Shape::Octagon)
            .with_formula(Formula::Wheeler);
        let report = CoilReport::evaluate(&spec).unwrap();
        assert_relative_eq!(
            report.inductance_per_ohm,
            report.inductance * 1.0e6 / report.resistance,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            report.inductance_per_radius,
            report.inductance * 1.0e6 / 15.0,
            max_relative = 1.0e-12
        );
        assert_eq!(
            report.resonant_frequency,
            electrical::resonant_frequency(&spec, 1.0e-9).unwrap()
        );
        assert_eq!(
            report.trace_length,
            GeometryEngine::default().total_trace_length(&spec).unwrap()
        );
        assert_eq!(report.file_stem, file_stem(&spec).unwrap());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn truncation_warning_is_logged_once_per_report() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .with_max_level(Level::WARN)
            .finish();
        let spec = CoilSpec::new(4.5, 30.0, 0.4, 0.4).with_shape(Shape::Hexagon);
        tracing::subscriber::with_default(subscriber, || {
            CoilReport::evaluate(&spec).unwrap();
            file_stem(&spec).unwrap();
        });
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("whole turns only").count(), 2, "{output}");
    }
}

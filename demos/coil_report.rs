use pcb_coil::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CoilError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // 10 turns, 20 mm square, 0.5 mm traces and clearance
    let spec = CoilSpec::new(10.0, 20.0, 0.5, 0.5)
        .with_shape(Shape::Square)
        .with_formula(Formula::CurrentSheet);
    let report = CoilReport::evaluate(&spec)?;
    println!("{}", report.file_stem);
    println!("  resistance:       {:.4} ohm", report.resistance);
    println!("  inductance:       {:.4} uH", report.inductance * 1.0e6);
    println!("  trace length:     {:.2} mm", report.trace_length);
    println!("  resonance (fit):  {:.2} MHz", report.resonant_frequency);
    println!("  L/R:              {:.4} uH/ohm", report.inductance_per_ohm);
    println!("  L/radius:         {:.4} uH/mm", report.inductance_per_radius);

    println!("segment, x0(mm), y0(mm), x1(mm), y1(mm), length(mm)");
    let engine = GeometryEngine::default();
    for (i, segment) in engine.render(&spec, false)?.iter().enumerate() {
        let (a, b) = segment;
        println!(
            "{i}, {:.3}, {:.3}, {:.3}, {:.3}, {:.3}",
            a.x,
            a.y,
            b.x,
            b.y,
            segment_length(segment)
        );
    }

    let antenna = LoopAntenna::new(LoopShape::Circle, 10.0);
    let pickup = engine.render_loop(&spec, &antenna)?;
    println!(
        "10 mm pickup loop: {} segments, {:.2} mm of trace",
        pickup.len(),
        polyline_length(&pickup)
    );

    let solution = FrequencySolver::default().solve(&spec, 300.0)?;
    println!(
        "300 MHz needs a {:.3} mm outer diameter ({} iterations, converged: {}, feasible: {})",
        solution.diameter, solution.iterations, solution.converged, solution.feasible
    );
    Ok(())
}

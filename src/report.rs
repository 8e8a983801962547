//! Consumers of a finished (or partial) run: CSV export, a console listing
//! of positions, and the mass-to-marker-size scale used for plotting.

use std::io::Write;

use crate::body::Body;
use crate::trajectory::History;
use crate::vector::Vector;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Writes one CSV row per body per recorded sample, grouped by body.
pub fn write_csv<V: Vector, W: Write>(
    writer: W,
    bodies: &[Body<V>],
    history: &History<V>,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time", "body", "label", "mass"];
    header.extend(&AXES[..V::DIM]);
    header.extend(["speed", "acceleration"]);
    wtr.write_record(&header)?;

    for (index, (body, trajectory)) in bodies.iter().zip(history.trajectories()).enumerate() {
        let label = body.label.as_deref().unwrap_or_default();
        for sample in trajectory.samples() {
            let mut record = vec![
                sample.time.to_string(),
                (index + 1).to_string(),
                label.to_string(),
                body.mass.to_string(),
            ];
            record.extend(sample.position.to_vec().iter().map(f64::to_string));
            record.push(sample.speed.to_string());
            record.push(sample.acceleration.to_string());
            wtr.write_record(&record)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Lists every body's position at every recorded time:
///
/// ```text
/// Time: 0.010 seconds
/// Body 1: (0.03, -5)
/// ```
pub fn write_positions<V: Vector, W: Write>(
    mut out: W,
    history: &History<V>,
) -> std::io::Result<()> {
    for (step, time) in history.timestamps().iter().enumerate() {
        writeln!(out, "Time: {time:.3} seconds")?;
        for (index, trajectory) in history.trajectories().iter().enumerate() {
            let position = trajectory.samples()[step].position.to_vec();
            let coords = position
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "Body {}: ({coords})", index + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Marker size per mass: `ln(m / m_min) * 5 + 10`. The lightest body gets 10.
pub fn mass_scale(masses: &[f64]) -> Vec<f64> {
    let min = masses.iter().copied().fold(f64::INFINITY, f64::min);
    masses.iter().map(|m| (m / min).ln() * 5.0 + 10.0).collect()
}

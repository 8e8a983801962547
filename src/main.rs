use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nbody_trajectory::{
    BodySpec, DVec2, DVec3, Dimension, ScenarioFile, Simulation, SimulationConfig, StepCountRule,
    Vector, report, scenario,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Builtin {
    ThreeBody,
    Asteroids,
    SunIoApophis,
}

impl Builtin {
    fn bodies(self) -> Vec<BodySpec> {
        match self {
            Builtin::ThreeBody => scenario::three_body().iter().map(BodySpec::from).collect(),
            Builtin::Asteroids => scenario::asteroid_field().iter().map(BodySpec::from).collect(),
            Builtin::SunIoApophis => scenario::sun_io_apophis().iter().map(BodySpec::from).collect(),
        }
    }
}

/// Fixed-step N-body gravity simulation
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file (TOML format); overrides --builtin
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Built-in scenario to run when no file is given
    #[arg(short, long, value_enum, default_value = "three-body")]
    builtin: Builtin,

    /// Write every recorded sample to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Print every body's position at every step
    #[arg(short, long)]
    print: bool,

    /// Compute forces on the rayon thread pool
    #[arg(long)]
    rayon: bool,

    /// Use ceil(simulation_time / time_step) steps instead of the truncated count
    #[arg(long)]
    ceil_steps: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let ScenarioFile {
        simulation: mut config,
        bodies,
    } = match &args.scenario {
        Some(path) => ScenarioFile::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioFile {
            simulation: SimulationConfig::default(),
            bodies: args.builtin.bodies(),
        },
    };
    if args.ceil_steps {
        config.step_count_rule = StepCountRule::Ceiling;
    }

    match Dimension::of(&bodies)? {
        Dimension::Planar => run::<DVec2>(&bodies, config, &args),
        Dimension::Spatial => run::<DVec3>(&bodies, config, &args),
    }
}

fn run<V: Vector>(bodies: &[BodySpec], config: SimulationConfig, args: &Args) -> Result<()> {
    let mut sim = Simulation::<V>::from_specs(bodies, config)?;
    sim.set_use_rayon(args.rayon);

    let initial_momentum = sim.total_momentum();
    let initial_energy = sim.kinetic_energy() + sim.potential_energy();
    let outcome = sim.run().map(|_| ());

    // Samples recorded before a failure are still valid, so report them either way.
    if args.print {
        report::write_positions(io::stdout().lock(), sim.history())?;
    }
    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        report::write_csv(BufWriter::new(file), sim.bodies(), sim.history())?;
        info!("Wrote {} samples per body to {}", sim.history().sample_count(), path.display());
    }

    outcome.context("simulation stopped early")?;

    let energy = sim.kinetic_energy() + sim.potential_energy();
    info!(
        "Momentum drift {:e}, energy drift {:e}",
        (sim.total_momentum() - initial_momentum).mag(),
        energy - initial_energy
    );
    Ok(())
}

//! Physical and numerical properties of the integrator.

use approx::assert_relative_eq;
use nbody_trajectory::{
    Body, DVec2, DVec3, Gravity, Quantity, SimError, Simulation, SimulationConfig, Status, Vector,
    scenario,
};

const G: f64 = 6.67430e-11;

fn three_body_run() -> Simulation<DVec2> {
    Simulation::new(scenario::three_body(), SimulationConfig::new(0.01, 5.0)).unwrap()
}

#[test]
fn two_body_force_matches_closed_form() {
    let gravity = Gravity::new(G);
    for (m1, m2, d) in [(1.0, 1.0, 1.0), (1000.0, 1e12, 5.0), (3.5, 42.0, 0.125), (7.0, 9.0, 1e4)] {
        let bodies = vec![
            Body::new(DVec2::new(0.0, 0.0), DVec2::zero(), m1),
            Body::new(DVec2::new(d, 0.0), DVec2::zero(), m2),
        ];
        let force = gravity.force_on(0, &bodies);
        assert_relative_eq!(force.mag(), G * m1 * m2 / (d * d), max_relative = 1e-9);
    }
}

#[test]
fn forces_are_equal_and_opposite() {
    let gravity = Gravity::new(G);
    let configurations = [
        (DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 2.0, 3.0), 5.0, 7.0),
        (DVec3::new(-4.0, 0.5, 2.0), DVec3::new(3.0, -1.0, 0.0), 1e12, 1000.0),
        (DVec3::new(1e3, 1e3, 1e3), DVec3::new(-1e3, 2e3, 0.5), 0.01, 2.0),
    ];

    for (pa, pb, ma, mb) in configurations {
        let bodies = vec![Body::new(pa, DVec3::zero(), ma), Body::new(pb, DVec3::zero(), mb)];
        let fa = gravity.force_on(0, &bodies);
        let fb = gravity.force_on(1, &bodies);

        assert_relative_eq!(fa.mag(), fb.mag(), max_relative = 1e-12);
        assert_relative_eq!((fa + fb).mag() / fa.mag(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn lone_body_has_no_force() {
    let gravity = Gravity::new(G);
    let bodies = vec![Body::new(DVec3::new(4.0, 5.0, 6.0), DVec3::new(1.0, 0.0, 0.0), 1e30)];
    assert_eq!(gravity.force_on(0, &bodies), DVec3::zero());
}

#[test]
fn identical_runs_are_bit_identical() {
    let mut first = three_body_run();
    let mut second = three_body_run();
    first.run().unwrap();
    second.run().unwrap();

    assert_eq!(first.history(), second.history());
    assert_eq!(first.bodies(), second.bodies());
}

#[test]
fn rayon_force_phase_matches_sequential() {
    let config = SimulationConfig::new(0.01, 0.05).with_gravitational_constant(1.0);
    let bodies = scenario::uniform_disc(100, 1.0, 11);

    let mut sequential = Simulation::new(bodies.clone(), config).unwrap();
    let mut parallel = Simulation::new(bodies, config).unwrap();
    parallel.set_use_rayon(true);

    sequential.run().unwrap();
    parallel.run().unwrap();

    assert_eq!(sequential.completed_steps(), 5);
    assert_eq!(sequential.history(), parallel.history());
}

#[test]
fn five_seconds_at_hundredth_step_records_501_samples() {
    let mut sim = three_body_run();
    assert_eq!(sim.step_count(), 500);

    let history = sim.run().unwrap();
    assert_eq!(history.sample_count(), 501);
    for trajectory in history.trajectories() {
        assert_eq!(trajectory.len(), 501);
    }

    let timestamps = sim.timestamps();
    assert_eq!(timestamps.len(), 501);
    assert_eq!(sim.history().timestamps(), timestamps.as_slice());
    assert_eq!(timestamps[0], 0.0);
    assert_eq!(timestamps[250], 250.0 * 0.01);
    assert_eq!(sim.status(), Status::Complete);
}

#[test]
fn two_body_momentum_drift_is_bounded() {
    let bodies = vec![
        Body::new(DVec2::new(-1.0, 0.0), DVec2::new(0.5, 1.0), 2.0),
        Body::new(DVec2::new(1.0, 0.0), DVec2::new(0.0, -0.5), 1.0),
    ];
    let config = SimulationConfig::new(0.01, 1.0).with_gravitational_constant(1.0);
    let mut sim = Simulation::new(bodies, config).unwrap();
    assert_eq!(sim.step_count(), 100);

    let initial = sim.total_momentum();
    while sim.step().unwrap() {
        let drift = (sim.total_momentum() - initial).mag() / initial.mag();
        assert!(drift <= 0.01, "momentum drifted by {drift} at step {}", sim.completed_steps());
    }
}

#[test]
fn coincident_bodies_fail_on_first_step() {
    let bodies = vec![
        Body::new(DVec2::new(2.0, 2.0), DVec2::new(1.0, 0.0), 5.0),
        Body::new(DVec2::new(2.0, 2.0), DVec2::zero(), 5.0).with_label("twin"),
        Body::new(DVec2::new(9.0, 0.0), DVec2::zero(), 5.0),
    ];
    let mut sim = Simulation::new(bodies, SimulationConfig::default()).unwrap();

    let err = sim.step().unwrap_err();
    assert_eq!(
        err,
        SimError::DegenerateState {
            step: 1,
            body: 0,
            label: None,
            quantity: Quantity::Force,
        }
    );
    assert_eq!(sim.status(), Status::Failed);
    assert_eq!(sim.failure(), Some(&err));

    // Nothing non-finite reached the history or the bodies.
    assert_eq!(sim.history().sample_count(), 1);
    for trajectory in sim.history().trajectories() {
        let sample = trajectory.last().unwrap();
        assert!(sample.position.is_finite());
        assert!(sample.speed.is_finite());
    }
    assert_eq!(sim.bodies()[0].pos, DVec2::new(2.0, 2.0));
    assert_eq!(sim.completed_steps(), 0);

    // Failed is terminal.
    assert_eq!(sim.step().unwrap_err(), err);
    assert!(sim.run().is_err());
}

#[test]
fn samples_before_a_failure_stay_available() {
    // Without gravity the pair meets at the origin after two steps, so the
    // third step divides by a zero separation.
    let bodies = vec![
        Body::new(DVec2::new(-1.0, 0.0), DVec2::new(2.0, 0.0), 1.0),
        Body::new(DVec2::new(1.0, 0.0), DVec2::new(-2.0, 0.0), 1.0),
    ];
    let config = SimulationConfig::new(0.25, 1.0).with_gravitational_constant(0.0);
    let mut sim = Simulation::new(bodies, config).unwrap();

    assert!(sim.step().unwrap());
    assert!(sim.step().unwrap());
    let err = sim.step().unwrap_err();

    assert!(err.is_degenerate());
    assert_eq!(sim.status(), Status::Failed);
    assert_eq!(sim.completed_steps(), 2);
    assert_eq!(sim.history().sample_count(), 3);
    assert_eq!(sim.trajectory(0).unwrap().last().unwrap().position, DVec2::zero());
    assert_eq!(sim.trajectory(1).unwrap().samples()[1].position, DVec2::new(0.5, 0.0));
}

#[test]
fn three_body_first_step() {
    let mut sim = three_body_run();
    sim.step().unwrap();

    let a = &sim.bodies()[0];
    assert_eq!(a.pos, DVec2::new(0.0 + 3.0 * 0.01, -5.0 + 0.0 * 0.01));
    assert_eq!(a.pos, DVec2::new(0.03, -5.0));

    // Speed uses the updated velocity, acceleration the one that produced it.
    let sample = sim.trajectory(0).unwrap().samples()[1];
    assert_eq!(sample.time, 0.01);
    assert_eq!(sample.position, a.pos);
    assert_eq!(sample.speed, a.vel.mag());
    assert_eq!(sample.acceleration, a.acc.mag());
    assert!(sample.acceleration > 0.0);

    // Initial sample: initial speed, no acceleration yet.
    let initial = sim.trajectory(0).unwrap().samples()[0];
    assert_eq!(initial.speed, 3.0);
    assert_eq!(initial.acceleration, 0.0);

    // B starts at rest, so its position only moves once its velocity has.
    assert_eq!(sim.bodies()[1].pos, DVec2::zero());
    sim.step().unwrap();
    let b = sim.bodies()[1].pos;
    assert!(b != DVec2::zero());
    assert!(b.mag() < 1e-9, "heavy body moved {}", b.mag());
}

#[test]
fn three_body_runs_to_completion() {
    let mut sim = three_body_run();
    let history = sim.run().unwrap();

    for trajectory in history.trajectories() {
        assert!(trajectory.positions().all(|p| p.is_finite()));
        assert!(trajectory.speeds().all(f64::is_finite));
    }
    assert_eq!(history.trajectory(0).unwrap().accelerations().next(), Some(0.0));
}

#[test]
fn spatial_run_uses_the_same_engine() {
    let mut sim = Simulation::new(scenario::sun_io_apophis(), SimulationConfig::new(0.01, 1.0)).unwrap();
    sim.run().unwrap();

    let io = &sim.bodies()[0];
    assert_eq!(io.label.as_deref(), Some("Io"));
    assert!(io.pos.z < 0.0);
    assert_eq!(sim.history().sample_count(), 101);
}

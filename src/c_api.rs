use crate::{
    body::Body,
    config::SimulationConfig,
    simulation::Simulation,
};
use ultraviolet::DVec2;

/// Planar simulation handle handed across the C boundary.
pub type PlanarSimulation = Simulation<DVec2>;

pub const NBODY_STEPPED: i32 = 0;
pub const NBODY_COMPLETE: i32 = 1;
pub const NBODY_DEGENERATE: i32 = -1;
pub const NBODY_NULL_HANDLE: i32 = -2;

/// One recorded sample, flattened for C.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NBodySample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub acceleration: f64,
}

/// Builds a planar simulation from `count` bodies given as parallel arrays:
/// `positions` and `velocities` hold `2 * count` interleaved x/y values,
/// `masses` holds `count` values. Returns null if the inputs are invalid.
///
/// # Safety
/// Each array must be valid for reads of the length described above.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_Create(
    count: usize,
    positions: *const f64,
    velocities: *const f64,
    masses: *const f64,
    time_step: f64,
    simulation_time: f64,
    gravitational_constant: f64,
) -> *mut PlanarSimulation {
    if count > 0 && (positions.is_null() || velocities.is_null() || masses.is_null()) {
        return std::ptr::null_mut();
    }

    let bodies = if count == 0 {
        Vec::new()
    } else {
        // SAFETY: non-null and sized by the caller per the contract above.
        let (positions, velocities, masses) = unsafe {
            (
                std::slice::from_raw_parts(positions, 2 * count),
                std::slice::from_raw_parts(velocities, 2 * count),
                std::slice::from_raw_parts(masses, count),
            )
        };
        (0..count)
            .map(|i| {
                Body::new(
                    DVec2::new(positions[2 * i], positions[2 * i + 1]),
                    DVec2::new(velocities[2 * i], velocities[2 * i + 1]),
                    masses[i],
                )
            })
            .collect()
    };

    let config = SimulationConfig::new(time_step, simulation_time)
        .with_gravitational_constant(gravitational_constant);

    match Simulation::new(bodies, config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            tracing::warn!("NBody_Create rejected inputs: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must come from `NBody_Create` and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_Destroy(handle: *mut PlanarSimulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Takes one step. Returns one of the `NBODY_*` status codes.
///
/// # Safety
/// `handle` must be null or a live pointer from `NBody_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_Step(handle: *mut PlanarSimulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => match sim.step() {
            Ok(true) => NBODY_STEPPED,
            Ok(false) => NBODY_COMPLETE,
            Err(_) => NBODY_DEGENERATE,
        },
        None => NBODY_NULL_HANDLE,
    }
}

/// Runs every remaining step. Returns `NBODY_COMPLETE` or an error code.
///
/// # Safety
/// `handle` must be null or a live pointer from `NBody_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_Run(handle: *mut PlanarSimulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => match sim.run() {
            Ok(_) => NBODY_COMPLETE,
            Err(_) => NBODY_DEGENERATE,
        },
        None => NBODY_NULL_HANDLE,
    }
}

/// # Safety
/// `handle` must be null or a live pointer from `NBody_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_GetStepCount(handle: *const PlanarSimulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.step_count())
}

/// Samples recorded so far per body.
///
/// # Safety
/// `handle` must be null or a live pointer from `NBody_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_GetSampleCount(handle: *const PlanarSimulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.history().sample_count())
}

/// # Safety
/// `handle` must be null or a live pointer from `NBody_Create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_GetBodyCount(handle: *const PlanarSimulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Copies up to `capacity` samples of `body` into `out`. Returns the number
/// copied, or 0 for a null handle, null buffer or unknown body.
///
/// # Safety
/// `out` must be valid for writes of `capacity` samples.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn NBody_CopyTrajectory(
    handle: *const PlanarSimulation,
    body: usize,
    out: *mut NBodySample,
    capacity: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    let Some(trajectory) = sim.trajectory(body) else {
        return 0;
    };
    if out.is_null() || capacity == 0 {
        return 0;
    }

    // SAFETY: the caller guarantees `out` holds `capacity` samples.
    let out = unsafe { std::slice::from_raw_parts_mut(out, capacity) };
    let copied = trajectory.len().min(capacity);
    for (slot, sample) in out.iter_mut().zip(trajectory.samples()) {
        *slot = NBodySample {
            time: sample.time,
            x: sample.position.x,
            y: sample.position.y,
            speed: sample.speed,
            acceleration: sample.acceleration,
        };
    }
    copied
}

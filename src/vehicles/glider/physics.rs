use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::config::GliderConfig;
use super::state::{GliderControls, GliderState};
use crate::environment::{Airport, World};
use crate::utils::constants::*;
use crate::utils::math::{horizontal_speed, ms_to_kmh, rad_to_deg};

// Launch assist
const CABLE_LAUNCH_SPEED: f64 = 15.0; // [m/s]
const CABLE_THRUST_FACTOR: f64 = 1.5; // Multiple of weight
const CABLE_DURATION: f64 = 4.0; // [s]
const AEROTOW_LAUNCH_SPEED: f64 = 25.0; // [m/s]
const AEROTOW_THRUST_FACTOR: f64 = 1.2;
const AEROTOW_DURATION: f64 = 15.0; // [s]
const LAUNCH_CLIMB_BIAS: f64 = 0.3; // Floor on the thrust direction's y component

// Environmental force scaling
const THERMAL_FORCE_FACTOR: f64 = 0.5;
const TURBULENCE_FORCE_GAIN: f64 = 0.4;
const WIND_FORCE_FACTOR: f64 = 0.02;

// Stall recovery and ground handling
const STALL_NOSE_DOWN_RATE: f64 = 0.5; // Automatic pitch-down while stalled [rad/s]
const ROLLOUT_FRICTION: f64 = 3.0; // Rollout deceleration factor [1/s]
const GROUND_CLEARANCE: f64 = 1.0; // Contact height above terrain [m]

// Cap on accumulated wall-clock time, so a long frame hitch cannot queue an
// unbounded burst of physics steps.
const MAX_ACCUMULATED_TIME: f64 = 0.25; // [s]

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchType {
    /// Winch/ground-cable launch: slow, steep, short assist.
    Cable,
    /// Aerotow: faster initial speed, longer and gentler pull.
    Aerotow,
}

/// Outcome of a physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightOutcome {
    Flying,
    /// On a runway, decelerating through the rollout.
    Landing,
    Landed,
    Crashed,
}

/// Fixed-timestep flight integrator for a single glider.
///
/// Owns the [`GliderState`] and steps it against a [`World`]. The state
/// machine runs Launching -> Flying -> Landed | Crashed; `update` is a no-op
/// once landed or crashed until the next `launch`.
pub struct FlightDynamics {
    config: GliderConfig,
    state: GliderState,
    accumulator: f64,
    flight_time: f64,
    last_acceleration: Vector3<f64>,
}

impl FlightDynamics {
    pub fn new(config: GliderConfig) -> Self {
        Self {
            config,
            state: GliderState::default(),
            accumulator: 0.0,
            flight_time: 0.0,
            last_acceleration: Vector3::zeros(),
        }
    }

    pub fn config(&self) -> &GliderConfig {
        &self.config
    }

    /// Replaces the aerodynamic configuration without touching kinematics.
    pub fn set_config(&mut self, config: GliderConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &GliderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GliderState {
        &mut self.state
    }

    /// Writes pilot inputs, folding out-of-range values back into range.
    pub fn set_controls(&mut self, controls: GliderControls) {
        self.state.controls = controls.clamped();
    }

    /// Parks the glider at `airport`, aligned with the runway, landed.
    pub fn reset_at(&mut self, airport: &Airport) {
        let spoiled = self.state.cargo_spoiled;
        self.state = GliderState {
            position: Vector3::new(
                airport.position.x,
                airport.elevation + GROUND_CLEARANCE,
                airport.position.y,
            ),
            attitude: heading_attitude(airport.heading),
            cargo_spoiled: spoiled,
            ..GliderState::default()
        };
        self.accumulator = 0.0;
        self.flight_time = 0.0;
        self.last_acceleration = Vector3::zeros();
    }

    /// Releases the glider with initial speed and a timed launch assist.
    pub fn launch(&mut self, launch_type: LaunchType) {
        let (speed, thrust_factor, duration) = match launch_type {
            LaunchType::Cable => (CABLE_LAUNCH_SPEED, CABLE_THRUST_FACTOR, CABLE_DURATION),
            LaunchType::Aerotow => (AEROTOW_LAUNCH_SPEED, AEROTOW_THRUST_FACTOR, AEROTOW_DURATION),
        };

        let state = &mut self.state;
        state.landed = false;
        state.crashed = false;
        state.stalling = false;
        state.hot_exposure = 0.0;
        state.cargo_spoiled = false;
        state.velocity = state.forward() * speed;
        state.launch_thrust = self.config.total_mass() * GRAVITY * thrust_factor;
        state.launch_timer = duration;
    }

    /// Accumulates wall-clock time and drains it in whole fixed steps, so
    /// the simulation advances identically regardless of frame rate.
    pub fn step(&mut self, elapsed: f64, world: &World) -> FlightOutcome {
        self.accumulator = (self.accumulator + elapsed).min(MAX_ACCUMULATED_TIME);
        let mut outcome = self.resting_outcome();
        while self.accumulator >= PHYSICS_TIMESTEP {
            self.accumulator -= PHYSICS_TIMESTEP;
            outcome = self.update(PHYSICS_TIMESTEP, world);
        }
        outcome
    }

    /// One explicit-Euler physics tick. No-op while landed or crashed.
    pub fn update(&mut self, dt: f64, world: &World) -> FlightOutcome {
        if self.state.landed || self.state.crashed {
            return self.resting_outcome();
        }

        self.integrate_attitude(dt);

        let mass = self.config.total_mass();
        let forward = self.state.forward();
        let up = self.state.up();
        let speed = self.state.speed();

        // Below the airspeed threshold the velocity direction is numeric
        // noise; fall back to the body forward axis.
        let velocity_dir = if speed < MIN_AIRSPEED_THRESHOLD {
            forward
        } else {
            self.state.velocity / speed
        };

        let alpha = angle_of_attack(&velocity_dir, &forward, &up);
        let alpha_deg = rad_to_deg(alpha);
        let cl = lift_coefficient(alpha_deg);
        let cd = self.config.cd0
            + cl * cl
                / (std::f64::consts::PI * self.config.aspect_ratio * self.config.oswald_efficiency)
            + self.state.controls.brake * self.config.brake_drag;

        let mut force = Vector3::new(0.0, -mass * GRAVITY, 0.0);

        let dynamic_pressure = 0.5 * AIR_DENSITY * speed * speed;
        if speed >= MIN_AIRSPEED_THRESHOLD {
            // Lift acts along the component of body-up perpendicular to the
            // airflow; drag acts straight down the relative wind.
            let mut lift_dir = up - velocity_dir * up.dot(&velocity_dir);
            let lift_norm = lift_dir.norm();
            if lift_norm > 1e-9 {
                lift_dir /= lift_norm;
                force += lift_dir * (cl * dynamic_pressure * self.config.wing_area);
            }
            force -= velocity_dir * (cd * dynamic_pressure * self.config.wing_area);
        }

        if self.state.launch_timer > 0.0 {
            let mut thrust_dir = forward;
            thrust_dir.y = thrust_dir.y.max(LAUNCH_CLIMB_BIAS);
            force += thrust_dir.normalize() * self.state.launch_thrust;
            self.state.launch_timer -= dt;
        }

        let sample = world.thermal_lift(
            self.state.position.x,
            self.state.position.y,
            self.state.position.z,
        );
        force.y += sample.lift * mass * THERMAL_FORCE_FACTOR;

        let t = self.flight_time;
        force += Vector3::new((t * 2.3).sin(), (t * 3.1).sin(), (t * 2.9).cos())
            * (sample.turbulence * mass * TURBULENCE_FORCE_GAIN);

        let wind = world.wind();
        force += wind.horizontal_direction() * (wind.speed * mass * WIND_FORCE_FACTOR);

        self.state.ambient_temperature = sample.temperature;
        if sample.temperature > SPOILAGE_TEMPERATURE {
            self.state.hot_exposure += dt;
            if self.state.hot_exposure > SPOILAGE_EXPOSURE_LIMIT {
                self.state.cargo_spoiled = true;
            }
        }

        self.state.stalling = alpha_deg.abs() > STALL_ANGLE_DEG
            || speed < STALL_SPEED_MARGIN * self.config.stall_speed;
        if self.state.stalling && speed < self.config.stall_speed {
            // Automatic nose drop to regain airspeed.
            let nose_down =
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -STALL_NOSE_DOWN_RATE * dt);
            self.state.attitude *= nose_down;
            self.state.attitude.renormalize();
        }

        let acceleration = force / mass;
        self.state.velocity += acceleration * dt;
        let new_speed = self.state.speed();
        if new_speed > self.config.max_speed {
            self.state.velocity *= self.config.max_speed / new_speed;
        }
        self.state.position += self.state.velocity * dt;
        self.flight_time += dt;
        self.last_acceleration = acceleration;

        self.resolve_ground_contact(world, dt)
    }

    /// Landing/crash classification at terrain level. Skipped while launch
    /// assist is active: the cable or tug carries the glider through its
    /// ground roll.
    fn resolve_ground_contact(&mut self, world: &World, dt: f64) -> FlightOutcome {
        if self.state.launch_timer > 0.0 {
            return FlightOutcome::Flying;
        }

        let position = self.state.position;
        let ground = world.height_at(position.x, position.z);
        if position.y > ground + GROUND_CLEARANCE {
            return FlightOutcome::Flying;
        }

        let sink_rate = (-self.state.velocity.y).max(0.0);
        let ground_speed_kmh = ms_to_kmh(horizontal_speed(&self.state.velocity));
        let on_airport = world
            .airport_at(position.x, position.y, position.z)
            .is_some();

        if on_airport && sink_rate < MAX_LANDING_SINK_RATE && ground_speed_kmh < MAX_LANDING_SPEED_KMH
        {
            // Rollout: pinned to the runway, shedding speed to friction.
            self.state.position.y = ground + GROUND_CLEARANCE;
            self.state.velocity.y = 0.0;
            let decay = (1.0 - ROLLOUT_FRICTION * dt).max(0.0);
            self.state.velocity *= decay;

            if ms_to_kmh(horizontal_speed(&self.state.velocity)) < ROLLOUT_STOP_SPEED_KMH {
                self.state.velocity = Vector3::zeros();
                self.state.landed = true;
                return FlightOutcome::Landed;
            }
            return FlightOutcome::Landing;
        }

        // Off-airport, or outside the touchdown envelope.
        self.state.crashed = true;
        self.state.velocity = Vector3::zeros();
        self.state.position.y = ground + GROUND_CLEARANCE;
        FlightOutcome::Crashed
    }

    fn integrate_attitude(&mut self, dt: f64) {
        let controls = self.state.controls;
        // Body rates: pitch about +X (right), yaw about -Y, roll about -Z,
        // so positive inputs mean nose up, nose right, right wing down.
        let omega = Vector3::new(
            controls.pitch * self.config.pitch_rate,
            -controls.yaw * self.config.yaw_rate,
            -controls.roll * self.config.roll_rate,
        );
        self.state.angular_velocity = omega;

        let delta = UnitQuaternion::from_scaled_axis(omega * dt);
        self.state.attitude *= delta;
        // Repeated small-angle products drift off unit length.
        self.state.attitude.renormalize();
    }

    fn resting_outcome(&self) -> FlightOutcome {
        if self.state.crashed {
            FlightOutcome::Crashed
        } else if self.state.landed {
            FlightOutcome::Landed
        } else {
            FlightOutcome::Flying
        }
    }

    // Derived read-only accessors for UI and economy collaborators.

    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    pub fn speed_kmh(&self) -> f64 {
        ms_to_kmh(self.state.speed())
    }

    /// Climb rate, negative when descending [m/s]
    pub fn vertical_speed(&self) -> f64 {
        self.state.velocity.y
    }

    /// Altitude above sea level [m]
    pub fn altitude(&self) -> f64 {
        self.state.position.y
    }

    /// Load factor felt by the airframe, 1.0 in steady flight.
    pub fn g_force(&self) -> f64 {
        let felt = self.last_acceleration - Vector3::new(0.0, -GRAVITY, 0.0);
        felt.norm() / GRAVITY
    }

    pub fn forward(&self) -> Vector3<f64> {
        self.state.forward()
    }

    pub fn up(&self) -> Vector3<f64> {
        self.state.up()
    }

    pub fn right(&self) -> Vector3<f64> {
        self.state.right()
    }
}

/// Piecewise lift curve over attack angle in degrees: a thin-airfoil linear
/// region, a hard floor below -10 deg, and a post-stall falloff above 18 deg.
pub fn lift_coefficient(alpha_deg: f64) -> f64 {
    if alpha_deg < -10.0 {
        -0.4
    } else if alpha_deg > 18.0 {
        0.8 - 0.1 * (alpha_deg - 18.0)
    } else {
        (0.1 + 0.1 * alpha_deg).clamp(-0.5, 1.6)
    }
}

/// Signed angle between the velocity direction and body forward in the
/// pitch plane; positive when the airflow comes from below the nose.
fn angle_of_attack(
    velocity_dir: &Vector3<f64>,
    forward: &Vector3<f64>,
    up: &Vector3<f64>,
) -> f64 {
    (-velocity_dir.dot(up)).atan2(velocity_dir.dot(forward))
}

/// Attitude whose forward axis points along a world-plane heading angle
/// (the runway convention: heading 0 points along +x).
fn heading_attitude(heading: f64) -> UnitQuaternion<f64> {
    let direction = Vector3::new(heading.cos(), 0.0, heading.sin());
    let yaw = (-direction.x).atan2(-direction.z);
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
}

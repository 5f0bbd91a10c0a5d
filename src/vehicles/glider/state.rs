use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::constants::AMBIENT_AIR_TEMP;

/// Pilot inputs, clamped on write. Out-of-range values are folded back into
/// range rather than rejected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GliderControls {
    /// Elevator, [-1, 1], positive pitches up
    pub pitch: f64,
    /// Aileron, [-1, 1], positive rolls right
    pub roll: f64,
    /// Rudder, [-1, 1], positive yaws right
    pub yaw: f64,
    /// Airbrake, [0, 1]
    pub brake: f64,
}

impl GliderControls {
    pub fn clamped(self) -> Self {
        Self {
            pitch: self.pitch.clamp(-1.0, 1.0),
            roll: self.roll.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            brake: self.brake.clamp(0.0, 1.0),
        }
    }
}

/// Complete kinematic and flight state of the glider.
///
/// World frame is y-up; the body frame is forward -Z, up +Y, right +X.
/// Exclusively owned and mutated by [`super::physics::FlightDynamics`];
/// collaborators read it or write control inputs between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GliderState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub controls: GliderControls,

    /// Remaining launch assist time [s]
    pub launch_timer: f64,
    /// Launch assist thrust while the timer runs [N]
    pub launch_thrust: f64,

    pub stalling: bool,
    pub landed: bool,
    pub crashed: bool,

    /// Cumulative time spent in air hotter than the spoilage threshold [s]
    pub hot_exposure: f64,
    /// Set permanently once hot exposure passes the limit; cleared on launch
    pub cargo_spoiled: bool,
    /// Ambient temperature at the aircraft [deg C]
    pub ambient_temperature: f64,
}

impl Default for GliderState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            controls: GliderControls::default(),
            launch_timer: 0.0,
            launch_thrust: 0.0,
            stalling: false,
            landed: true,
            crashed: false,
            hot_exposure: 0.0,
            cargo_spoiled: false,
            ambient_temperature: AMBIENT_AIR_TEMP,
        }
    }
}

impl GliderState {
    /// Body forward axis in world coordinates.
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Body up axis in world coordinates.
    pub fn up(&self) -> Vector3<f64> {
        self.attitude * Vector3::new(0.0, 1.0, 0.0)
    }

    /// Body right axis in world coordinates.
    pub fn right(&self) -> Vector3<f64> {
        self.attitude * Vector3::new(1.0, 0.0, 0.0)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_controls_clamp_to_documented_ranges() {
        let controls = GliderControls {
            pitch: 2.0,
            roll: -3.0,
            yaw: 0.25,
            brake: -0.5,
        }
        .clamped();
        assert_relative_eq!(controls.pitch, 1.0);
        assert_relative_eq!(controls.roll, -1.0);
        assert_relative_eq!(controls.yaw, 0.25);
        assert_relative_eq!(controls.brake, 0.0);
    }

    #[test]
    fn test_body_axes_are_orthonormal() {
        let state = GliderState {
            attitude: UnitQuaternion::from_euler_angles(0.3, -0.7, 0.1),
            ..GliderState::default()
        };
        assert_relative_eq!(state.forward().norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.forward().dot(&state.up()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.forward().dot(&state.right()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_attitude_faces_negative_z() {
        let state = GliderState::default();
        assert_relative_eq!(state.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(state.up(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_yaw_rotates_forward_axis() {
        let state = GliderState {
            attitude: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
            ..GliderState::default()
        };
        // Quarter turn left about +Y takes -Z to -X.
        assert_relative_eq!(state.forward(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::errors::SimError;

/// Aerodynamic and handling configuration for a glider.
///
/// An immutable value type: callers build a complete config (the part/cargo
/// system composes one from part stats) and swap it wholesale via
/// `FlightDynamics::set_config`. There is no partial-mutation contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GliderConfig {
    /// Empty mass [kg]
    pub mass: f64,
    /// Carried cargo mass [kg]
    pub cargo_mass: f64,
    /// Wing reference area [m^2]
    pub wing_area: f64,
    /// Wing aspect ratio
    pub aspect_ratio: f64,
    /// Zero-lift parasitic drag coefficient
    pub cd0: f64,
    /// Oswald span efficiency factor
    pub oswald_efficiency: f64,
    /// Roll rate at full aileron [rad/s]
    pub roll_rate: f64,
    /// Pitch rate at full elevator [rad/s]
    pub pitch_rate: f64,
    /// Yaw rate at full rudder [rad/s]
    pub yaw_rate: f64,
    /// Never-exceed speed; velocity is clamped here [m/s]
    pub max_speed: f64,
    /// Stall speed [m/s]
    pub stall_speed: f64,
    /// Extra drag coefficient at full airbrake
    pub brake_drag: f64,
    /// Maximum cargo the airframe accepts [kg]
    pub cargo_capacity: f64,
}

impl Default for GliderConfig {
    fn default() -> Self {
        Self {
            mass: 250.0,
            cargo_mass: 0.0,
            wing_area: 12.0,
            aspect_ratio: 18.0,
            cd0: 0.016,
            oswald_efficiency: 0.85,
            roll_rate: 1.6,
            pitch_rate: 1.0,
            yaw_rate: 0.6,
            max_speed: 60.0,
            stall_speed: 12.0,
            brake_drag: 0.08,
            cargo_capacity: 120.0,
        }
    }
}

impl GliderConfig {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// All-up mass including cargo [kg]
    pub fn total_mass(&self) -> f64 {
        self.mass + self.cargo_mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_mass_includes_cargo() {
        let config = GliderConfig {
            mass: 240.0,
            cargo_mass: 60.0,
            ..GliderConfig::default()
        };
        assert_relative_eq!(config.total_mass(), 300.0);
    }

    #[test]
    fn test_unknown_yaml_fields_merge_over_defaults() {
        // Partial configs overlay defaults; unknown keys are ignored rather
        // than rejected.
        let yaml = "mass: 300.0\nfavourite_colour: blue\n";
        let config: GliderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_relative_eq!(config.mass, 300.0);
        assert_relative_eq!(config.wing_area, GliderConfig::default().wing_area);
    }
}

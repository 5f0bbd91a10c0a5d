use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::terrain::Biome;

pub const RUNWAY_LENGTH: f64 = 200.0; // [m]
pub const RUNWAY_WIDTH: f64 = 30.0; // [m]
pub const ALTITUDE_TOLERANCE: f64 = 10.0; // Occupancy test vertical slack [m]

/// Cyclic name list, indexed by airport id.
pub const AIRPORT_NAMES: [&str; 12] = [
    "Meadowfield",
    "Cloudbase",
    "Thermal Ridge",
    "Windmere",
    "High Plains",
    "Stonewick",
    "Gull Point",
    "Larkspur",
    "Summit Strip",
    "Fernhaven",
    "Driftwood",
    "Eagle Rest",
];

/// A placed airport. Immutable after world construction; the economy layer
/// attaches its own market state keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: u32,
    pub name: String,
    /// Runway centre in the world plane [m]
    pub position: DVec2,
    /// Runway elevation [m]
    pub elevation: f64,
    /// Runway heading [radians]
    pub heading: f64,
    pub runway_length: f64,
    pub runway_width: f64,
    /// Terrain biome the airport sits on
    pub biome: Biome,
}

impl Airport {
    /// Runway-local-frame rectangle test with an altitude tolerance band.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        if (y - self.elevation).abs() > ALTITUDE_TOLERANCE {
            return false;
        }
        self.contains_planar(x, z)
    }

    /// Rectangle test in the world plane only, ignoring altitude.
    pub fn contains_planar(&self, x: f64, z: f64) -> bool {
        let offset = DVec2::new(x, z) - self.position;
        // Rotate into the runway frame: local x along the runway heading.
        let along = DVec2::from_angle(self.heading);
        let across = along.perp();
        let local_x = offset.dot(along);
        let local_z = offset.dot(across);
        local_x.abs() <= self.runway_length / 2.0 && local_z.abs() <= self.runway_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn test_airport(heading: f64) -> Airport {
        Airport {
            id: 0,
            name: AIRPORT_NAMES[0].to_string(),
            position: DVec2::new(100.0, -50.0),
            elevation: 12.0,
            heading,
            runway_length: RUNWAY_LENGTH,
            runway_width: RUNWAY_WIDTH,
            biome: Biome::Plains,
        }
    }

    #[test]
    fn test_contains_centre_and_ends() {
        let airport = test_airport(0.0);
        assert!(airport.contains(100.0, 12.0, -50.0));
        // Along the runway: heading 0 points along +x.
        assert!(airport.contains(100.0 + 99.0, 12.0, -50.0));
        assert!(airport.contains(100.0 - 99.0, 12.0, -50.0));
        assert!(!airport.contains(100.0 + 101.0, 12.0, -50.0));
        // Across the runway.
        assert!(airport.contains(100.0, 12.0, -50.0 + 14.0));
        assert!(!airport.contains(100.0, 12.0, -50.0 + 16.0));
    }

    #[test]
    fn test_contains_respects_heading() {
        // Rotated a quarter turn, the long axis lies along z.
        let airport = test_airport(PI / 2.0);
        assert!(airport.contains(100.0, 12.0, -50.0 + 99.0));
        assert!(!airport.contains(100.0 + 99.0, 12.0, -50.0));
    }

    #[test]
    fn test_altitude_tolerance_band() {
        let airport = test_airport(0.0);
        assert!(airport.contains(100.0, 12.0 + 9.9, -50.0));
        assert!(!airport.contains(100.0, 12.0 + 10.1, -50.0));
        assert!(!airport.contains(100.0, 12.0 - 10.1, -50.0));
    }
}

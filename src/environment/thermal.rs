use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::terrain::Biome;
use crate::utils::rng::RandomStream;

/// A localized column of rising air.
///
/// Placed once at world construction and immutable after: strength peaks at
/// the centre, decays with a gaussian over the planar distance and fades
/// linearly with altitude up to `max_altitude`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalSource {
    /// Column centre in the world plane [m]
    pub position: DVec2,
    /// Peak core lift [m/s]
    pub strength: f64,
    /// Planar influence radius [m]
    pub radius: f64,
    /// Lift fades to zero at this altitude [m]
    pub max_altitude: f64,
    /// Core air temperature [deg C]
    pub temperature: f64,
    /// Turbulence factor in [0, 1]
    pub turbulence: f64,
    pub biome: Biome,
}

impl ThermalSource {
    /// Draw per-biome parameters from `stream`. Consumes exactly five draws.
    /// Island thermals are volcanic: strongest, hottest, most turbulent.
    pub fn generate(position: DVec2, biome: Biome, stream: &mut RandomStream) -> Self {
        let (strength, radius, max_altitude, temperature, turbulence) = match biome {
            Biome::Mountains => (
                stream.next_range(3.0, 7.0),
                stream.next_range(60.0, 160.0),
                stream.next_range(3000.0, 4000.0),
                stream.next_range(20.0, 28.0),
                stream.next_range(0.0, 0.3),
            ),
            Biome::Island => (
                stream.next_range(6.0, 12.0),
                stream.next_range(40.0, 100.0),
                stream.next_range(4000.0, 5000.0),
                stream.next_range(40.0, 55.0),
                stream.next_range(0.5, 1.0),
            ),
            // Plains ranges also cover the airport overlay case.
            _ => (
                stream.next_range(2.0, 5.0),
                stream.next_range(80.0, 200.0),
                stream.next_range(1500.0, 2000.0),
                stream.next_range(25.0, 35.0),
                stream.next_range(0.0, 0.3),
            ),
        };

        Self {
            position,
            strength,
            radius,
            max_altitude,
            temperature,
            turbulence,
            biome,
        }
    }

    /// Gaussian planar falloff in [0, 1]; sigma is half the radius.
    pub fn falloff(&self, planar_distance: f64) -> f64 {
        let sigma = self.radius * 0.5;
        (-planar_distance.powi(2) / (2.0 * sigma * sigma)).exp()
    }

    /// Lift contribution at a planar distance and altitude; zero outside the
    /// radius or above the column top.
    pub fn lift_at(&self, planar_distance: f64, altitude: f64) -> f64 {
        if planar_distance >= self.radius || altitude >= self.max_altitude {
            return 0.0;
        }
        let altitude_factor = (1.0 - altitude / self.max_altitude).max(0.0);
        self.strength * self.falloff(planar_distance) * altitude_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_thermal() -> ThermalSource {
        ThermalSource {
            position: DVec2::ZERO,
            strength: 4.0,
            radius: 100.0,
            max_altitude: 2000.0,
            temperature: 30.0,
            turbulence: 0.2,
            biome: Biome::Plains,
        }
    }

    #[test]
    fn test_lift_peaks_at_centre_and_cuts_off_at_radius() {
        let thermal = test_thermal();
        assert_relative_eq!(thermal.lift_at(0.0, 0.0), 4.0);
        assert!(thermal.lift_at(50.0, 0.0) > 0.0);
        assert_eq!(thermal.lift_at(100.0, 0.0), 0.0);
        assert_eq!(thermal.lift_at(250.0, 0.0), 0.0);
    }

    #[test]
    fn test_lift_fades_with_altitude() {
        let thermal = test_thermal();
        assert_relative_eq!(thermal.lift_at(0.0, 1000.0), 2.0);
        assert_eq!(thermal.lift_at(0.0, 2000.0), 0.0);
        assert_eq!(thermal.lift_at(0.0, 3000.0), 0.0);
    }

    #[test]
    fn test_generated_parameters_respect_biome_ranges() {
        let mut stream = RandomStream::new(11);
        for _ in 0..50 {
            let t = ThermalSource::generate(DVec2::ZERO, Biome::Island, &mut stream);
            assert!((6.0..12.0).contains(&t.strength));
            assert!((40.0..100.0).contains(&t.radius));
            assert!((4000.0..5000.0).contains(&t.max_altitude));
            assert!((40.0..55.0).contains(&t.temperature));
            assert!((0.5..1.0).contains(&t.turbulence));

            let t = ThermalSource::generate(DVec2::ZERO, Biome::Mountains, &mut stream);
            assert!((3.0..7.0).contains(&t.strength));

            let t = ThermalSource::generate(DVec2::ZERO, Biome::Plains, &mut stream);
            assert!((2.0..5.0).contains(&t.strength));
            assert!((1500.0..2000.0).contains(&t.max_altitude));
        }
    }
}

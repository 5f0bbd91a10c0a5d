use glam::DVec2;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::path::Path;

use super::airport::{Airport, AIRPORT_NAMES, RUNWAY_LENGTH, RUNWAY_WIDTH};
use super::terrain::{Biome, TerrainSampler};
use super::thermal::ThermalSource;
use crate::utils::constants::*;
use crate::utils::errors::SimError;
use crate::utils::rng::RandomStream;

// Placement streams are seeded at fixed offsets from the world seed so the
// airport layout, the thermal layout and the noise fields stay independent
// but all reproduce from the one seed.
const AIRPORT_SEED_OFFSET: u64 = 500;
const THERMAL_SEED_OFFSET: u64 = 700;

const TARGET_AIRPORTS: usize = 12;
const AIRPORT_MIN_SEPARATION: f64 = 1500.0;
const AIRPORT_MIN_DISTANCE: f64 = 1500.0;
const AIRPORT_MAX_DISTANCE: f64 = 7500.0;
const AIRPORT_PLACEMENT_ATTEMPTS: usize = 500;
const AIRPORT_MIN_ELEVATION: f64 = 5.0;

const THERMAL_ATTEMPTS: usize = 80;
const THERMAL_FIELD_RADIUS: f64 = 8000.0;

// Finite-difference step for the terrain surface normal [m]
const NORMAL_SAMPLE_STEP: f64 = 20.0;

/// Steady horizontal wind. Direction is normalized on use; only its
/// horizontal component matters for ridge lift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    pub direction: Vector3<f64>,
    /// Wind speed [m/s]
    pub speed: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            direction: Vector3::new(1.0, 0.0, 0.0),
            speed: 5.0,
        }
    }
}

impl WindConfig {
    pub fn calm() -> Self {
        Self {
            direction: Vector3::new(1.0, 0.0, 0.0),
            speed: 0.0,
        }
    }

    /// Unit horizontal wind direction, or zero when there is no wind.
    pub fn horizontal_direction(&self) -> Vector3<f64> {
        let horizontal = Vector3::new(self.direction.x, 0.0, self.direction.z);
        let norm = horizontal.norm();
        if norm < 1e-9 {
            return Vector3::zeros();
        }
        horizontal / norm
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    #[serde(default)]
    pub wind: WindConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            wind: WindConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Result of a rising-air query at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftSample {
    /// Net vertical air movement [m/s]
    pub lift: f64,
    /// Hottest nearby air [deg C]
    pub temperature: f64,
    /// Most turbulent nearby air, in [0, 1]
    pub turbulence: f64,
}

/// The procedurally generated world: terrain, airports and thermal field.
///
/// Everything is placed at construction and immutable after, so spatial
/// queries can be issued freely from any number of read-only call sites.
pub struct World {
    terrain: TerrainSampler,
    airports: Vec<Airport>,
    thermals: Vec<ThermalSource>,
    wind: WindConfig,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let terrain = TerrainSampler::new(config.seed);
        let airports = place_airports(&terrain, config.seed);
        let thermals = place_thermals(&terrain, config.seed);

        Self {
            terrain,
            airports,
            thermals,
            wind: config.wind,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(WorldConfig {
            seed,
            ..WorldConfig::default()
        })
    }

    /// Terrain elevation [m]
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.terrain.height_at(x, z)
    }

    /// Biome classification, with airports overlaid on the terrain biomes.
    pub fn biome_at(&self, x: f64, z: f64) -> Biome {
        if self
            .airports
            .iter()
            .any(|airport| airport.contains_planar(x, z))
        {
            return Biome::Airport;
        }
        self.terrain.biome_at(x, z)
    }

    /// Creation-ordered airports, ids 0..n-1.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn thermals(&self) -> &[ThermalSource] {
        &self.thermals
    }

    pub fn wind(&self) -> &WindConfig {
        &self.wind
    }

    /// The airport whose runway rectangle (and altitude band) contains the
    /// point, if any.
    pub fn airport_at(&self, x: f64, y: f64, z: f64) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|airport| airport.contains(x, y, z))
    }

    /// Rising-air query. Lift contributions from overlapping thermals sum;
    /// temperature and turbulence take the maximum falloff-scaled value of
    /// any contributing thermal, so stacked thermals cannot compound heat or
    /// turbulence the way they compound lift.
    pub fn thermal_lift(&self, x: f64, y: f64, z: f64) -> LiftSample {
        let biome = self.terrain.biome_at(x, z);
        if biome == Biome::Ocean {
            return LiftSample {
                lift: OCEAN_SINK_RATE,
                temperature: OCEAN_AIR_TEMP,
                turbulence: OCEAN_TURBULENCE,
            };
        }

        let mut lift = 0.0;
        let mut temperature = AMBIENT_AIR_TEMP;
        let mut turbulence: f64 = 0.0;

        for thermal in &self.thermals {
            let distance = thermal.position.distance(DVec2::new(x, z));
            let contribution = thermal.lift_at(distance, y);
            if contribution <= 0.0 {
                continue;
            }
            lift += contribution;
            let falloff = thermal.falloff(distance);
            temperature = temperature.max(thermal.temperature * falloff);
            turbulence = turbulence.max(thermal.turbulence * falloff);
        }

        if biome == Biome::Mountains {
            lift += self.ridge_lift(x, y, z);
        }

        LiftSample {
            lift,
            temperature,
            turbulence,
        }
    }

    /// Orographic lift on the windward face of sloped terrain, negative on
    /// the leeward face, fading out with height above ground.
    fn ridge_lift(&self, x: f64, y: f64, z: f64) -> f64 {
        let wind_dir = self.wind.horizontal_direction();
        if self.wind.speed <= 0.0 || wind_dir == Vector3::zeros() {
            return 0.0;
        }

        let height = self.terrain.height_at(x, z);
        let above_ground = y - height;
        if above_ground >= RIDGE_LIFT_CEILING {
            return 0.0;
        }

        let height_x = self.terrain.height_at(x + NORMAL_SAMPLE_STEP, z);
        let height_z = self.terrain.height_at(x, z + NORMAL_SAMPLE_STEP);
        let normal = Vector3::new(
            -(height_x - height) / NORMAL_SAMPLE_STEP,
            1.0,
            -(height_z - height) / NORMAL_SAMPLE_STEP,
        )
        .normalize();

        // The normal's horizontal part points down the slope, so the raw dot
        // with the wind is negative on the windward face. Flip it: wind
        // blowing up the slope deflects upward, leeward flow sinks.
        let windward = -wind_dir.dot(&normal);
        let fade = 1.0 - (above_ground / RIDGE_LIFT_CEILING).max(0.0);
        windward * self.wind.speed * RIDGE_LIFT_COEFFICIENT * fade
    }
}

fn place_airports(terrain: &TerrainSampler, seed: u64) -> Vec<Airport> {
    let mut stream = RandomStream::new(seed.wrapping_add(AIRPORT_SEED_OFFSET));
    let mut airports: Vec<Airport> = Vec::with_capacity(TARGET_AIRPORTS);

    // The origin airport anchors every world; the rest are scattered.
    airports.push(make_airport(terrain, 0, DVec2::ZERO, &mut stream));

    let mut attempts = 0;
    while airports.len() < TARGET_AIRPORTS && attempts < AIRPORT_PLACEMENT_ATTEMPTS {
        attempts += 1;

        let angle = stream.next_range(0.0, TAU);
        let distance = stream.next_range(AIRPORT_MIN_DISTANCE, AIRPORT_MAX_DISTANCE);
        let candidate = DVec2::new(angle.cos(), angle.sin()) * distance;

        if terrain.biome_at(candidate.x, candidate.y) == Biome::Ocean {
            continue;
        }
        let too_close = airports
            .iter()
            .any(|a| a.position.distance(candidate) < AIRPORT_MIN_SEPARATION);
        if too_close {
            continue;
        }

        let id = airports.len() as u32;
        airports.push(make_airport(terrain, id, candidate, &mut stream));
    }

    // Fewer than the target is an accepted outcome on island-poor seeds.
    airports
}

fn make_airport(
    terrain: &TerrainSampler,
    id: u32,
    position: DVec2,
    stream: &mut RandomStream,
) -> Airport {
    let heading = stream.next_range(0.0, PI);
    let elevation = terrain
        .height_at(position.x, position.y)
        .max(AIRPORT_MIN_ELEVATION);

    Airport {
        id,
        name: AIRPORT_NAMES[id as usize % AIRPORT_NAMES.len()].to_string(),
        position,
        elevation,
        heading,
        runway_length: RUNWAY_LENGTH,
        runway_width: RUNWAY_WIDTH,
        biome: terrain.biome_at(position.x, position.y),
    }
}

fn place_thermals(terrain: &TerrainSampler, seed: u64) -> Vec<ThermalSource> {
    let mut stream = RandomStream::new(seed.wrapping_add(THERMAL_SEED_OFFSET));
    let mut thermals = Vec::with_capacity(THERMAL_ATTEMPTS);

    // Fixed draw count, no retries: ocean draws are simply discarded, so a
    // watery seed yields a sparser thermal field.
    for _ in 0..THERMAL_ATTEMPTS {
        let angle = stream.next_range(0.0, TAU);
        let distance = stream.next_range(0.0, THERMAL_FIELD_RADIUS);
        let position = DVec2::new(angle.cos(), angle.sin()) * distance;

        let biome = terrain.biome_at(position.x, position.y);
        if biome == Biome::Ocean {
            continue;
        }

        thermals.push(ThermalSource::generate(position, biome, &mut stream));
    }

    thermals
}

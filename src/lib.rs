pub mod environment;
pub mod utils;
pub mod vehicles;

pub use environment::{Airport, Biome, LiftSample, NoiseField, TerrainSampler, ThermalSource, WindConfig, World, WorldConfig};
pub use utils::{RandomStream, SimError};
pub use vehicles::{FlightDynamics, FlightOutcome, GliderConfig, GliderControls, GliderState, LaunchType};

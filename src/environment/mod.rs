pub mod airport;
pub mod noise;
pub mod terrain;
pub mod thermal;
pub mod world;

pub use airport::Airport;
pub use noise::NoiseField;
pub use terrain::{Biome, TerrainSampler};
pub use thermal::ThermalSource;
pub use world::{LiftSample, WindConfig, World, WorldConfig};

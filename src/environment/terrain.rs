use serde::{Deserialize, Serialize};

use super::noise::NoiseField;

// Seed offsets keep the three fields independent while staying derivable
// from the single world seed.
const BIOME_SEED_OFFSET: u64 = 100;
const ISLAND_SEED_OFFSET: u64 = 200;

// Sample frequencies [1/m]
const BIOME_SCALE: f64 = 3e-4;
const ISLAND_SCALE: f64 = 2e-3;
const TERRAIN_SCALE: f64 = 8e-4;
const BASE_HEIGHT_SCALE: f64 = 1e-3;
const DETAIL_SCALE: f64 = 5e-3;
const RIDGE_SCALE: f64 = 1e-3;

const WATER_CUTOFF: f64 = -0.15;
const ISLAND_CUTOFF: f64 = 0.25;
const MOUNTAIN_CUTOFF: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Ocean,
    Plains,
    Mountains,
    Island,
    Airport,
}

/// Pure terrain functions over three independent noise fields.
///
/// Biome and height are both functions of (x, z) and the same three fields,
/// so for a fixed seed they always agree: the height function re-derives the
/// biome internally rather than taking it as an argument.
pub struct TerrainSampler {
    terrain: NoiseField,
    biome: NoiseField,
    island: NoiseField,
}

impl TerrainSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            terrain: NoiseField::new(seed),
            biome: NoiseField::new(seed.wrapping_add(BIOME_SEED_OFFSET)),
            island: NoiseField::new(seed.wrapping_add(ISLAND_SEED_OFFSET)),
        }
    }

    /// Terrain-level classification; never returns [`Biome::Airport`],
    /// airports are a world-level overlay.
    pub fn biome_at(&self, x: f64, z: f64) -> Biome {
        let b = self.biome.fbm(x * BIOME_SCALE, z * BIOME_SCALE, 4, 2.0, 0.5);
        if b < WATER_CUTOFF {
            if self.island_factor(x, z) > ISLAND_CUTOFF {
                return Biome::Island;
            }
            return Biome::Ocean;
        }

        let t = self
            .terrain
            .fbm(x * TERRAIN_SCALE, z * TERRAIN_SCALE, 4, 2.0, 0.5);
        if t > MOUNTAIN_CUTOFF {
            Biome::Mountains
        } else {
            Biome::Plains
        }
    }

    /// Terrain elevation [m]. Ocean floor is a constant below sea level so
    /// ditching always reads as a crash into water, never a landing.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let biome = self.biome_at(x, z);

        let base = self
            .terrain
            .fbm_default(x * BASE_HEIGHT_SCALE, z * BASE_HEIGHT_SCALE);
        let detail = self.terrain.fbm(x * DETAIL_SCALE, z * DETAIL_SCALE, 3, 2.0, 0.5) * 0.15;

        match biome {
            Biome::Ocean => -2.0,
            Biome::Plains => (base * 0.5 + 0.5) * 40.0 + detail * 10.0 + 5.0,
            Biome::Mountains => {
                let ridge = self.terrain.ridge(x * RIDGE_SCALE, z * RIDGE_SCALE, 5);
                (base * 0.5 + 0.5) * 120.0 + ridge * 200.0 + detail * 10.0 + 50.0
            }
            Biome::Island | Biome::Airport => {
                let rise = (self.island_factor(x, z) - ISLAND_CUTOFF).max(0.0) / (1.0 - ISLAND_CUTOFF);
                rise * 320.0 + detail * 10.0 + 3.0
            }
        }
    }

    fn island_factor(&self, x: f64, z: f64) -> f64 {
        self.island
            .fbm(x * ISLAND_SCALE, z * ISLAND_SCALE, 3, 2.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_terrain() {
        let a = TerrainSampler::new(12345);
        let b = TerrainSampler::new(12345);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let x: f64 = rng.gen_range(-9_000.0..9_000.0);
            let z: f64 = rng.gen_range(-9_000.0..9_000.0);
            assert_eq!(a.biome_at(x, z), b.biome_at(x, z));
            assert_eq!(a.height_at(x, z), b.height_at(x, z));
        }
    }

    #[test]
    fn test_origin_sample_is_stable_for_seed_12345() {
        // Pins the origin airport's site: exact float equality between two
        // independently constructed samplers.
        let a = TerrainSampler::new(12345);
        let b = TerrainSampler::new(12345);
        assert_eq!(a.height_at(0.0, 0.0), b.height_at(0.0, 0.0));
        assert_eq!(a.biome_at(0.0, 0.0), b.biome_at(0.0, 0.0));
    }

    #[test]
    fn test_height_ranges_per_biome() {
        let sampler = TerrainSampler::new(7);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2_000 {
            let x: f64 = rng.gen_range(-9_000.0..9_000.0);
            let z: f64 = rng.gen_range(-9_000.0..9_000.0);
            let h = sampler.height_at(x, z);
            match sampler.biome_at(x, z) {
                Biome::Ocean => assert_eq!(h, -2.0),
                Biome::Plains => assert!(h > 0.0 && h < 50.0, "plains height {}", h),
                Biome::Mountains => assert!(h > 40.0 && h < 400.0, "mountain height {}", h),
                Biome::Island => assert!(h > 0.0 && h < 330.0, "island height {}", h),
                Biome::Airport => unreachable!("terrain sampler never yields Airport"),
            }
        }
    }

    #[test]
    fn test_all_land_biomes_appear() {
        // With an 18km-square sample every non-airport biome should show up.
        let sampler = TerrainSampler::new(99);
        let mut seen_ocean = false;
        let mut seen_plains = false;
        let mut seen_mountains = false;
        let mut step = 0;
        while step < 10_000 && !(seen_ocean && seen_plains && seen_mountains) {
            let x = ((step % 100) as f64 - 50.0) * 180.0;
            let z = ((step / 100) as f64 - 50.0) * 180.0;
            match sampler.biome_at(x, z) {
                Biome::Ocean => seen_ocean = true,
                Biome::Plains => seen_plains = true,
                Biome::Mountains => seen_mountains = true,
                _ => {}
            }
            step += 1;
        }
        assert!(seen_ocean && seen_plains && seen_mountains);
    }
}

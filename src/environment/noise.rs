use crate::utils::rng::RandomStream;
use std::f64::consts::TAU;

const TABLE_SIZE: usize = 256;
const TABLE_MASK: usize = TABLE_SIZE - 1;

/// 2D gradient noise over a shuffled permutation table.
///
/// Immutable once built: the permutation and gradient tables are derived
/// from a [`RandomStream`] seeded with the field's own seed, so two fields
/// with the same seed sample identically forever.
pub struct NoiseField {
    perm: [usize; TABLE_SIZE * 2],
    gradients: [(f64, f64); TABLE_SIZE],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut stream = RandomStream::new(seed);

        // Fisher-Yates shuffle of the identity permutation.
        let mut table = [0usize; TABLE_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i;
        }
        for i in (1..TABLE_SIZE).rev() {
            let j = stream.next_int(0, (i + 1) as i64) as usize;
            table.swap(i, j);
        }

        // Doubled so corner hashing never needs an explicit wrap.
        let mut perm = [0usize; TABLE_SIZE * 2];
        for i in 0..TABLE_SIZE * 2 {
            perm[i] = table[i & TABLE_MASK];
        }

        let mut gradients = [(0.0, 0.0); TABLE_SIZE];
        for grad in gradients.iter_mut() {
            let angle = stream.next() * TAU;
            *grad = (angle.cos(), angle.sin());
        }

        Self { perm, gradients }
    }

    /// Point sample, approximately in [-1, 1] (not hard-clamped).
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & TABLE_MASK as i64) as usize;
        let yi = (yf as i64 & TABLE_MASK as i64) as usize;
        let dx = x - xf;
        let dy = y - yf;

        let u = fade(dx);
        let v = fade(dy);

        let g00 = self.corner_gradient(xi, yi);
        let g10 = self.corner_gradient(xi + 1, yi);
        let g01 = self.corner_gradient(xi, yi + 1);
        let g11 = self.corner_gradient(xi + 1, yi + 1);

        let n00 = g00.0 * dx + g00.1 * dy;
        let n10 = g10.0 * (dx - 1.0) + g10.1 * dy;
        let n01 = g01.0 * dx + g01.1 * (dy - 1.0);
        let n11 = g11.0 * (dx - 1.0) + g11.1 * (dy - 1.0);

        let nx0 = n00 + u * (n10 - n00);
        let nx1 = n01 + u * (n11 - n01);
        nx0 + v * (nx1 - nx0)
    }

    /// Fractal Brownian motion: octave sum normalized by accumulated
    /// amplitude, so the output stays approximately in [-1, 1].
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, lacunarity: f64, gain: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        let mut weight = 0.0;

        for _ in 0..octaves {
            total += self.noise2d(x * frequency, y * frequency) * amplitude;
            weight += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }

        total / weight
    }

    /// `fbm` with the standard parameters (6 octaves, lacunarity 2, gain 0.5).
    pub fn fbm_default(&self, x: f64, y: f64) -> f64 {
        self.fbm(x, y, 6, 2.0, 0.5)
    }

    /// Ridged multifractal variant, approximately in [0, 1]. Peaks follow
    /// the zero-crossings of the underlying noise, which reads as connected
    /// mountain ridgelines rather than isolated bumps.
    pub fn ridge(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        let mut weight = 0.0;

        for _ in 0..octaves {
            let mut n = 1.0 - self.noise2d(x * frequency, y * frequency).abs();
            n *= n;
            total += n * amplitude;
            weight += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        total / weight
    }

    fn corner_gradient(&self, xi: usize, yi: usize) -> (f64, f64) {
        let hash = self.perm[self.perm[xi & TABLE_MASK] + (yi & TABLE_MASK)];
        self.gradients[hash & TABLE_MASK]
    }
}

/// Smootherstep fade, zero first and second derivatives at the endpoints.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

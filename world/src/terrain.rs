//! Seeded terrain generation used when the world is (re)configured.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wayfinder_core::{GridDimensions, TerrainGrid, TerrainKind};

const NOISE_SCALE: f64 = 0.128;
const OPEN_BELOW: f64 = 0.2;
const OBSTACLE_BELOW: f64 = 0.4;
const PERMUTATION_LEN: usize = 256;

/// Source of terrain for a freshly sized world.
pub trait TerrainGenerator {
    /// Produces a grid with exactly the requested dimensions.
    fn generate(&self, dimensions: GridDimensions) -> TerrainGrid;
}

/// Banded gradient-noise terrain.
///
/// Noise below `0.2` becomes open ground, below `0.4` an obstacle, and
/// anything higher rock. Identical seeds always produce identical grids.
#[derive(Clone, Debug)]
pub struct NoiseTerrain {
    noise: GradientNoise,
}

impl NoiseTerrain {
    /// Creates a generator whose permutation table is derived from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            noise: GradientNoise::seeded(seed),
        }
    }

    fn classify(value: f64) -> TerrainKind {
        if value < OPEN_BELOW {
            TerrainKind::Open
        } else if value < OBSTACLE_BELOW {
            TerrainKind::Obstacle
        } else {
            TerrainKind::Rock
        }
    }
}

impl TerrainGenerator for NoiseTerrain {
    fn generate(&self, dimensions: GridDimensions) -> TerrainGrid {
        TerrainGrid::from_fn(dimensions, |position| {
            let value = self.noise.sample(
                f64::from(position.x()) * NOISE_SCALE,
                f64::from(position.y()) * NOISE_SCALE,
            );
            Self::classify(value)
        })
    }
}

/// Classic 2D gradient noise over a shuffled permutation table.
#[derive(Clone, Debug)]
struct GradientNoise {
    permutation: [u8; PERMUTATION_LEN],
}

impl GradientNoise {
    fn seeded(seed: u64) -> Self {
        let mut permutation = [0_u8; PERMUTATION_LEN];
        for (value, slot) in (0..=u8::MAX).zip(permutation.iter_mut()) {
            *slot = value;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        permutation.shuffle(&mut rng);
        Self { permutation }
    }

    fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xf = x - x_floor;
        let yf = y - y_floor;
        let xi = lattice(x_floor);
        let yi = lattice(y_floor);

        let u = fade(xf);
        let v = fade(yf);

        let bottom = lerp(
            gradient(self.hash(xi, yi), xf, yf),
            gradient(self.hash(xi + 1, yi), xf - 1.0, yf),
            u,
        );
        let top = lerp(
            gradient(self.hash(xi, yi + 1), xf, yf - 1.0),
            gradient(self.hash(xi + 1, yi + 1), xf - 1.0, yf - 1.0),
            u,
        );
        lerp(bottom, top, v)
    }

    fn hash(&self, x: usize, y: usize) -> u8 {
        let first = usize::from(self.permutation[x % PERMUTATION_LEN]);
        self.permutation[(first + y) % PERMUTATION_LEN]
    }
}

fn lattice(coordinate: f64) -> usize {
    // Scaled grid indices are small and non-negative.
    (coordinate as i64).rem_euclid(PERMUTATION_LEN as i64) as usize
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn gradient(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => x - y,
        2 => -x + y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Discrete Bayes localization over the toroidal terrain grid.
//!
//! The [`BeliefFilter`] keeps one probability per cell. Each tick it
//! reweights those probabilities by comparing every cell's 7×7 terrain
//! [`Fingerprint`] against the fingerprint at the agent's true position,
//! then translates the distribution by the agent's move and blurs it with a
//! [`DiffusionKernel`]. Every window, shift, and convolution wraps at the
//! grid edges.

mod diffusion;
mod fingerprint;

pub use diffusion::{normalize, DiffusionKernel, Normalization};
pub use fingerprint::{Fingerprint, SENSOR_RADIUS};

use fingerprint::FingerprintCache;
use thiserror::Error;
use tracing::{trace, warn};
use wayfinder_core::{
    BeliefView, ConfigError, GridDelta, GridDimensions, Position, SensorModel, SimulationConfig,
    TerrainView,
};

/// Reasons externally supplied beliefs are rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BeliefError {
    /// The number of values does not match the grid.
    #[error("belief has {actual} values but the grid has {expected} cells")]
    LengthMismatch {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A value is negative or not finite.
    #[error("belief value {value} at index {index} is not a valid probability mass")]
    InvalidMass {
        /// Row-major index of the offending value.
        index: usize,
        /// Rejected value.
        value: f64,
    },
}

/// Probability distribution over the agent's location.
#[derive(Debug)]
pub struct BeliefFilter {
    dimensions: GridDimensions,
    sensor: SensorModel,
    kernel: DiffusionKernel,
    belief: Vec<f64>,
    scratch: Vec<f64>,
    fingerprints: FingerprintCache,
}

impl BeliefFilter {
    /// Creates a filter holding a uniform belief over `dimensions`.
    #[must_use]
    pub fn new(dimensions: GridDimensions, sensor: SensorModel, kernel: DiffusionKernel) -> Self {
        let mut filter = Self {
            dimensions,
            sensor,
            kernel,
            belief: Vec::new(),
            scratch: Vec::new(),
            fingerprints: FingerprintCache::default(),
        };
        filter.reset(dimensions);
        filter
    }

    /// Creates a filter from validated simulation parameters.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.dimensions(),
            config.sensor_model(),
            DiffusionKernel::new(config.blur),
        ))
    }

    /// Replaces the belief with a uniform distribution over `dimensions`.
    pub fn reset(&mut self, dimensions: GridDimensions) {
        let cells = dimensions.cell_count();
        let uniform = 1.0 / cells.max(1) as f64;

        self.dimensions = dimensions;
        self.belief.clear();
        self.belief.resize(cells, uniform);
        self.scratch.clear();
        self.scratch.resize(cells, 0.0);
    }

    /// Replaces the belief with caller-provided masses and renormalizes them.
    pub fn load(&mut self, values: &[f64]) -> Result<Normalization, BeliefError> {
        if values.len() != self.belief.len() {
            return Err(BeliefError::LengthMismatch {
                expected: self.belief.len(),
                actual: values.len(),
            });
        }

        if let Some((index, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(BeliefError::InvalidMass { index, value });
        }

        self.belief.copy_from_slice(values);
        Ok(normalize(&mut self.belief))
    }

    /// Reweights every cell against the terrain seen from `truth`.
    ///
    /// Cells whose fingerprint equals the one at `truth` are multiplied by
    /// `p_hit`, all others by `p_miss`, and the grid is renormalized. A belief
    /// sized for a different grid is first reset to uniform.
    pub fn sense(&mut self, terrain: TerrainView<'_>, truth: Position) -> Normalization {
        if terrain.dimensions() != self.dimensions {
            self.reset(terrain.dimensions());
        }

        let reference = Fingerprint::capture(terrain, truth);
        let prints = self.fingerprints.refresh(terrain);

        let mut matches = 0_usize;
        for (value, print) in self.belief.iter_mut().zip(prints) {
            let matched = *print == reference;
            matches += usize::from(matched);
            *value *= self.sensor.weight(matched);
        }
        trace!(
            truth_x = truth.x(),
            truth_y = truth.y(),
            matches,
            "sensed terrain"
        );

        let outcome = normalize(&mut self.belief);
        if outcome.is_reset() {
            warn!(
                truth_x = truth.x(),
                truth_y = truth.y(),
                "sensing erased all belief mass; reset to uniform"
            );
        }
        outcome
    }

    /// Translates the whole distribution by `delta`, wrapping at the edges.
    ///
    /// The mass at `(x, y)` moves to `(x + dx mod rows, y + dy mod cols)`.
    /// No mass is created or lost and nothing is renormalized.
    pub fn shift(&mut self, delta: GridDelta) {
        if delta.is_zero() {
            return;
        }

        for (position, mass) in self.dimensions.positions().zip(self.belief.iter().copied()) {
            let target = self
                .dimensions
                .offset(position, delta)
                .and_then(|target| self.dimensions.key(target));
            if let Some(slot) = target.and_then(|key| self.scratch.get_mut(key.index())) {
                *slot = mass;
            }
        }

        std::mem::swap(&mut self.belief, &mut self.scratch);
    }

    /// Convolves the belief with the diffusion kernel and renormalizes.
    pub fn diffuse(&mut self) -> Normalization {
        self.scratch.fill(0.0);

        for (position, mass) in self.dimensions.positions().zip(self.belief.iter().copied()) {
            if mass == 0.0 {
                continue;
            }

            for dx in -1_i64..=1 {
                for dy in -1_i64..=1 {
                    let weight = self.kernel.weight(dx, dy);
                    if weight == 0.0 {
                        continue;
                    }

                    let target = self
                        .dimensions
                        .wrap(i64::from(position.x()) + dx, i64::from(position.y()) + dy)
                        .and_then(|target| self.dimensions.key(target));
                    if let Some(slot) = target.and_then(|key| self.scratch.get_mut(key.index())) {
                        *slot += mass * weight;
                    }
                }
            }
        }

        std::mem::swap(&mut self.belief, &mut self.scratch);

        let outcome = normalize(&mut self.belief);
        if outcome.is_reset() {
            warn!("diffusion produced a degenerate belief; reset to uniform");
        }
        outcome
    }

    /// Applies the motion update for a tick: [`shift`](Self::shift) then
    /// [`diffuse`](Self::diffuse). A zero delta still blurs.
    pub fn shift_and_diffuse(&mut self, delta: GridDelta) -> Normalization {
        self.shift(delta);
        self.diffuse()
    }

    /// Read-only view of the current belief.
    #[must_use]
    pub fn view(&self) -> BeliefView<'_> {
        BeliefView::new(self.dimensions, &self.belief)
    }

    /// Most probable position and its probability.
    #[must_use]
    pub fn most_likely(&self) -> Option<(Position, f64)> {
        self.view().most_likely()
    }

    /// Dimensions the belief is sized for.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }
}

//! Blur kernel and mass normalization.

/// Outcome of renormalizing a belief grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// Every value was divided by a positive, finite total.
    Normalized,
    /// The total was zero or not finite, so the grid was replaced by a
    /// uniform distribution.
    ResetToUniform,
}

impl Normalization {
    /// Reports whether the grid had to be reset.
    #[must_use]
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::ResetToUniform)
    }
}

/// Rescales `values` so they sum to one.
///
/// A total that is zero, negative, or not finite cannot be divided out; the
/// values are replaced by `1 / len` instead.
pub fn normalize(values: &mut [f64]) -> Normalization {
    let total: f64 = values.iter().sum();
    if total.is_finite() && total > 0.0 {
        for value in values.iter_mut() {
            *value /= total;
        }
        return Normalization::Normalized;
    }

    let uniform = 1.0 / values.len().max(1) as f64;
    values.fill(uniform);
    Normalization::ResetToUniform
}

/// Symmetric 3×3 kernel parameterised by a blur factor `b`.
///
/// The centre keeps `1 - b`, each orthogonal neighbour receives `b / 6` and
/// each diagonal neighbour `b / 12`, so the weights sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffusionKernel {
    centre: f64,
    adjacent: f64,
    corner: f64,
}

impl DiffusionKernel {
    /// Builds the kernel for the provided blur factor.
    ///
    /// The factor is clamped to `[0, 1]` and a non-finite factor disables
    /// blurring, so no weight is ever negative.
    #[must_use]
    pub fn new(blur: f64) -> Self {
        let blur = if blur.is_finite() {
            blur.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            centre: 1.0 - blur,
            adjacent: blur / 6.0,
            corner: blur / 12.0,
        }
    }

    /// Weight at offset `(dx, dy)` from the centre; zero outside the 3×3 window.
    #[must_use]
    pub fn weight(&self, dx: i64, dy: i64) -> f64 {
        match (dx.abs(), dy.abs()) {
            (0, 0) => self.centre,
            (0, 1) | (1, 0) => self.adjacent,
            (1, 1) => self.corner,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_weights_sum_to_one() {
        for blur in [0.0, 0.25, 0.5, 1.0] {
            let kernel = DiffusionKernel::new(blur);
            let total: f64 = (-1..=1)
                .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
                .map(|(dx, dy)| kernel.weight(dx, dy))
                .sum();
            assert!((total - 1.0).abs() < 1e-12, "blur {blur} sums to {total}");
        }
    }

    #[test]
    fn kernel_weights_follow_blur_factor() {
        let kernel = DiffusionKernel::new(0.6);
        assert!((kernel.weight(0, 0) - 0.4).abs() < 1e-12);
        assert!((kernel.weight(0, -1) - 0.1).abs() < 1e-12);
        assert!((kernel.weight(1, 1) - 0.05).abs() < 1e-12);
        assert_eq!(kernel.weight(2, 0), 0.0);
    }

    #[test]
    fn out_of_range_blur_is_clamped() {
        assert_eq!(DiffusionKernel::new(1.5), DiffusionKernel::new(1.0));
        assert_eq!(DiffusionKernel::new(-0.5), DiffusionKernel::new(0.0));
        assert_eq!(DiffusionKernel::new(f64::NAN), DiffusionKernel::new(0.0));
        assert_eq!(DiffusionKernel::new(f64::INFINITY), DiffusionKernel::new(0.0));

        let kernel = DiffusionKernel::new(2.0);
        for dx in -1..=1 {
            for dy in -1..=1 {
                assert!(kernel.weight(dx, dy) >= 0.0, "({dx}, {dy}) is negative");
            }
        }
        assert_eq!(kernel.weight(0, 0), 0.0);
    }

    #[test]
    fn normalize_scales_to_unit_mass() {
        let mut values = vec![1.0, 3.0, 4.0];
        assert_eq!(normalize(&mut values), Normalization::Normalized);
        assert_eq!(values, vec![0.125, 0.375, 0.5]);
    }

    #[test]
    fn zero_mass_resets_to_uniform() {
        let mut values = vec![0.0; 4];
        let outcome = normalize(&mut values);
        assert!(outcome.is_reset());
        assert_eq!(values, vec![0.25; 4]);
    }

    #[test]
    fn non_finite_mass_resets_to_uniform() {
        let mut values = vec![f64::NAN, 1.0];
        assert!(normalize(&mut values).is_reset());
        assert_eq!(values, vec![0.5, 0.5]);
    }
}

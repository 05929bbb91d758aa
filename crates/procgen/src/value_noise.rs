//! 2D value noise and fractal sums of it.
//!
//! The lattice hash is a sine scramble of the lattice coordinates, so the
//! field is purely positional: seeds enter only through coordinate offsets.
//! [`FractalNoise`] implements [`noise::NoiseFn`] so it composes with the
//! `noise` crate's combinators.

use noise::NoiseFn;

/// Smoothstep weight `t²(3 − 2t)`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Pseudo-random scalar in `[0, 1)` for a lattice point.
///
/// Bit-exact output depends on the platform's `sin`; compare with a tolerance
/// across machines.
#[inline]
pub fn hash_2d(x: f64, y: f64) -> f64 {
    let h = (x * 12.9898 + y * 78.233).sin() * 43_758.545_312_3;
    h - h.floor()
}

/// Smoothly interpolated lattice noise in `[0, 1)`.
pub fn value_noise(x: f64, y: f64) -> f64 {
    let xi = x.floor();
    let yi = y.floor();
    let xf = x - xi;
    let yf = y - yi;

    let a = hash_2d(xi, yi);
    let b = hash_2d(xi + 1.0, yi);
    let c = hash_2d(xi, yi + 1.0);
    let d = hash_2d(xi + 1.0, yi + 1.0);

    let u = smoothstep(xf);
    let v = smoothstep(yf);

    lerp(lerp(a, b, u), lerp(c, d, u), v)
}

/// Fractal Brownian motion over [`value_noise`], normalised into `[0, 1)`.
///
/// Each octave doubles frequency and scales amplitude by `persistence`. An
/// octave count of zero is treated as one.
pub fn fbm(x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves.max(1) {
        total += value_noise(x * frequency, y * frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    debug_assert!(max_value > 0.0, "fbm amplitude sum must be positive");
    total / max_value
}

/// [`fbm`] with fixed parameters, as a `noise` source.
#[derive(Debug, Clone, Copy)]
pub struct FractalNoise {
    pub octaves: u32,
    pub persistence: f64,
}

impl FractalNoise {
    pub const fn new(octaves: u32, persistence: f64) -> Self {
        Self {
            octaves,
            persistence,
        }
    }
}

impl Default for FractalNoise {
    fn default() -> Self {
        Self::new(4, 0.5)
    }
}

impl NoiseFn<f64, 2> for FractalNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        fbm(point[0], point[1], self.octaves, self.persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> impl Iterator<Item = (f64, f64)> {
        (-40..40).flat_map(|i| {
            (-40..40).map(move |j| (i as f64 * 0.37 + 0.013, j as f64 * 1.91 - 0.5))
        })
    }

    #[test]
    fn hash_is_in_unit_interval() {
        for (x, y) in sample_points() {
            let h = hash_2d(x.floor(), y.floor());
            assert!((0.0..1.0).contains(&h));
        }
    }

    #[test]
    fn value_noise_hits_lattice_values() {
        assert!((value_noise(3.0, -2.0) - hash_2d(3.0, -2.0)).abs() < 1e-12);
        assert!((value_noise(0.0, 0.0) - hash_2d(0.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn value_noise_is_continuous_across_cells() {
        let eps = 1e-9;
        for i in -5..5 {
            let x = i as f64;
            let left = value_noise(x - eps, 0.3);
            let right = value_noise(x + eps, 0.3);
            assert!((left - right).abs() < 1e-6);
        }
    }

    #[test]
    fn fbm_stays_in_unit_interval_for_any_octave_count() {
        for octaves in 1..=8 {
            for (x, y) in sample_points() {
                let v = fbm(x, y, octaves, 0.5);
                assert!((0.0..1.0).contains(&v), "fbm({}, {}, {}) = {}", x, y, octaves, v);
            }
        }
    }

    #[test]
    fn fbm_treats_zero_octaves_as_one() {
        assert_eq!(fbm(1.3, 2.7, 0, 0.5), fbm(1.3, 2.7, 1, 0.5));
        assert!((fbm(1.3, 2.7, 1, 0.5) - value_noise(1.3, 2.7)).abs() < 1e-12);
    }

    #[test]
    fn fractal_source_matches_fbm() {
        let fractal = FractalNoise::new(5, 0.5);
        assert_eq!(fractal.get([4.2, -1.1]), fbm(4.2, -1.1, 5, 0.5));
        assert_eq!(FractalNoise::default().get([0.5, 0.5]), fbm(0.5, 0.5, 4, 0.5));
    }
}

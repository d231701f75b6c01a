//! Noise sources for synthetic telemetry
//! Location: src/telemetry/noise.rs

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::collections::VecDeque;

/// Source of the per-step random perturbation applied to a signal.
///
/// Implementations receive the channel's standard deviation on every draw so a
/// single source can serve many channels with different spreads.
pub trait NoiseSource {
    /// Draw one perturbation with mean 0 and the given standard deviation.
    fn sample(&mut self, std_dev: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample(&mut self, std_dev: f64) -> f64 {
        (**self).sample(std_dev)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&mut self, std_dev: f64) -> f64 {
        (**self).sample(std_dev)
    }
}

/// Gaussian noise backed by a seedable RNG
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self, std_dev: f64) -> f64 {
        gaussian_draw(&mut self.rng, std_dev)
    }
}

/// Gaussian noise from the thread-local RNG; not reproducible
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn sample(&mut self, std_dev: f64) -> f64 {
        gaussian_draw(&mut thread_rng(), std_dev)
    }
}

/// One N(0, std_dev) draw. A zero spread yields exactly 0 without touching the RNG.
fn gaussian_draw<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    if !std_dev.is_finite() {
        tracing::warn!(std_dev, "non-finite noise spread, perturbation skipped");
        return 0.0;
    }

    match Normal::new(0.0, std_dev) {
        Ok(normal) => normal.sample(rng),
        Err(e) => {
            tracing::warn!(std_dev, error = %e, "invalid noise spread, perturbation skipped");
            0.0
        }
    }
}

impl std::fmt::Debug for GaussianNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaussianNoise").finish_non_exhaustive()
    }
}

/// Always yields the same perturbation, regardless of the requested spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&mut self, _std_dev: f64) -> f64 {
        self.0
    }
}

/// Replays a scripted sequence of perturbations, then yields zero
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    values: VecDeque<f64>,
}

impl ScriptedNoise {
    /// Replay `values` in order
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Draws left before the script runs dry
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl NoiseSource for ScriptedNoise {
    fn sample(&mut self, _std_dev: f64) -> f64 {
        self.values.pop_front().unwrap_or(0.0)
    }
}

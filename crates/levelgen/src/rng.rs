//! Random-number seam for generation.
//!
//! Generation code only sees [`RandomSource`], so tests can script exact
//! draw sequences while production runs use [`ChaCha8Rng`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

static FALLBACK_STREAM: AtomicU64 = AtomicU64::new(0);

pub trait RandomSource {
    fn next_bits(&mut self) -> u64;

    /// Uniform draw in `[0, 1)`.
    fn unit_f32(&mut self) -> f32 {
        (self.next_bits() >> 40) as f32 / (1_u64 << 24) as f32
    }

    /// Uniform draw in `[min, max)`; collapses to `min` for empty ranges.
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.unit_f32()
    }

    /// Uniform draw in `[min, max]`.
    fn range_usize(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let range_size = (max - min) as u64 + 1;
        min + (self.next_bits() % range_size) as usize
    }

    fn coin_flip(&mut self) -> bool {
        self.next_bits() & 1 == 0
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_bits(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Fresh free-running generator seeded from OS entropy.
pub fn entropy_rng() -> ChaCha8Rng {
    let mut seed = [0_u8; 32];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => ChaCha8Rng::from_seed(seed),
        Err(err) => {
            log::warn!("OS entropy unavailable ({err}), seeding from the clock");
            ChaCha8Rng::seed_from_u64(clock_seed())
        }
    }
}

/// Nanosecond clock with a per-process counter folded into the high bits so
/// back-to-back calls within one clock tick still diverge.
fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    nanos ^ FALLBACK_STREAM.fetch_add(1, Ordering::Relaxed).rotate_left(32)
}

//! Seeded draw helpers shared by generation and spawning.
//! Every random decision in a level goes through one `ChaCha8Rng` so seeds replay exactly.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform integer in `min..=max`. Callers validate `min <= max`.
pub fn random_range(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
    (i64::from(min_value) + (rng.next_u64() % range_size) as i64) as i32
}

/// Uniform float in `min..max`.
pub fn random_f64(rng: &mut ChaCha8Rng, min_value: f64, max_value: f64) -> f64 {
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    min_value + unit * (max_value - min_value)
}

pub fn random_index(rng: &mut ChaCha8Rng, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.next_u64() as usize % len)
}

pub fn choose<'a, T>(rng: &mut ChaCha8Rng, slice: &'a [T]) -> Option<&'a T> {
    random_index(rng, slice.len()).and_then(|p| slice.get(p))
}

/// Out-of-ten chance roll: draws `0..=10` and succeeds when the draw is at most `threshold`.
pub fn roll_chance(rng: &mut ChaCha8Rng, threshold: i32) -> bool {
    random_range(rng, 0, 10) <= threshold
}

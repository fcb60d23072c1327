//! Random helpers used by the generators.
//!
//! Nothing here keeps global state. Every function takes the random source
//! explicitly so tests can pass a seeded [`StdRng`].

use rand::prelude::*;
use tracing::{debug, instrument};

/// Creates a deterministic generator from a seed.
#[instrument]
pub fn seeded_rng(seed: u64) -> StdRng {
    debug!(seed, "Seeding random source");
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from operating system entropy.
#[instrument]
pub fn entropy_rng() -> StdRng {
    StdRng::from_os_rng()
}

/// Creates a generator from an optional seed, falling back to entropy.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    }
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns the items in shuffled order.
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Returns a uniformly random integer in `lo..=hi`.
///
/// # Panics
///
/// Panics if `lo > hi`.
pub fn random_int<R: Rng>(rng: &mut R, lo: i64, hi: i64) -> i64 {
    assert!(lo <= hi, "empty range {lo}..={hi}");
    rng.random_range(lo..=hi)
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn choose<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

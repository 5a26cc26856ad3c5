//! Input datasets.

use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform random permutation of `0..size`, using the thread-local generator.
///
/// Sizes above `i32::MAX` are truncated to `i32::MAX` elements.
pub fn shuffled(size: usize) -> Vec<i32> {
    shuffled_with(size, &mut rand::rng())
}

/// Uniform random permutation of `0..size` drawn from `rng`.
pub fn shuffled_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i32> {
    let end = i32::try_from(size).unwrap_or(i32::MAX);
    let mut data: Vec<i32> = (0..end).collect();
    data.shuffle(rng);
    data
}

//! Benchmark workloads for the Vessel container.
//!
//! Workloads are generated from a fixed seed so every run and every
//! container under comparison sees the same sequence of operations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vessel::Vector;

/// Seed shared by all workloads.
pub const WORKLOAD_SEED: u64 = 0x7e55_e1;

/// Insertion positions for growing a sequence from empty to `count`
/// elements: position `i` is drawn uniformly from `0..=i`.
pub fn insert_positions(count: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|len| rng.random_range(0..=len)).collect()
}

/// Build a vector by inserting `i` at `positions[i]` for each `i`.
pub fn build_by_inserts(positions: &[usize]) -> Vector<u64> {
    let mut v = Vector::new();
    for (i, &pos) in positions.iter().enumerate() {
        v.insert(pos, i as u64);
    }
    v
}

/// A vector holding `0..count` built by appends.
pub fn sequential(count: usize) -> Vector<u64> {
    let mut v = Vector::new();
    for i in 0..count as u64 {
        v.push_back(i);
    }
    v
}

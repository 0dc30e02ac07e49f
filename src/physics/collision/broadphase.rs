//! Broad phase collision detection algorithms
//! are responsible for detecting pairs of possibly intersecting objects
//! for further, more accurate narrow phase inspection.

use itertools::Itertools;

/// A broad phase algorithm.
pub trait BroadPhase {
    /// Returns index pairs `[i, j]` with `i < j` of potentially intersecting objects
    /// out of `count` objects.
    fn pairs(count: usize) -> Vec<[usize; 2]>;
}

/// The simplest possible broad phase algorithm,
/// which pairs every object with every other object.
/// Very inefficient, but can work for small systems.
///
/// Pairs come out in nested loop order, `[0, 1], [0, 2], .., [1, 2], ..`,
/// so results are reproducible for a given insertion order.
pub struct BruteForce;

impl BroadPhase for BruteForce {
    fn pairs(count: usize) -> Vec<[usize; 2]> {
        (0..count)
            .tuple_combinations()
            .map(|(i, j)| [i, j])
            .collect()
    }
}

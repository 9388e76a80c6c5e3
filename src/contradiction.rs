//! Detection of the contradiction core between two rankings.

use crate::matrix::RelationMatrix;
use crate::ranking::{Object, Universe};
use serde::{Deserialize, Serialize};

/// Unordered pair of objects whose relative order the rankings disagree on.
///
/// Stored as universe indices with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPair {
    /// Lower universe index.
    pub first: usize,
    /// Higher universe index.
    pub second: usize,
}

/// Contradiction pair rendered with objects; encodes as `[first, second]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPair(pub Object, pub Object);

/// Pairs related the same way by both order matrices.
///
/// `(Y_A ∧ Y_B) ∨ (Y_Aᵗ ∧ Y_Bᵗ)`: both rankings put `i` not worse than `j`,
/// or both put `j` not worse than `i`.  A tie in either ranking satisfies
/// whichever direction the other ranking holds.
pub fn agreement(order_a: &RelationMatrix, order_b: &RelationMatrix) -> RelationMatrix {
    let forward = order_a.and(order_b);
    let backward = order_a.transpose().and(&order_b.transpose());
    forward.or(&backward)
}

/// Returns every pair `i < j` on which the rankings disagree, in universe order.
pub fn contradiction_core(order_a: &RelationMatrix, order_b: &RelationMatrix) -> Vec<IndexPair> {
    let agree = agreement(order_a, order_b);
    let n = agree.size();
    let mut core = Vec::new();
    for first in 0..n {
        for second in first + 1..n {
            if !agree.get(first, second) {
                core.push(IndexPair { first, second });
            }
        }
    }
    core
}

/// Maps index pairs back to their objects.
pub fn render_pairs(universe: &Universe, pairs: &[IndexPair]) -> Vec<ObjectPair> {
    pairs
        .iter()
        .map(|p| {
            ObjectPair(
                universe.object(p.first).clone(),
                universe.object(p.second).clone(),
            )
        })
        .collect()
}

//! Consistency relation: agreement, forced ties, symmetrisation, closure.

use crate::contradiction::IndexPair;
use crate::matrix::RelationMatrix;

/// Builds the closed consistency relation from the two order matrices.
///
/// Starts from `Y_A ∧ Y_B`, forces every contradiction pair tied in both
/// directions, keeps the symmetric part and closes it transitively.  The
/// result is an equivalence relation over the universe.
pub fn consistency_closure(
    order_a: &RelationMatrix,
    order_b: &RelationMatrix,
    core: &[IndexPair],
    parallel: bool,
) -> RelationMatrix {
    let mut consistent = order_a.and(order_b);
    for pair in core {
        consistent.set(pair.first, pair.second, true);
        consistent.set(pair.second, pair.first, true);
    }
    let mut tolerance = consistent.symmetric_part();
    tolerance.close_transitively(parallel);
    tolerance
}

//! Square boolean relation matrices over an object universe.
//!
//! Cells are stored row-major in one flat allocation of `n × n` booleans, so
//! every relational pass (AND, transpose, closure) walks contiguous memory.
//! Row `i`/column `j` refer to universe indices; cell `(i, j)` being `true`
//! means "object `i` relates to object `j`".

use crate::ranking::{PositionIndex, Universe};
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Dense `n × n` boolean relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl RelationMatrix {
    /// Creates the empty relation on `n` objects.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Builds the "not worse than" order relation from per-object slot positions.
    ///
    /// `positions[i]` is the slot index of universe object `i` in one ranking;
    /// cell `(i, j)` is set iff `positions[i] <= positions[j]`.  The result is
    /// reflexive and total, and tied objects relate in both directions.
    pub fn order_relation(positions: &[usize]) -> Self {
        let n = positions.len();
        let mut cells = Vec::with_capacity(n * n);
        for &pi in positions {
            cells.extend(positions.iter().map(|&pj| pi <= pj));
        }
        Self { n, cells }
    }

    /// Builds one ranking's order relation over a fixed universe.
    ///
    /// Universe objects the ranking does not place sit at the index's
    /// sentinel position, below every slot.
    pub fn from_ranking(index: &PositionIndex, universe: &Universe) -> Self {
        Self::order_relation(&index.over(universe))
    }

    /// Dimension of the relation.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Reads cell `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j]
    }

    /// Writes cell `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.cells[i * self.n + j] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Returns the converse relation.
    pub fn transpose(&self) -> Self {
        let mut out = Self::empty(self.n);
        for i in 0..self.n {
            for j in 0..self.n {
                out.cells[j * self.n + i] = self.get(i, j);
            }
        }
        out
    }

    /// Cell-wise conjunction.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a && b)
    }

    /// Cell-wise disjunction.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a || b)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(bool, bool) -> bool) -> Self {
        assert_eq!(self.n, other.n, "relation dimension mismatch");
        Self {
            n: self.n,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }

    /// Keeps only the pairs related in both directions (`R ∧ Rᵗ`).
    pub fn symmetric_part(&self) -> Self {
        self.and(&self.transpose())
    }

    /// Replaces the relation with its transitive closure.
    ///
    /// Warshall relaxation: for each pivot `k`, every row that reaches `k`
    /// absorbs row `k`.  When `parallel` is set the rows of each pivot pass
    /// are relaxed on the rayon pool; the result is identical either way.
    pub fn close_transitively(&mut self, parallel: bool) {
        let n = self.n;
        if n == 0 {
            return;
        }
        let mut pivot = vec![false; n];
        for k in 0..n {
            pivot.copy_from_slice(self.row(k));
            let relax = |row: &mut [bool]| {
                if row[k] {
                    for (cell, &via) in row.iter_mut().zip(&pivot) {
                        *cell |= via;
                    }
                }
            };
            if parallel {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    self.cells.par_chunks_mut(n).for_each(relax);
                    continue;
                }
            }
            self.cells.chunks_mut(n).for_each(relax);
        }
    }

    /// `true` if every object relates to itself.
    pub fn is_reflexive(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i))
    }

    /// `true` if the relation equals its converse.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// `true` if `(i, k)` and `(k, j)` always imply `(i, j)`.
    pub fn is_transitive(&self) -> bool {
        (0..self.n).all(|i| {
            (0..self.n)
                .filter(|&k| self.get(i, k))
                .all(|k| (0..self.n).all(|j| !self.get(k, j) || self.get(i, j)))
        })
    }
}

impl fmt::Display for RelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let line = self
                .row(i)
                .iter()
                .map(|&cell| if cell { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn from_rows(rows: &[&[u8]]) -> RelationMatrix {
        let n = rows.len();
        let mut m = RelationMatrix::empty(n);
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                m.set(i, j, cell == 1);
            }
        }
        m
    }

    #[test]
    fn test_linear_order_relation() {
        let m = RelationMatrix::order_relation(&[0, 1, 2]);
        assert_eq!(m, from_rows(&[&[1, 1, 1], &[0, 1, 1], &[0, 0, 1]]));
    }

    #[test]
    fn test_tied_order_relation() {
        // 1 > [2, 3] > 4
        let m = RelationMatrix::order_relation(&[0, 1, 1, 2]);
        assert_eq!(
            m,
            from_rows(&[&[1, 1, 1, 1], &[0, 1, 1, 1], &[0, 1, 1, 1], &[0, 0, 0, 1]])
        );
    }

    #[test]
    fn test_from_ranking_uses_universe_order() {
        use crate::error::RankingSide;
        use crate::ranking::Ranking;

        let ranking = Ranking::from_json("[3, [1, 2]]", RankingSide::A).unwrap();
        let index = ranking.position_index(RankingSide::A).unwrap();
        let m = RelationMatrix::from_ranking(&index, &ranking.universe());
        assert_eq!(m, from_rows(&[&[1, 1, 0], &[1, 1, 0], &[1, 1, 1]]));
    }

    #[test]
    fn test_all_tied_is_full() {
        let m = RelationMatrix::order_relation(&[0, 0, 0]);
        assert!((0..3).all(|i| m.row(i).iter().all(|&c| c)));
    }

    #[test]
    fn test_transpose_and_symmetric_part() {
        let m = RelationMatrix::order_relation(&[0, 1, 1]);
        let t = m.transpose();
        assert!(t.get(1, 0));
        assert!(!t.get(0, 1));
        let s = m.symmetric_part();
        assert_eq!(s, from_rows(&[&[1, 0, 0], &[0, 1, 1], &[0, 1, 1]]));
        assert!(s.is_symmetric());
    }

    #[test]
    fn test_or() {
        let a = from_rows(&[&[1, 0], &[0, 0]]);
        let b = from_rows(&[&[0, 0], &[1, 0]]);
        assert_eq!(a.or(&b), from_rows(&[&[1, 0], &[1, 0]]));
    }

    #[test]
    fn test_closure_of_chain() {
        let mut m = from_rows(&[&[1, 1, 0, 0], &[1, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 1]]);
        m.close_transitively(false);
        assert_eq!(
            m,
            from_rows(&[&[1, 1, 1, 0], &[1, 1, 1, 0], &[1, 1, 1, 0], &[0, 0, 0, 1]])
        );
        assert!(m.is_transitive());
    }

    #[test]
    fn test_closure_of_empty_relation() {
        let mut m = RelationMatrix::empty(0);
        m.close_transitively(true);
        assert_eq!(m.size(), 0);
        assert!(m.is_reflexive() && m.is_transitive());
    }

    #[test]
    fn test_display() {
        let m = RelationMatrix::order_relation(&[1, 0]);
        assert_eq!(m.to_string(), "1 0\n1 1\n");
    }

    fn arbitrary_relation() -> impl Strategy<Value = RelationMatrix> {
        (0usize..12).prop_flat_map(|n| {
            proptest::collection::vec(any::<bool>(), n * n)
                .prop_map(move |cells| RelationMatrix { n, cells })
        })
    }

    proptest! {
        #[test]
        fn prop_closure_is_transitive_and_extends(m in arbitrary_relation()) {
            let mut closed = m.clone();
            closed.close_transitively(false);
            prop_assert!(closed.is_transitive());
            for i in 0..m.size() {
                for j in 0..m.size() {
                    prop_assert!(!m.get(i, j) || closed.get(i, j));
                }
            }
        }

        #[test]
        fn prop_parallel_closure_matches_sequential(m in arbitrary_relation()) {
            let mut seq = m.clone();
            let mut par = m;
            seq.close_transitively(false);
            par.close_transitively(true);
            prop_assert_eq!(seq, par);
        }
    }
}

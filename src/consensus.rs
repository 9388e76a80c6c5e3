//! The design philosophy underlying `rank_consensus` is to keep every step of the
//! reconciliation an explicit relation over a fixed universe, so that each
//! intermediate result can be inspected on its own.
//!
//! Consensus of two rankings.
//!
//! [`ConsensusEngine::reconcile`] runs the full pipeline: it fixes the object
//! universe from ranking A, builds both order relations, extracts the
//! contradiction core, closes the consistency relation into an equivalence,
//! and orders the resulting clusters by their mean slot position across both
//! rankings.

use crate::cluster::connected_components;
use crate::config::ConsensusOptions;
use crate::consistency::consistency_closure;
use crate::contradiction::{contradiction_core, render_pairs, IndexPair, ObjectPair};
use crate::error::{ConsensusError, RankingSide};
use crate::matrix::RelationMatrix;
use crate::ranking::{Ranking, Slot, Universe};
use serde::{Deserialize, Serialize};

/// Result of reconciling two rankings, in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusReport {
    /// Contradicting pairs, each ordered by universe order.
    pub core: Vec<ObjectPair>,
    /// Consensus ranking covering the universe exactly once.
    pub consistent_ranking: Ranking,
}

/// Every intermediate product of one reconciliation.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    universe: Universe,
    order_a: RelationMatrix,
    order_b: RelationMatrix,
    core: Vec<IndexPair>,
    closure: RelationMatrix,
    clusters: Vec<Vec<usize>>,
}

impl Reconciliation {
    /// Objects of ranking A in index order.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Order relation of ranking A.
    pub fn order_a(&self) -> &RelationMatrix {
        &self.order_a
    }

    /// Order relation of ranking B over A's universe.
    pub fn order_b(&self) -> &RelationMatrix {
        &self.order_b
    }

    /// Contradiction core as universe index pairs.
    pub fn core(&self) -> &[IndexPair] {
        &self.core
    }

    /// Closed consistency relation (an equivalence).
    pub fn closure(&self) -> &RelationMatrix {
        &self.closure
    }

    /// Clusters as sorted index lists, in consensus order.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Contradiction core rendered with objects.
    pub fn core_pairs(&self) -> Vec<ObjectPair> {
        render_pairs(&self.universe, &self.core)
    }

    /// Consensus ranking: singletons bare, larger clusters as tied-groups.
    pub fn consistent_ranking(&self) -> Ranking {
        let slots = self
            .clusters
            .iter()
            .map(|cluster| match cluster.as_slice() {
                [only] => Slot::Single(self.universe.object(*only).clone()),
                members => Slot::Tied(
                    members
                        .iter()
                        .map(|&idx| self.universe.object(idx).clone())
                        .collect(),
                ),
            })
            .collect();
        Ranking::new(slots)
    }

    /// Packages the core and consensus ranking.
    pub fn report(&self) -> ConsensusReport {
        ConsensusReport {
            core: self.core_pairs(),
            consistent_ranking: self.consistent_ranking(),
        }
    }
}

/// Reconciles pairs of rankings under fixed options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusEngine {
    options: ConsensusOptions,
}

impl ConsensusEngine {
    /// Creates an engine with the given options.
    pub fn new(options: ConsensusOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ConsensusOptions {
        &self.options
    }

    /// Reconciles `a` and `b`.
    ///
    /// Only `a` defines the universe; objects found only in `b` are ignored and
    /// universe objects missing from `b` rank below all of `b`'s slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConsensusError::DuplicateObject`] if either ranking places an
    /// object in more than one slot.
    pub fn reconcile(&self, a: &Ranking, b: &Ranking) -> Result<Reconciliation, ConsensusError> {
        let index_a = a.position_index(RankingSide::A)?;
        let index_b = b.position_index(RankingSide::B)?;
        let universe = a.universe();
        let n = universe.len();
        let _span = tracing::debug_span!("reconcile", objects = n).entered();

        let positions_a = index_a.over(&universe);
        let positions_b = index_b.over(&universe);
        let order_a = RelationMatrix::order_relation(&positions_a);
        let order_b = RelationMatrix::order_relation(&positions_b);

        let core = contradiction_core(&order_a, &order_b);
        let parallel = self.use_parallel(n);
        let closure = consistency_closure(&order_a, &order_b, &core, parallel);

        let mut clusters = connected_components(&closure);
        // Stable: equal mean positions keep extraction order.
        clusters.sort_by_key(|cluster| {
            cluster_position(cluster, &positions_a, index_a.sentinel())
                + cluster_position(cluster, &positions_b, index_b.sentinel())
        });
        tracing::debug!(
            core = core.len(),
            clusters = clusters.len(),
            parallel,
            "reconciled rankings"
        );

        Ok(Reconciliation {
            universe,
            order_a,
            order_b,
            core,
            closure,
            clusters,
        })
    }

    fn use_parallel(&self, n: usize) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            n > 0 && n >= self.options.parallel_threshold && rayon::current_num_threads() > 1
        }
        #[cfg(target_arch = "wasm32")]
        {
            let _ = n;
            false
        }
    }
}

/// Earliest slot holding any cluster member, or `sentinel` if none is placed.
///
/// Sorting on the sum of both rankings' positions orders clusters exactly as
/// the mean would.
fn cluster_position(cluster: &[usize], positions: &[usize], sentinel: usize) -> usize {
    cluster
        .iter()
        .map(|&idx| positions[idx])
        .min()
        .unwrap_or(sentinel)
}

/// Reconciles two rankings with default options.
///
/// # Examples
///
/// ```
/// use rank_consensus::{consensus, Ranking, RankingSide};
///
/// let a = Ranking::from_json("[1, 2, 3]", RankingSide::A).unwrap();
/// let b = Ranking::from_json("[3, 2, 1]", RankingSide::B).unwrap();
/// let report = consensus(&a, &b).unwrap();
/// assert_eq!(report.core.len(), 3);
/// assert_eq!(serde_json::to_string(&report.consistent_ranking).unwrap(), "[[1,2,3]]");
/// ```
pub fn consensus(a: &Ranking, b: &Ranking) -> Result<ConsensusReport, ConsensusError> {
    ConsensusEngine::default()
        .reconcile(a, b)
        .map(|r| r.report())
}

/// Decodes two JSON rankings and reconciles them with default options.
pub fn consensus_json(a: &str, b: &str) -> Result<ConsensusReport, ConsensusError> {
    let a = Ranking::from_json(a, RankingSide::A)?;
    let b = Ranking::from_json(b, RankingSide::B)?;
    consensus(&a, &b)
}

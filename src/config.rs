//! Tunables for the reconciliation engine.

/// Environment variable overriding [`ConsensusOptions::parallel_threshold`].
pub const PARALLEL_THRESHOLD_ENV: &str = "RANK_CONSENSUS_PARALLEL_THRESHOLD";

/// Default universe size at which the transitive closure goes row-parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Options accepted by [`ConsensusEngine`](crate::ConsensusEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusOptions {
    /// Universe size from which the closure relaxes rows in parallel.
    ///
    /// Parallel and sequential closure produce identical matrices; this only
    /// trades thread overhead against per-pass work.
    pub parallel_threshold: usize,
}

impl Default for ConsensusOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ConsensusOptions {
    /// Returns the defaults with environment overrides applied.
    ///
    /// Unparseable values are ignored and logged at `warn`.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(raw) = std::env::var(PARALLEL_THRESHOLD_ENV) {
            options.apply_threshold_override(&raw);
        }
        options
    }

    /// Sets the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    fn apply_threshold_override(&mut self, raw: &str) {
        match raw.trim().parse::<usize>() {
            Ok(value) => self.parallel_threshold = value,
            Err(err) => tracing::warn!(
                value = raw,
                error = %err,
                "ignoring invalid {PARALLEL_THRESHOLD_ENV}"
            ),
        }
    }
}

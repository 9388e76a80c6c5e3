//! Error taxonomy for ranking reconciliation.

use thiserror::Error;

/// Identifies which of the two input rankings an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSide {
    /// The reference ranking that fixes the object universe.
    A,
    /// The ranking compared against the reference.
    B,
}

impl std::fmt::Display for RankingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingSide::A => f.write_str("ranking A"),
            RankingSide::B => f.write_str("ranking B"),
        }
    }
}

/// Errors raised while loading rankings or reconciling them.
#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("malformed {ranking}: {message}")]
    /// The ranking encoding could not be decoded.
    Malformed {
        /// Ranking whose encoding was rejected.
        ranking: RankingSide,
        /// Decoder message.
        message: String,
    },
    #[error("{ranking} places object {object} in more than one slot")]
    /// An object occupies more than one slot of the same ranking.
    DuplicateObject {
        /// Ranking containing the duplicate.
        ranking: RankingSide,
        /// Rendered duplicate object.
        object: String,
    },
    #[error("encode error: {0}")]
    /// A report could not be serialised.
    Encode(String),
    #[error("io error on {path}: {message}")]
    /// Reading or writing a ranking/report file failed.
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

impl ConsensusError {
    /// Builds an [`ConsensusError::Io`] from a path and a std error.
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        ConsensusError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

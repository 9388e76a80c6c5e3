#![deny(missing_docs)]

//! The design philosophy underlying `rank_consensus` is to keep every step of the
//! reconciliation an explicit relation over a fixed universe, so that each
//! intermediate result can be inspected on its own.
//!
//! # rank_consensus
//!
//! **rank_consensus** reconciles two preference rankings over the same objects.
//! A ranking is an ordered list of slots, each slot a single object or a
//! tied-group.  Given rankings A and B the engine reports
//!
//! * the **contradiction core**: every object pair whose relative order the
//!   two rankings disagree on, and
//! * a **consistent ranking** that follows both inputs wherever they agree and
//!   merges contradicting objects into tied clusters.
//!
//! ## Pipeline
//!
//! * [`ranking`] fixes the object universe from ranking A and indexes slot
//!   positions, rejecting objects placed twice.
//! * [`matrix`] builds each ranking's "not worse than" relation and provides
//!   the boolean algebra and transitive closure used downstream.
//! * [`contradiction`] flags disagreeing pairs.
//! * [`consistency`] forces those pairs tied and closes the symmetric
//!   agreement into an equivalence.
//! * [`cluster`] extracts its classes and [`consensus`] orders them by mean
//!   slot position.
//!
//! ## Usage
//!
//! ```rust
//! use rank_consensus::consensus_json;
//!
//! let report = consensus_json("[1,[2,3],4,[5,6,7],8,9,10]", "[[1,2],[3,4,5],6,7,9,[8,10]]")
//!     .unwrap();
//! assert_eq!(
//!     serde_json::to_string(&report).unwrap(),
//!     r#"{"core":[[8,9]],"consistent_ranking":[1,2,3,4,5,6,7,[8,9],10]}"#
//! );
//! ```

pub mod cluster;
pub mod config;
pub mod consensus;
pub mod consistency;
pub mod contradiction;
mod error;
mod io;
pub mod matrix;
pub mod ranking;

pub use config::{ConsensusOptions, DEFAULT_PARALLEL_THRESHOLD, PARALLEL_THRESHOLD_ENV};
pub use consensus::{consensus, consensus_json, ConsensusEngine, ConsensusReport, Reconciliation};
pub use contradiction::{IndexPair, ObjectPair};
pub use error::{ConsensusError, RankingSide};
pub use io::{encode_report, write_report, RankingSource};
pub use matrix::RelationMatrix;
pub use ranking::{Object, PositionIndex, Ranking, Slot, Universe};

//! File helpers for loading rankings and writing consensus reports.

use crate::consensus::ConsensusReport;
use crate::error::{ConsensusError, RankingSide};
use crate::ranking::Ranking;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a ranking's JSON encoding comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingSource {
    /// JSON text given directly.
    Inline(String),
    /// Path to a file holding the JSON text.
    File(PathBuf),
}

impl RankingSource {
    /// Reads and decodes the ranking.
    pub fn load(&self, side: RankingSide) -> Result<Ranking, ConsensusError> {
        match self {
            RankingSource::Inline(text) => Ranking::from_json(text, side),
            RankingSource::File(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|err| ConsensusError::io(path, err))?;
                Ranking::from_json(&text, side)
            }
        }
    }
}

/// Encodes a report as JSON, compact or indented.
pub fn encode_report(report: &ConsensusReport, pretty: bool) -> Result<String, ConsensusError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    encoded.map_err(|err| ConsensusError::Encode(err.to_string()))
}

/// Writes `report` to `path`, creating parent directories as needed.
pub fn write_report(
    path: impl AsRef<Path>,
    report: &ConsensusReport,
    pretty: bool,
) -> Result<PathBuf, ConsensusError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        create_dir_all(dir).map_err(|err| ConsensusError::io(dir, err))?;
    }
    let text = encode_report(report, pretty)?;
    let file = File::create(path).map_err(|err| ConsensusError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.write_all(b"\n"))
        .and_then(|_| writer.flush())
        .map_err(|err| ConsensusError::io(path, err))?;
    Ok(path.to_path_buf())
}

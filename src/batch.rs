//! Runs a session per file named in a file list.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::callbacks::CallbackSet;
use crate::error::CaptureError;
use crate::pcap_file::{process_pcap, Mode};
use crate::stats::PacketStats;

/// Paths listed one per line. Blank lines and lines starting with `#`
/// are skipped.
pub fn parse_file_list(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn read_file_list(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, CaptureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| CaptureError::FileIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(parse_file_list(&contents))
}

/// Results across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: Vec<PathBuf>,
    /// Sum over every session, failed ones included.
    pub totals: PacketStats,
}

/// Processes each file in turn, writing `'<path>' <count>` or
/// `'<path>': cannot process file.` per file to `out`. A failing file does
/// not stop the batch; only a failure to write `out` does.
pub fn run_batch<W: Write>(
    paths: &[PathBuf],
    mode: Mode,
    callbacks: &mut CallbackSet<'_>,
    out: &mut W,
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for path in paths {
        write!(out, "'{}'", path.display())?;
        match process_pcap(path, mode, callbacks) {
            Ok(stats) => {
                writeln!(out, " {}", stats.num_packets)?;
                summary.succeeded += 1;
                summary.totals += stats;
            }
            Err(err) => {
                writeln!(out, ": cannot process file.")?;
                summary.failed.push(path.clone());
                summary.totals += err.stats;
            }
        }
        out.flush()?;
    }

    info!(
        "batch done: {} ok, {} failed, {} packets",
        summary.succeeded,
        summary.failed.len(),
        summary.totals.num_packets
    );
    Ok(summary)
}

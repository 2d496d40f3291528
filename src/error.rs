//! Error types for pcaptool.
//!
//! - [`DecodeError`] - per-frame, per-layer header decode failures. These
//!   never leave the dispatch chain; they only bump `num_malformed`.
//! - [`CaptureError`] - container-level failures that end a session.
//! - [`SessionError`] - a [`CaptureError`] plus the stats gathered before it.

use std::path::PathBuf;

use thiserror::Error;

use crate::stats::PacketStats;

/// Protocol layer named in decode errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Ipv6,
    Tcp,
    Udp,
    Icmp,
    Data,
}

impl Layer {
    pub fn name(self) -> &'static str {
        match self {
            Layer::Ethernet => "ethernet",
            Layer::Ipv4 => "ipv4",
            Layer::Ipv6 => "ipv6",
            Layer::Tcp => "tcp",
            Layer::Udp => "udp",
            Layer::Icmp => "icmp",
            Layer::Data => "data",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A header could not be decoded from the bytes at hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes remain than the header (or a length field) requires.
    #[error("{layer}: truncated header (need {needed} bytes, have {available})")]
    Truncated {
        layer: Layer,
        needed: usize,
        available: usize,
    },

    /// A header field holds a value that cannot be valid.
    #[error("{layer}: malformed header: {reason}")]
    Malformed { layer: Layer, reason: String },
}

impl DecodeError {
    pub fn layer(&self) -> Layer {
        match self {
            DecodeError::Truncated { layer, .. } | DecodeError::Malformed { layer, .. } => *layer,
        }
    }
}

/// Container-level failure reading a capture file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The file could not be opened or is not a recognised capture format.
    #[error("File IO: {path}: {reason}")]
    FileIo { path: PathBuf, reason: String },

    /// A record header disagrees with the bytes in the file. Reading cannot
    /// resynchronise after this.
    #[error("Malformed packet: {path}: record {frame}: {reason}")]
    MalformedPacket {
        path: PathBuf,
        frame: u64,
        reason: String,
    },
}

/// A session that ended in a [`CaptureError`].
#[derive(Error, Debug, Clone)]
#[error("{error}")]
pub struct SessionError {
    #[source]
    pub error: CaptureError,
    /// Counters for every frame read before the failure.
    pub stats: PacketStats,
}

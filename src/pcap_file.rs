use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use pcap::{Capture, Linktype, Offline};

use crate::callbacks::CallbackSet;
use crate::deframe::dispatch;
use crate::error::{CaptureError, SessionError};
use crate::stats::PacketStats;

/// Capture time of a record, as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub seconds: i64,
    pub micros: u32,
}

impl Timestamp {
    /// Carries whole seconds out of `micros`, which corrupt records may
    /// leave above one million or below zero.
    pub fn new(seconds: i64, micros: i64) -> Self {
        let seconds = seconds.saturating_add(micros.div_euclid(1_000_000));
        Timestamp {
            seconds,
            micros: micros.rem_euclid(1_000_000) as u32,
        }
    }

    pub fn to_system_time(self) -> Option<SystemTime> {
        let micros = Duration::from_micros(u64::from(self.micros));
        if self.seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.seconds as u64) + micros)
        } else {
            UNIX_EPOCH
                .checked_sub(Duration::from_secs(self.seconds.unsigned_abs()))?
                .checked_add(micros)
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.seconds, self.micros)
    }
}

/// One record from a capture file, valid until the reader advances.
#[derive(Debug, Clone, Copy)]
pub struct CapturedFrame<'a> {
    /// Position in the file, from 0.
    pub id: u64,
    pub source: &'a Path,
    pub timestamp: Timestamp,
    /// Length on the wire. Not guaranteed to be ≥ `captured_length`.
    pub wire_length: u32,
    pub link_type: Linktype,
    pub captured_length: u32,
    pub payload: &'a [u8],
}

/// Reads frames from a pcap (or pcapng) file in order.
pub struct PcapReader {
    source: PathBuf,
    capture: Capture<Offline>,
    link_type: Linktype,
    next_id: u64,
}

impl PcapReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let source = path.as_ref().to_path_buf();
        let capture = Capture::from_file(&source).map_err(|e| CaptureError::FileIo {
            path: source.clone(),
            reason: e.to_string(),
        })?;
        let link_type = capture.get_datalink();

        Ok(PcapReader {
            source,
            capture,
            link_type,
            next_id: 0,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn link_type(&self) -> Linktype {
        self.link_type
    }

    /// Returns `Ok(None)` at end of file. An error means the record
    /// framing is broken and nothing further can be read.
    pub fn next_frame(&mut self) -> Result<Option<CapturedFrame<'_>>, CaptureError> {
        match self.capture.next_packet() {
            Ok(packet) => {
                let id = self.next_id;
                self.next_id += 1;
                let ts = packet.header.ts;
                Ok(Some(CapturedFrame {
                    id,
                    source: &self.source,
                    timestamp: Timestamp::new(ts.tv_sec as i64, ts.tv_usec as i64),
                    wire_length: packet.header.len,
                    link_type: self.link_type,
                    captured_length: packet.data.len() as u32,
                    payload: packet.data,
                }))
            }
            Err(pcap::Error::NoMorePackets) => Ok(None),
            Err(e) => Err(CaptureError::MalformedPacket {
                path: self.source.clone(),
                frame: self.next_id,
                reason: e.to_string(),
            }),
        }
    }
}

/// What a session does with each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Count frames only; nothing is decoded.
    Count,
    /// Decode every frame and run the callbacks.
    #[default]
    Process,
}

/// Runs one capture session over `path`.
///
/// Per-frame decode failures are counted and skipped. A container-level
/// failure ends the session and is returned together with the stats for
/// the frames read before it. The file is closed on every path out.
pub fn process_pcap(
    path: impl AsRef<Path>,
    mode: Mode,
    callbacks: &mut CallbackSet<'_>,
) -> Result<PacketStats, SessionError> {
    let path = path.as_ref();
    let mut stats = PacketStats::default();

    let mut reader = match PcapReader::open(path) {
        Ok(reader) => reader,
        Err(error) => {
            warn!("{}", error);
            return Err(SessionError { error, stats });
        }
    };
    info!(
        "reading {} (link type {}, {:?})",
        reader.source().display(),
        reader.link_type().0,
        mode
    );
    if mode == Mode::Process && callbacks.is_empty() {
        debug!("no handlers registered, decoding for counters only");
    }

    loop {
        match reader.next_frame() {
            Ok(Some(frame)) => {
                stats.record_frame(&frame);
                if mode == Mode::Process {
                    dispatch(&frame, callbacks, &mut stats);
                }
            }
            Ok(None) => break,
            Err(error) => {
                warn!("{} after {} packets", error, stats.num_packets);
                return Err(SessionError { error, stats });
            }
        }
    }

    debug!("{}: {:?}", path.display(), stats);
    info!("{}: {} packets", path.display(), stats.num_packets);
    Ok(stats)
}

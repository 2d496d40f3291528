//! Reads libpcap capture files and feeds every frame through a layered
//! protocol decoder (Ethernet, IPv4/IPv6, TCP/UDP/ICMP, opaque data),
//! calling a user-supplied handler for each layer that decodes.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//! use pcaptool::{process_pcap, CallbackSet, Mode};
//!
//! let mut syns = 0;
//! let mut callbacks = CallbackSet::new().on_tcp(|tcp| {
//!     if tcp.has_flags(pcaptool::headers::tcp::flags::SYN) {
//!         syns += 1;
//!     }
//!     ControlFlow::Continue(())
//! });
//! let stats = process_pcap("trace.pcap", Mode::Process, &mut callbacks)?;
//! drop(callbacks);
//! println!("{} packets, {} SYNs", stats.num_packets, syns);
//! # Ok::<(), pcaptool::SessionError>(())
//! ```

pub mod batch;
pub mod callbacks;
pub mod deframe;
pub mod error;
pub mod headers;
pub mod pcap_file;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use batch::{parse_file_list, read_file_list, run_batch, BatchSummary};
pub use callbacks::CallbackSet;
pub use deframe::{dispatch, Outcome};
pub use error::{CaptureError, DecodeError, Layer, SessionError};
pub use headers::{LayerView, NextLayer};
pub use pcap_file::{process_pcap, CapturedFrame, Mode, PcapReader, Timestamp};
pub use stats::PacketStats;

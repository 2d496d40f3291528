//! Header decoders for each protocol layer.
//!
//! Every decoder has the shape `decode_<layer>(bytes, offset)`: `bytes` is
//! the frame (already cut down to the enclosing layer's payload end) and
//! `offset` is where this layer's header starts. Decoders are pure; they
//! read fields in network byte order through `pnet`'s packet accessors and
//! return a view that borrows `bytes` instead of copying it.

pub mod data;
pub mod ethernet;
pub mod icmp;
pub mod ipv4;
pub mod ipv6;
pub mod tcp;
pub mod udp;

pub use data::{decode_data, DataView};
pub use ethernet::{decode_ethernet, EthernetView};
pub use icmp::{decode_icmp, IcmpView};
pub use ipv4::{decode_ipv4, Ipv4View};
pub use ipv6::{decode_ipv6, Ipv6View};
pub use tcp::{decode_tcp, TcpView};
pub use udp::{decode_udp, UdpView};

use crate::error::{DecodeError, Layer};

/// Which decoder a layer says should run next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLayer {
    Ipv4,
    Ipv6,
    Tcp,
    Udp,
    Icmp,
    /// No decoder for this type; the remainder is opaque data.
    Unknown,
    /// Transport layers end the chain.
    None,
}

/// Byte ranges a decoded layer occupies inside its frame.
///
/// Offsets are absolute within `frame`. `frame` may be shorter than the
/// captured frame when an enclosing layer declared a shorter length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    frame: &'a [u8],
    header_offset: usize,
    payload_offset: usize,
    payload_end: usize,
}

impl<'a> Region<'a> {
    pub(crate) fn new(
        frame: &'a [u8],
        header_offset: usize,
        payload_offset: usize,
        payload_end: usize,
    ) -> Self {
        debug_assert!(header_offset <= payload_offset);
        debug_assert!(payload_offset <= payload_end);
        debug_assert!(payload_end <= frame.len());
        Region {
            frame,
            header_offset,
            payload_offset,
            payload_end,
        }
    }

    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    pub fn header_len(&self) -> usize {
        self.payload_offset - self.header_offset
    }

    pub fn header(&self) -> &'a [u8] {
        &self.frame[self.header_offset..self.payload_offset]
    }

    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    pub fn payload_len(&self) -> usize {
        self.payload_end - self.payload_offset
    }

    /// One past the last payload byte.
    pub fn payload_end(&self) -> usize {
        self.payload_end
    }

    pub fn payload(&self) -> &'a [u8] {
        &self.frame[self.payload_offset..self.payload_end]
    }

    /// The frame bytes this layer may hand to the next decoder.
    pub(crate) fn bounded_frame(&self) -> &'a [u8] {
        &self.frame[..self.payload_end]
    }
}

/// Common accessors over every decoded layer.
pub trait LayerView<'a> {
    const LAYER: Layer;

    fn region(&self) -> Region<'a>;

    fn next_layer(&self) -> NextLayer {
        NextLayer::None
    }

    fn header(&self) -> &'a [u8] {
        self.region().header()
    }

    fn payload(&self) -> &'a [u8] {
        self.region().payload()
    }

    fn payload_offset(&self) -> usize {
        self.region().payload_offset()
    }

    fn payload_len(&self) -> usize {
        self.region().payload_len()
    }
}

/// Bytes from `offset` on, or `0` when `offset` is past the end.
pub(crate) fn available(bytes: &[u8], offset: usize) -> usize {
    bytes.len().saturating_sub(offset)
}

/// Checks that `min_len` bytes are present at `offset` and builds a pnet
/// packet over them.
pub(crate) fn packet_at<'p, P>(
    layer: Layer,
    bytes: &'p [u8],
    offset: usize,
    min_len: usize,
    new: impl FnOnce(&'p [u8]) -> Option<P>,
) -> Result<P, DecodeError> {
    let available = available(bytes, offset);
    let truncated = || DecodeError::Truncated {
        layer,
        needed: min_len,
        available,
    };
    if available < min_len {
        return Err(truncated());
    }
    new(&bytes[offset..]).ok_or_else(truncated)
}

pub(crate) fn malformed(layer: Layer, reason: impl Into<String>) -> DecodeError {
    DecodeError::Malformed {
        layer,
        reason: reason.into(),
    }
}

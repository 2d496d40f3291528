use std::fmt;

use pnet::packet::icmp::IcmpPacket;
use pnet::packet::Packet;

use super::{available, packet_at, LayerView, Region};
use crate::error::{DecodeError, Layer};

/// Type, code, checksum and the four-byte rest-of-header.
pub const ICMP_HEADER_LEN: usize = 8;

/// A decoded ICMP or ICMPv6 header; both share this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpView<'a> {
    region: Region<'a>,
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    /// Type-specific word, e.g. identifier and sequence for echo.
    pub rest_of_header: u32,
}

pub fn decode_icmp(bytes: &[u8], offset: usize) -> Result<IcmpView<'_>, DecodeError> {
    let packet = packet_at(Layer::Icmp, bytes, offset, ICMP_HEADER_LEN, IcmpPacket::new)?;
    // pnet's ICMP payload starts right after the checksum
    let [a, b, c, d, ..] = packet.payload() else {
        return Err(DecodeError::Truncated {
            layer: Layer::Icmp,
            needed: ICMP_HEADER_LEN,
            available: available(bytes, offset),
        });
    };

    Ok(IcmpView {
        region: Region::new(bytes, offset, offset + ICMP_HEADER_LEN, bytes.len()),
        icmp_type: packet.get_icmp_type().0,
        code: packet.get_icmp_code().0,
        checksum: packet.get_checksum(),
        rest_of_header: u32::from_be_bytes([*a, *b, *c, *d]),
    })
}

impl<'a> LayerView<'a> for IcmpView<'a> {
    const LAYER: Layer = Layer::Icmp;

    fn region(&self) -> Region<'a> {
        self.region
    }
}

impl fmt::Display for IcmpView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icmp type {} code {}", self.icmp_type, self.code)
    }
}

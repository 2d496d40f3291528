use std::fmt;
use std::net::Ipv4Addr;

use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv4::Ipv4Packet;

use super::{available, malformed, packet_at, LayerView, NextLayer, Region};
use crate::error::{DecodeError, Layer};

pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// A decoded IPv4 header. Options are left in the header bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4View<'a> {
    region: Region<'a>,
    pub version: u8,
    /// Header length in bytes (IHL * 4).
    pub header_length: usize,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: IpNextHeaderProtocol,
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

/// The payload runs to `total_length` or to the end of `bytes`, whichever
/// comes first, so Ethernet padding is excluded and snaplen-truncated
/// packets still decode.
pub fn decode_ipv4(bytes: &[u8], offset: usize) -> Result<Ipv4View<'_>, DecodeError> {
    let packet = packet_at(
        Layer::Ipv4,
        bytes,
        offset,
        IPV4_MIN_HEADER_LEN,
        Ipv4Packet::new,
    )?;

    let version = packet.get_version();
    if version != 4 {
        return Err(malformed(Layer::Ipv4, format!("version {version}, expected 4")));
    }

    let header_length = usize::from(packet.get_header_length()) * 4;
    if header_length < IPV4_MIN_HEADER_LEN {
        return Err(malformed(
            Layer::Ipv4,
            format!("header length {header_length} below minimum {IPV4_MIN_HEADER_LEN}"),
        ));
    }

    let available = available(bytes, offset);
    if header_length > available {
        return Err(DecodeError::Truncated {
            layer: Layer::Ipv4,
            needed: header_length,
            available,
        });
    }

    let total_length = packet.get_total_length();
    if usize::from(total_length) < header_length {
        return Err(malformed(
            Layer::Ipv4,
            format!("total length {total_length} shorter than header length {header_length}"),
        ));
    }

    let payload_end = offset + usize::from(total_length).min(available);

    Ok(Ipv4View {
        region: Region::new(bytes, offset, offset + header_length, payload_end),
        version,
        header_length,
        dscp: packet.get_dscp(),
        ecn: packet.get_ecn(),
        total_length,
        identification: packet.get_identification(),
        flags: packet.get_flags(),
        fragment_offset: packet.get_fragment_offset(),
        ttl: packet.get_ttl(),
        protocol: packet.get_next_level_protocol(),
        checksum: packet.get_checksum(),
        source: packet.get_source(),
        destination: packet.get_destination(),
    })
}

impl Ipv4View<'_> {
    /// Later fragments carry no transport header.
    pub fn is_later_fragment(&self) -> bool {
        self.fragment_offset != 0
    }

    /// Whether the captured bytes hold the full `total_length`.
    pub fn is_complete(&self) -> bool {
        self.region.payload_end() - self.region.header_offset() == usize::from(self.total_length)
    }
}

impl<'a> LayerView<'a> for Ipv4View<'a> {
    const LAYER: Layer = Layer::Ipv4;

    fn region(&self) -> Region<'a> {
        self.region
    }

    fn next_layer(&self) -> NextLayer {
        if self.is_later_fragment() {
            return NextLayer::Unknown;
        }
        match self.protocol {
            IpNextHeaderProtocols::Tcp => NextLayer::Tcp,
            IpNextHeaderProtocols::Udp => NextLayer::Udp,
            IpNextHeaderProtocols::Icmp => NextLayer::Icmp,
            _ => NextLayer::Unknown,
        }
    }
}

impl fmt::Display for Ipv4View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ipv4 {} > {} proto {} len {} ttl {}",
            self.source, self.destination, self.protocol.0, self.total_length, self.ttl
        )
    }
}

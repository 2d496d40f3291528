use std::fmt;
use std::net::Ipv6Addr;

use pnet::packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet::packet::ipv6::Ipv6Packet;

use super::{available, malformed, packet_at, LayerView, NextLayer, Region};
use crate::error::{DecodeError, Layer};

pub const IPV6_HEADER_LEN: usize = 40;

/// A decoded IPv6 fixed header. Extension headers are not walked; a next
/// header other than TCP, UDP or ICMPv6 ends the chain as opaque data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6View<'a> {
    region: Region<'a>,
    pub version: u8,
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: IpNextHeaderProtocol,
    pub hop_limit: u8,
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
}

pub fn decode_ipv6(bytes: &[u8], offset: usize) -> Result<Ipv6View<'_>, DecodeError> {
    let packet = packet_at(Layer::Ipv6, bytes, offset, IPV6_HEADER_LEN, Ipv6Packet::new)?;

    let version = packet.get_version();
    if version != 6 {
        return Err(malformed(Layer::Ipv6, format!("version {version}, expected 6")));
    }

    let payload_length = packet.get_payload_length();
    let captured = available(bytes, offset) - IPV6_HEADER_LEN;
    let payload_offset = offset + IPV6_HEADER_LEN;
    let payload_end = payload_offset + usize::from(payload_length).min(captured);

    Ok(Ipv6View {
        region: Region::new(bytes, offset, payload_offset, payload_end),
        version,
        traffic_class: packet.get_traffic_class(),
        flow_label: packet.get_flow_label(),
        payload_length,
        next_header: packet.get_next_header(),
        hop_limit: packet.get_hop_limit(),
        source: packet.get_source(),
        destination: packet.get_destination(),
    })
}

impl<'a> LayerView<'a> for Ipv6View<'a> {
    const LAYER: Layer = Layer::Ipv6;

    fn region(&self) -> Region<'a> {
        self.region
    }

    fn next_layer(&self) -> NextLayer {
        match self.next_header {
            IpNextHeaderProtocols::Tcp => NextLayer::Tcp,
            IpNextHeaderProtocols::Udp => NextLayer::Udp,
            IpNextHeaderProtocols::Icmpv6 => NextLayer::Icmp,
            _ => NextLayer::Unknown,
        }
    }
}

impl fmt::Display for Ipv6View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ipv6 {} > {} next {} len {} hlim {}",
            self.source, self.destination, self.next_header.0, self.payload_length, self.hop_limit
        )
    }
}

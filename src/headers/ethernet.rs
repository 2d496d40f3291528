use std::fmt;

use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket};
use pnet::util::MacAddr;

use super::{packet_at, LayerView, NextLayer, Region};
use crate::error::{DecodeError, Layer};

pub const ETHERNET_HEADER_LEN: usize = 14;

/// A decoded Ethernet II header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetView<'a> {
    region: Region<'a>,
    pub destination: MacAddr,
    pub source: MacAddr,
    pub ethertype: EtherType,
}

pub fn decode_ethernet(bytes: &[u8], offset: usize) -> Result<EthernetView<'_>, DecodeError> {
    let packet = packet_at(
        Layer::Ethernet,
        bytes,
        offset,
        ETHERNET_HEADER_LEN,
        EthernetPacket::new,
    )?;

    Ok(EthernetView {
        region: Region::new(bytes, offset, offset + ETHERNET_HEADER_LEN, bytes.len()),
        destination: packet.get_destination(),
        source: packet.get_source(),
        ethertype: packet.get_ethertype(),
    })
}

impl<'a> LayerView<'a> for EthernetView<'a> {
    const LAYER: Layer = Layer::Ethernet;

    fn region(&self) -> Region<'a> {
        self.region
    }

    fn next_layer(&self) -> NextLayer {
        match self.ethertype {
            EtherTypes::Ipv4 => NextLayer::Ipv4,
            EtherTypes::Ipv6 => NextLayer::Ipv6,
            _ => NextLayer::Unknown,
        }
    }
}

impl fmt::Display for EthernetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ethernet {} > {} type 0x{:04x}",
            self.source, self.destination, self.ethertype.0
        )
    }
}

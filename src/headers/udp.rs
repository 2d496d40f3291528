use std::fmt;

use pnet::packet::udp::UdpPacket;

use super::{available, malformed, packet_at, LayerView, Region};
use crate::error::{DecodeError, Layer};

pub const UDP_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpView<'a> {
    region: Region<'a>,
    pub source_port: u16,
    pub destination_port: u16,
    /// Header plus payload, in bytes.
    pub length: u16,
    pub checksum: u16,
}

/// The length field must cover the header and fit in the bytes available;
/// the payload is exactly `length - 8` bytes.
pub fn decode_udp(bytes: &[u8], offset: usize) -> Result<UdpView<'_>, DecodeError> {
    let packet = packet_at(Layer::Udp, bytes, offset, UDP_HEADER_LEN, UdpPacket::new)?;

    let length = packet.get_length();
    if usize::from(length) < UDP_HEADER_LEN {
        return Err(malformed(
            Layer::Udp,
            format!("length {length} shorter than header"),
        ));
    }

    let available = available(bytes, offset);
    if usize::from(length) > available {
        return Err(DecodeError::Truncated {
            layer: Layer::Udp,
            needed: usize::from(length),
            available,
        });
    }

    Ok(UdpView {
        region: Region::new(
            bytes,
            offset,
            offset + UDP_HEADER_LEN,
            offset + usize::from(length),
        ),
        source_port: packet.get_source(),
        destination_port: packet.get_destination(),
        length,
        checksum: packet.get_checksum(),
    })
}

impl<'a> LayerView<'a> for UdpView<'a> {
    const LAYER: Layer = Layer::Udp;

    fn region(&self) -> Region<'a> {
        self.region
    }
}

impl fmt::Display for UdpView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "udp {} > {} len {}",
            self.source_port, self.destination_port, self.length
        )
    }
}

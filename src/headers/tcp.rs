use std::fmt;

use pnet::packet::tcp::TcpPacket;

use super::{available, malformed, packet_at, LayerView, Region};
use crate::error::{DecodeError, Layer};

pub const TCP_MIN_HEADER_LEN: usize = 20;

/// Control bits, as carried in the low byte of the flags field.
pub mod flags {
    pub const FIN: u16 = 0x001;
    pub const SYN: u16 = 0x002;
    pub const RST: u16 = 0x004;
    pub const PSH: u16 = 0x008;
    pub const ACK: u16 = 0x010;
    pub const URG: u16 = 0x020;
    pub const ECE: u16 = 0x040;
    pub const CWR: u16 = 0x080;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpView<'a> {
    region: Region<'a>,
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence: u32,
    pub acknowledgement: u32,
    /// Header length in 32-bit words.
    pub data_offset: u8,
    pub flags: u16,
    pub window: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

pub fn decode_tcp(bytes: &[u8], offset: usize) -> Result<TcpView<'_>, DecodeError> {
    let packet = packet_at(Layer::Tcp, bytes, offset, TCP_MIN_HEADER_LEN, TcpPacket::new)?;

    let data_offset = packet.get_data_offset();
    let header_length = usize::from(data_offset) * 4;
    if header_length < TCP_MIN_HEADER_LEN {
        return Err(malformed(
            Layer::Tcp,
            format!("data offset {data_offset} below minimum 5 words"),
        ));
    }

    let available = available(bytes, offset);
    if header_length > available {
        return Err(DecodeError::Truncated {
            layer: Layer::Tcp,
            needed: header_length,
            available,
        });
    }

    Ok(TcpView {
        region: Region::new(bytes, offset, offset + header_length, bytes.len()),
        source_port: packet.get_source(),
        destination_port: packet.get_destination(),
        sequence: packet.get_sequence(),
        acknowledgement: packet.get_acknowledgement(),
        data_offset,
        flags: u16::from(packet.get_flags()),
        window: packet.get_window(),
        checksum: packet.get_checksum(),
        urgent_pointer: packet.get_urgent_ptr(),
    })
}

impl TcpView<'_> {
    pub fn has_flags(&self, mask: u16) -> bool {
        self.flags & mask == mask
    }

    /// Header length in bytes, options included.
    pub fn header_length(&self) -> usize {
        usize::from(self.data_offset) * 4
    }
}

impl<'a> LayerView<'a> for TcpView<'a> {
    const LAYER: Layer = Layer::Tcp;

    fn region(&self) -> Region<'a> {
        self.region
    }
}

impl fmt::Display for TcpView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tcp {} > {} seq {} ack {} flags 0x{:03x} win {}",
            self.source_port,
            self.destination_port,
            self.sequence,
            self.acknowledgement,
            self.flags,
            self.window
        )
    }
}

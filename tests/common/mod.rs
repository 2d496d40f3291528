//! Writes small libpcap files for the integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const LINKTYPE_ETHERNET: u32 = 1;

/// Builds a little-endian, microsecond pcap file in memory.
pub struct PcapBuilder {
    bytes: Vec<u8>,
}

impl PcapBuilder {
    pub fn new(link_type: u32) -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes()); // magic
        bytes.extend_from_slice(&2u16.to_le_bytes()); // version major
        bytes.extend_from_slice(&4u16.to_le_bytes()); // version minor
        bytes.extend_from_slice(&0i32.to_le_bytes()); // thiszone
        bytes.extend_from_slice(&0u32.to_le_bytes()); // sigfigs
        bytes.extend_from_slice(&65535u32.to_le_bytes()); // snaplen
        bytes.extend_from_slice(&link_type.to_le_bytes());
        PcapBuilder { bytes }
    }

    pub fn ethernet() -> Self {
        Self::new(LINKTYPE_ETHERNET)
    }

    /// Appends a record whose wire length equals its captured length.
    pub fn record(self, ts_sec: u32, ts_usec: u32, data: &[u8]) -> Self {
        self.record_with_len(ts_sec, ts_usec, data, data.len() as u32)
    }

    pub fn record_with_len(
        mut self,
        ts_sec: u32,
        ts_usec: u32,
        data: &[u8],
        orig_len: u32,
    ) -> Self {
        self.bytes.extend_from_slice(&ts_sec.to_le_bytes());
        self.bytes.extend_from_slice(&ts_usec.to_le_bytes());
        self.bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.bytes.extend_from_slice(&orig_len.to_le_bytes());
        self.bytes.extend_from_slice(data);
        self
    }

    /// Appends a record header announcing `caplen` bytes followed by only
    /// `data`, as a cut-off file would.
    pub fn broken_record(mut self, caplen: u32, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(&0u32.to_le_bytes());
        self.bytes.extend_from_slice(&0u32.to_le_bytes());
        self.bytes.extend_from_slice(&caplen.to_le_bytes());
        self.bytes.extend_from_slice(&caplen.to_le_bytes());
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write(self) -> NamedTempFile {
        write_temp(&self.bytes)
    }
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".pcap").unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

pub fn ethernet(ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
    frame.extend_from_slice(&ethertype.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

pub fn ipv4(protocol: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x45, 0x00];
    packet.extend_from_slice(&((20 + payload.len()) as u16).to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 64, protocol, 0x00, 0x00]);
    packet.extend_from_slice(&[10, 0, 0, 1, 10, 0, 0, 2]);
    packet.extend_from_slice(payload);
    packet
}

pub fn tcp(flags: u8, payload: &[u8]) -> Vec<u8> {
    let mut segment = Vec::new();
    segment.extend_from_slice(&40000u16.to_be_bytes());
    segment.extend_from_slice(&80u16.to_be_bytes());
    segment.extend_from_slice(&1u32.to_be_bytes());
    segment.extend_from_slice(&0u32.to_be_bytes());
    segment.extend_from_slice(&[5 << 4, flags, 0xff, 0xff, 0, 0, 0, 0]);
    segment.extend_from_slice(payload);
    segment
}

pub fn udp(payload: &[u8]) -> Vec<u8> {
    let mut datagram = Vec::new();
    datagram.extend_from_slice(&5353u16.to_be_bytes());
    datagram.extend_from_slice(&53u16.to_be_bytes());
    datagram.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    datagram.extend_from_slice(&[0, 0]);
    datagram.extend_from_slice(payload);
    datagram
}

/// Ethernet + IPv4 + TCP with no payload.
pub fn tcp_frame() -> Vec<u8> {
    ethernet(0x0800, &ipv4(6, &tcp(0x02, &[])))
}

/// Ethernet + IPv4 + UDP carrying `payload`.
pub fn udp_frame(payload: &[u8]) -> Vec<u8> {
    ethernet(0x0800, &ipv4(17, &udp(payload)))
}

/// A valid Ethernet capture of `n` TCP frames.
pub fn tcp_capture(n: u32) -> NamedTempFile {
    let frame = tcp_frame();
    (0..n)
        .fold(PcapBuilder::ethernet(), |b, i| b.record(1_700_000_000 + i, 0, &frame))
        .write()
}

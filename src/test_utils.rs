//! Builders for test frames.

use std::path::Path;

use pcap::Linktype;

use crate::pcap_file::{CapturedFrame, Timestamp};

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_IPV6: u16 = 0x86dd;
pub const ETHERTYPE_ARP: u16 = 0x0806;

pub const PROTO_ICMP: u8 = 1;
pub const PROTO_TCP: u8 = 6;
pub const PROTO_UDP: u8 = 17;
pub const PROTO_ICMPV6: u8 = 58;

pub const SRC_MAC: [u8; 6] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
pub const DST_MAC: [u8; 6] = [0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb];

pub fn ethernet(ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(14 + payload.len());
    frame.extend_from_slice(&DST_MAC);
    frame.extend_from_slice(&SRC_MAC);
    frame.extend_from_slice(&ethertype.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// IPv4 header without options, total length covering `payload`.
pub fn ipv4(protocol: u8, payload: &[u8]) -> Vec<u8> {
    let total = (20 + payload.len()) as u16;
    let mut packet = vec![
        0x45, 0x00, // version 4, IHL 5, TOS
    ];
    packet.extend_from_slice(&total.to_be_bytes());
    packet.extend_from_slice(&[0x12, 0x34]); // identification
    packet.extend_from_slice(&[0x40, 0x00]); // DF, fragment offset 0
    packet.push(64); // TTL
    packet.push(protocol);
    packet.extend_from_slice(&[0x00, 0x00]); // checksum
    packet.extend_from_slice(&[192, 168, 1, 1]);
    packet.extend_from_slice(&[192, 168, 1, 2]);
    packet.extend_from_slice(payload);
    packet
}

pub fn ipv6(next_header: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x60, 0x00, 0x00, 0x00];
    packet.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    packet.push(next_header);
    packet.push(64); // hop limit
    let mut src = [0u8; 16];
    src[0] = 0xfe;
    src[1] = 0x80;
    src[15] = 1;
    let mut dst = src;
    dst[15] = 2;
    packet.extend_from_slice(&src);
    packet.extend_from_slice(&dst);
    packet.extend_from_slice(payload);
    packet
}

/// TCP header without options.
pub fn tcp(src_port: u16, dst_port: u16, flags: u8, payload: &[u8]) -> Vec<u8> {
    let mut segment = Vec::with_capacity(20 + payload.len());
    segment.extend_from_slice(&src_port.to_be_bytes());
    segment.extend_from_slice(&dst_port.to_be_bytes());
    segment.extend_from_slice(&1000u32.to_be_bytes()); // sequence
    segment.extend_from_slice(&2000u32.to_be_bytes()); // acknowledgement
    segment.push(5 << 4); // data offset
    segment.push(flags);
    segment.extend_from_slice(&65535u16.to_be_bytes()); // window
    segment.extend_from_slice(&[0x00, 0x00]); // checksum
    segment.extend_from_slice(&[0x00, 0x00]); // urgent pointer
    segment.extend_from_slice(payload);
    segment
}

pub fn udp(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut datagram = Vec::with_capacity(8 + payload.len());
    datagram.extend_from_slice(&src_port.to_be_bytes());
    datagram.extend_from_slice(&dst_port.to_be_bytes());
    datagram.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    datagram.extend_from_slice(&[0x00, 0x00]); // checksum
    datagram.extend_from_slice(payload);
    datagram
}

pub fn icmp(icmp_type: u8, code: u8, payload: &[u8]) -> Vec<u8> {
    let mut message = vec![icmp_type, code, 0xab, 0xcd];
    message.extend_from_slice(&[0x00, 0x01, 0x00, 0x02]); // identifier, sequence
    message.extend_from_slice(payload);
    message
}

/// Wraps `payload` in a frame as a capture reader would hand it out.
pub fn frame<'a>(link_type: Linktype, payload: &'a [u8]) -> CapturedFrame<'a> {
    CapturedFrame {
        id: 0,
        source: Path::new("test.pcap"),
        timestamp: Timestamp::new(1_000_000_000, 0),
        wire_length: payload.len() as u32,
        link_type,
        captured_length: payload.len() as u32,
        payload,
    }
}

pub fn ethernet_frame(payload: &[u8]) -> CapturedFrame<'_> {
    frame(Linktype(1), payload)
}

use std::fmt;
use std::ops::AddAssign;

use crate::error::Layer;
use crate::pcap_file::CapturedFrame;

/// Counters for one capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketStats {
    /// Frames read, whatever their decode outcome.
    pub num_packets: u64,
    /// Sum of captured lengths.
    pub num_bytes: u64,
    pub num_ethernet: u64,
    pub num_ipv4: u64,
    pub num_ipv6: u64,
    pub num_tcp: u64,
    pub num_udp: u64,
    pub num_icmp: u64,
    /// Opaque-data deliveries.
    pub num_data: u64,
    /// Frames whose decode stopped on a truncated or malformed header.
    pub num_malformed: u64,
}

impl PacketStats {
    pub fn record_frame(&mut self, frame: &CapturedFrame<'_>) {
        self.num_packets += 1;
        self.num_bytes += frame.payload.len() as u64;
    }

    pub fn record_layer(&mut self, layer: Layer) {
        *self.layer_counter(layer) += 1;
    }

    pub fn layer_count(&self, layer: Layer) -> u64 {
        match layer {
            Layer::Ethernet => self.num_ethernet,
            Layer::Ipv4 => self.num_ipv4,
            Layer::Ipv6 => self.num_ipv6,
            Layer::Tcp => self.num_tcp,
            Layer::Udp => self.num_udp,
            Layer::Icmp => self.num_icmp,
            Layer::Data => self.num_data,
        }
    }

    pub fn num_ip(&self) -> u64 {
        self.num_ipv4 + self.num_ipv6
    }

    fn layer_counter(&mut self, layer: Layer) -> &mut u64 {
        match layer {
            Layer::Ethernet => &mut self.num_ethernet,
            Layer::Ipv4 => &mut self.num_ipv4,
            Layer::Ipv6 => &mut self.num_ipv6,
            Layer::Tcp => &mut self.num_tcp,
            Layer::Udp => &mut self.num_udp,
            Layer::Icmp => &mut self.num_icmp,
            Layer::Data => &mut self.num_data,
        }
    }
}

impl AddAssign for PacketStats {
    fn add_assign(&mut self, other: Self) {
        self.num_packets += other.num_packets;
        self.num_bytes += other.num_bytes;
        self.num_ethernet += other.num_ethernet;
        self.num_ipv4 += other.num_ipv4;
        self.num_ipv6 += other.num_ipv6;
        self.num_tcp += other.num_tcp;
        self.num_udp += other.num_udp;
        self.num_icmp += other.num_icmp;
        self.num_data += other.num_data;
        self.num_malformed += other.num_malformed;
    }
}

impl fmt::Display for PacketStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  packets:   {}", self.num_packets)?;
        writeln!(f, "  bytes:     {}", self.num_bytes)?;
        writeln!(f, "  ethernet:  {}", self.num_ethernet)?;
        writeln!(f, "  ipv4:      {}", self.num_ipv4)?;
        writeln!(f, "  ipv6:      {}", self.num_ipv6)?;
        writeln!(f, "  tcp:       {}", self.num_tcp)?;
        writeln!(f, "  udp:       {}", self.num_udp)?;
        writeln!(f, "  icmp:      {}", self.num_icmp)?;
        writeln!(f, "  data:      {}", self.num_data)?;
        write!(f, "  malformed: {}", self.num_malformed)
    }
}

//! Walks one captured frame down the protocol stack.
//!
//! Order is fixed: pcap-level handler, link layer, network layer, transport
//! layer, then opaque data for whatever is left. Each decoded layer bumps
//! its counter and calls its handler. A handler returning `Break` stops this
//! frame only. A decode failure stops this frame, counts it as malformed and
//! is not reported any further.

use std::ops::ControlFlow;

use log::{debug, trace};

use crate::callbacks::CallbackSet;
use crate::error::{DecodeError, Layer};
use crate::headers::{
    decode_data, decode_ethernet, decode_icmp, decode_ipv4, decode_ipv6, decode_tcp, decode_udp,
    LayerView, NextLayer, Region,
};
use crate::pcap_file::CapturedFrame;
use crate::stats::PacketStats;

/// `DLT_`/`LINKTYPE_` values the chain knows how to start from.
pub mod link_types {
    pub const ETHERNET: i32 = 1;
    /// libpcap hands back `DLT_RAW`, whose value is platform dependent.
    pub const DLT_RAW: i32 = 12;
    pub const DLT_RAW_OPENBSD: i32 = 14;
    pub const RAW: i32 = 101;
    pub const IPV4: i32 = 228;
    pub const IPV6: i32 = 229;
}

/// How dispatch of one frame ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every applicable layer was delivered.
    Complete,
    /// A handler asked to stop after the given layer.
    Stopped(Option<Layer>),
    /// A header failed to decode; `num_malformed` was bumped.
    Malformed(DecodeError),
}

type Step = Result<ControlFlow<Option<Layer>>, DecodeError>;

pub fn dispatch(
    frame: &CapturedFrame<'_>,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Outcome {
    match walk(frame, callbacks, stats) {
        Ok(ControlFlow::Continue(())) => Outcome::Complete,
        Ok(ControlFlow::Break(layer)) => {
            trace!("frame {}: handler stopped dispatch", frame.id);
            Outcome::Stopped(layer)
        }
        Err(err) => {
            stats.num_malformed += 1;
            debug!("{}: frame {}: {}", frame.source.display(), frame.id, err);
            Outcome::Malformed(err)
        }
    }
}

fn walk(
    frame: &CapturedFrame<'_>,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    if callbacks.call_pcap(frame).is_break() {
        return Ok(ControlFlow::Break(None));
    }

    let bytes = frame.payload;
    let first = match frame.link_type.0 {
        link_types::ETHERNET => return ethernet_layer(bytes, callbacks, stats),
        link_types::DLT_RAW | link_types::DLT_RAW_OPENBSD | link_types::RAW => {
            match bytes.first().map(|b| b >> 4) {
                Some(6) => NextLayer::Ipv6,
                _ => NextLayer::Ipv4,
            }
        }
        link_types::IPV4 => NextLayer::Ipv4,
        link_types::IPV6 => NextLayer::Ipv6,
        other => {
            trace!("frame {}: link type {} has no decoder", frame.id, other);
            NextLayer::Unknown
        }
    };
    next(first, bytes, 0, callbacks, stats)
}

/// Counts a decoded layer and hands it to its handler.
fn deliver<'a, V: LayerView<'a>>(
    view: &V,
    stats: &mut PacketStats,
    call: impl FnOnce(&V) -> ControlFlow<()>,
) -> ControlFlow<Option<Layer>> {
    stats.record_layer(V::LAYER);
    match call(view) {
        ControlFlow::Continue(()) => ControlFlow::Continue(()),
        ControlFlow::Break(()) => ControlFlow::Break(Some(V::LAYER)),
    }
}

fn next(
    layer: NextLayer,
    bytes: &[u8],
    offset: usize,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    match layer {
        NextLayer::Ipv4 => ipv4_layer(bytes, offset, callbacks, stats),
        NextLayer::Ipv6 => ipv6_layer(bytes, offset, callbacks, stats),
        NextLayer::Tcp => {
            let view = decode_tcp(bytes, offset)?;
            if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_tcp(v)) {
                return Ok(ControlFlow::Break(layer));
            }
            remainder(view.region(), callbacks, stats)
        }
        NextLayer::Udp => {
            let view = decode_udp(bytes, offset)?;
            if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_udp(v)) {
                return Ok(ControlFlow::Break(layer));
            }
            remainder(view.region(), callbacks, stats)
        }
        NextLayer::Icmp => {
            let view = decode_icmp(bytes, offset)?;
            if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_icmp(v)) {
                return Ok(ControlFlow::Break(layer));
            }
            remainder(view.region(), callbacks, stats)
        }
        NextLayer::Unknown => data_layer(bytes, offset, callbacks, stats),
        NextLayer::None => Ok(ControlFlow::Continue(())),
    }
}

fn ethernet_layer(
    bytes: &[u8],
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    let view = decode_ethernet(bytes, 0)?;
    if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_ethernet(v)) {
        return Ok(ControlFlow::Break(layer));
    }
    let region = view.region();
    next(
        view.next_layer(),
        region.bounded_frame(),
        region.payload_offset(),
        callbacks,
        stats,
    )
}

fn ipv4_layer(
    bytes: &[u8],
    offset: usize,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    let view = decode_ipv4(bytes, offset)?;
    if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_ipv4(v)) {
        return Ok(ControlFlow::Break(layer));
    }
    let region = view.region();
    next(
        view.next_layer(),
        region.bounded_frame(),
        region.payload_offset(),
        callbacks,
        stats,
    )
}

fn ipv6_layer(
    bytes: &[u8],
    offset: usize,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    let view = decode_ipv6(bytes, offset)?;
    if let ControlFlow::Break(layer) = deliver(&view, stats, |v| callbacks.call_ipv6(v)) {
        return Ok(ControlFlow::Break(layer));
    }
    let region = view.region();
    next(
        view.next_layer(),
        region.bounded_frame(),
        region.payload_offset(),
        callbacks,
        stats,
    )
}

/// Payload left after a transport header goes out as opaque data, if any.
fn remainder(
    region: Region<'_>,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    if region.payload_len() == 0 {
        return Ok(ControlFlow::Continue(()));
    }
    data_layer(region.bounded_frame(), region.payload_offset(), callbacks, stats)
}

fn data_layer(
    bytes: &[u8],
    offset: usize,
    callbacks: &mut CallbackSet<'_>,
    stats: &mut PacketStats,
) -> Step {
    let view = decode_data(bytes, offset)?;
    Ok(deliver(&view, stats, |v| callbacks.call_data(v)))
}

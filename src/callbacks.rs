//! Per-layer handlers.
//!
//! A [`CallbackSet`] holds at most one handler per layer kind. Handlers get
//! a borrowed view that is only valid for the call; they return
//! `ControlFlow::Break(())` to stop dispatch of the current frame.

use std::fmt;
use std::ops::ControlFlow;

use crate::headers::{
    DataView, EthernetView, IcmpView, Ipv4View, Ipv6View, TcpView, UdpView,
};
use crate::pcap_file::CapturedFrame;

macro_rules! callback_slots {
    ($( $field:ident, $register:ident, $invoke:ident: $view:ident; )*) => {
        /// Optional handler per layer, checked for presence before each call.
        #[derive(Default)]
        pub struct CallbackSet<'cb> {
            $( $field: Option<Box<dyn FnMut(&$view<'_>) -> ControlFlow<()> + 'cb>>, )*
        }

        impl<'cb> CallbackSet<'cb> {
            $(
                pub fn $register<F>(mut self, handler: F) -> Self
                where
                    F: FnMut(&$view<'_>) -> ControlFlow<()> + 'cb,
                {
                    self.$field = Some(Box::new(handler));
                    self
                }

                pub(crate) fn $invoke(&mut self, view: &$view<'_>) -> ControlFlow<()> {
                    match self.$field.as_mut() {
                        Some(handler) => handler(view),
                        None => ControlFlow::Continue(()),
                    }
                }
            )*

            /// Whether no handler at all is registered.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }

        impl fmt::Debug for CallbackSet<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("CallbackSet")
                    $( .field(stringify!($field), &self.$field.is_some()) )*
                    .finish()
            }
        }
    };
}

callback_slots! {
    pcap, on_pcap, call_pcap: CapturedFrame;
    ethernet, on_ethernet, call_ethernet: EthernetView;
    ipv4, on_ipv4, call_ipv4: Ipv4View;
    ipv6, on_ipv6, call_ipv6: Ipv6View;
    tcp, on_tcp, call_tcp: TcpView;
    udp, on_udp, call_udp: UdpView;
    icmp, on_icmp, call_icmp: IcmpView;
    data, on_data, call_data: DataView;
}

impl CallbackSet<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}

//! rtnetlink requests and reply handling
//!
//! Each received datagram is handed to a reply handler together with the
//! sequence number of the request it answers. The handler returns
//! [`ControlFlow::Continue`] while more datagrams are expected and
//! [`ControlFlow::Break`] once the answer is complete.

use std::net::IpAddr;
use std::ops::ControlFlow;

use bytes::{Bytes, BytesMut};
use netlink_packet_core::{
    NLM_F_DUMP, NLM_F_REQUEST, NetlinkHeader, NetlinkMessage, NetlinkPayload,
};
use netlink_packet_route::link::{LinkAttribute, LinkMessage};
use netlink_packet_route::route::{RouteAddress, RouteAttribute, RouteMessage};
use netlink_packet_route::{AddressFamily, RouteNetlinkMessage};
use tracing::{debug, trace};

use super::NetlinkError;
use crate::route::{InterfaceInfo, PathHop, RouteDestination, RouteEntry};

/// Main routing table id
pub(crate) const RT_TABLE_MAIN: u32 = 254;

const RTM_F_CLONED: u32 = 0x200;
const ENODEV: i32 = 19;

fn encode(mut message: NetlinkMessage<RouteNetlinkMessage>) -> Bytes {
    message.finalize();
    let mut buf = BytesMut::zeroed(message.buffer_len());
    message.serialize(&mut buf);
    buf.freeze()
}

fn request(seq: u32, flags: u16, inner: RouteNetlinkMessage) -> Bytes {
    let mut header = NetlinkHeader::default();
    header.flags = flags;
    header.sequence_number = seq;
    encode(NetlinkMessage::new(
        header,
        NetlinkPayload::InnerMessage(inner),
    ))
}

/// Request dumping the routes of every address family.
pub(crate) fn route_dump_request(seq: u32) -> Bytes {
    let mut route = RouteMessage::default();
    route.header.address_family = AddressFamily::Unspec;
    request(
        seq,
        NLM_F_REQUEST | NLM_F_DUMP,
        RouteNetlinkMessage::GetRoute(route),
    )
}

/// Request a single link by interface index.
pub(crate) fn link_request(seq: u32, index: u32) -> Bytes {
    let mut link = LinkMessage::default();
    link.header.index = index;
    request(seq, NLM_F_REQUEST, RouteNetlinkMessage::GetLink(link))
}

/// Split one datagram into its netlink messages.
fn messages(datagram: &[u8]) -> Result<Vec<NetlinkMessage<RouteNetlinkMessage>>, NetlinkError> {
    let mut messages = Vec::new();
    let mut offset = 0;
    while offset < datagram.len() {
        let message = NetlinkMessage::<RouteNetlinkMessage>::deserialize(&datagram[offset..])
            .map_err(|err| NetlinkError::Malformed(err.to_string()))?;
        let len = message.header.length as usize;
        if len == 0 {
            return Err(NetlinkError::Malformed("zero-length message".into()));
        }
        offset += (len + 3) & !3;
        messages.push(message);
    }
    Ok(messages)
}

fn kernel_error(code: i32) -> NetlinkError {
    NetlinkError::Kernel {
        errno: code.wrapping_neg(),
    }
}

/// Handle one datagram of a route dump, collecting routes of `table`.
pub(crate) fn route_dump_reply(
    datagram: &[u8],
    seq: u32,
    table: u32,
    routes: &mut Vec<RouteEntry>,
) -> Result<ControlFlow<()>, NetlinkError> {
    for message in messages(datagram)? {
        if message.header.sequence_number != seq {
            trace!(
                seq = message.header.sequence_number,
                "ignoring unrelated netlink message"
            );
            continue;
        }
        match message.payload {
            NetlinkPayload::Done(done) => {
                if done.code < 0 {
                    debug!(errno = done.code.wrapping_neg(), "route dump interrupted");
                    return Err(kernel_error(done.code));
                }
                trace!(count = routes.len(), "route dump complete");
                return Ok(ControlFlow::Break(()));
            }
            NetlinkPayload::Error(err) => {
                // An error message without a code is an acknowledgement.
                if let Some(code) = err.code {
                    debug!(errno = code.get().wrapping_neg(), "route dump rejected");
                    return Err(kernel_error(code.get()));
                }
            }
            NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewRoute(route)) => {
                routes.extend(route_entry(&route, table));
            }
            _ => {}
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// Handle one datagram answering a link lookup for `index`.
pub(crate) fn link_reply(
    datagram: &[u8],
    seq: u32,
    index: u32,
) -> Result<ControlFlow<InterfaceInfo>, NetlinkError> {
    for message in messages(datagram)? {
        if message.header.sequence_number != seq {
            trace!(
                seq = message.header.sequence_number,
                "ignoring unrelated netlink message"
            );
            continue;
        }
        match message.payload {
            NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewLink(link)) => {
                return Ok(ControlFlow::Break(interface_info(&link)));
            }
            NetlinkPayload::Error(err) => {
                return Err(match err.code.map(|code| code.get().wrapping_neg()) {
                    None => NetlinkError::NoResponse,
                    Some(ENODEV) => NetlinkError::LinkNotFound { index },
                    Some(errno) => NetlinkError::Kernel { errno },
                });
            }
            NetlinkPayload::Done(_) => return Err(NetlinkError::NoResponse),
            _ => {}
        }
    }
    Ok(ControlFlow::Continue(()))
}

/// Convert a route, or `None` when it lies outside `table`, is a cloned
/// cache entry, or has a non-IP destination.
fn route_entry(route: &RouteMessage, table: u32) -> Option<RouteEntry> {
    let mut entry = RouteEntry::default();
    let mut route_table = u32::from(route.header.table);
    for attr in &route.attributes {
        match attr {
            RouteAttribute::Destination(addr) => {
                let addr = match addr {
                    RouteAddress::Inet(v4) => IpAddr::V4(*v4),
                    RouteAddress::Inet6(v6) => IpAddr::V6(*v6),
                    _ => return None,
                };
                entry.destination = Some(RouteDestination::new(
                    addr,
                    route.header.destination_prefix_length,
                ));
            }
            RouteAttribute::Oif(index) => entry.out_interface_index = *index,
            RouteAttribute::Table(id) => route_table = *id,
            RouteAttribute::MultiPath(hops) => {
                entry.multipath = hops
                    .iter()
                    .map(|hop| PathHop::new(hop.interface_index))
                    .collect();
            }
            _ => {}
        }
    }

    if route_table != table || route.header.flags.bits() & RTM_F_CLONED != 0 {
        return None;
    }
    Some(entry)
}

fn interface_info(link: &LinkMessage) -> InterfaceInfo {
    // A link without IFLA_MTU reads as unset.
    let mut info = InterfaceInfo::new(link.header.index, 0);
    for attr in &link.attributes {
        match attr {
            LinkAttribute::Mtu(mtu) => info.mtu = i64::from(*mtu),
            LinkAttribute::IfName(name) => info.name = Some(name.clone()),
            _ => {}
        }
    }
    info
}

//! rtnetlink-backed route and interface sources (Linux)

mod error;
mod message;

use std::ops::ControlFlow;
use std::sync::{Mutex, MutexGuard};

use netlink_sys::protocols::NETLINK_ROUTE;
use netlink_sys::{Socket, SocketAddr};
use tracing::instrument;

pub use error::NetlinkError;

use crate::route::{InterfaceInfo, InterfaceSource, RouteEntry, RouteSource};

/// Netlink source configuration options.
#[derive(Debug, Clone)]
pub struct NetlinkConfig {
    /// Routing table whose routes are listed (main table by default).
    pub table: u32,
}

impl Default for NetlinkConfig {
    fn default() -> Self {
        Self {
            table: message::RT_TABLE_MAIN,
        }
    }
}

/// Route and interface source reading the kernel tables over rtnetlink.
///
/// Requests are serialized on one socket, so a value can be shared between
/// threads.
#[derive(Debug)]
pub struct NetlinkRoutes {
    inner: Mutex<Connection>,
    table: u32,
}

struct Connection {
    socket: Socket,
    seq: u32,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl Connection {
    fn send(&mut self, request: impl FnOnce(u32) -> bytes::Bytes) -> Result<u32, NetlinkError> {
        self.seq = self.seq.wrapping_add(1);
        self.socket.send(&request(self.seq), 0)?;
        Ok(self.seq)
    }

    /// Receive one whole datagram, however large.
    fn recv(&self) -> Result<Vec<u8>, NetlinkError> {
        let (datagram, _) = self.socket.recv_from_full()?;
        if datagram.is_empty() {
            return Err(NetlinkError::NoResponse);
        }
        Ok(datagram)
    }
}

impl NetlinkRoutes {
    /// Open a source with the default configuration.
    pub fn open() -> Result<Self, NetlinkError> {
        Self::with_config(&NetlinkConfig::default())
    }

    /// Open a source with the provided configuration.
    pub fn with_config(config: &NetlinkConfig) -> Result<Self, NetlinkError> {
        let mut socket = Socket::new(NETLINK_ROUTE)?;
        socket.bind_auto()?;
        socket.connect(&SocketAddr::new(0, 0))?;
        Ok(Self {
            inner: Mutex::new(Connection { socket, seq: 0 }),
            table: config.table,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, NetlinkError> {
        self.inner
            .lock()
            .map_err(|_| NetlinkError::Io(std::io::Error::other("netlink connection poisoned")))
    }

    /// Dump the configured routing table of every address family.
    #[instrument(level = "trace", skip(self))]
    pub fn routes(&self) -> Result<Vec<RouteEntry>, NetlinkError> {
        let mut conn = self.lock()?;
        let seq = conn.send(message::route_dump_request)?;

        let mut routes = Vec::new();
        loop {
            let datagram = conn.recv()?;
            if message::route_dump_reply(&datagram, seq, self.table, &mut routes)?.is_break() {
                return Ok(routes);
            }
        }
    }

    /// Look up a single link by interface index.
    #[instrument(level = "trace", skip(self))]
    pub fn link(&self, index: u32) -> Result<InterfaceInfo, NetlinkError> {
        // The kernel takes a signed index.
        if i32::try_from(index).is_err() {
            return Err(NetlinkError::LinkNotFound { index });
        }

        let mut conn = self.lock()?;
        let seq = conn.send(|seq| message::link_request(seq, index))?;
        loop {
            let datagram = conn.recv()?;
            if let ControlFlow::Break(info) = message::link_reply(&datagram, seq, index)? {
                return Ok(info);
            }
        }
    }
}

impl RouteSource for NetlinkRoutes {
    type Error = NetlinkError;

    fn list_routes(&self) -> Result<Vec<RouteEntry>, NetlinkError> {
        self.routes()
    }
}

impl InterfaceSource for NetlinkRoutes {
    type Error = NetlinkError;

    fn interface_by_index(&self, index: u32) -> Result<InterfaceInfo, NetlinkError> {
        self.link(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reads_main_table() {
        assert_eq!(NetlinkConfig::default().table, 254);
    }

    #[test]
    fn kernel_error_message_is_readable() {
        let err = NetlinkError::Kernel { errno: 1 };
        assert!(err.to_string().starts_with("kernel returned error"));
        let err = NetlinkError::LinkNotFound { index: 12 };
        assert_eq!(err.to_string(), "link not found: index 12");
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        // Sandboxed builders may forbid netlink sockets.
        let Ok(source) = NetlinkRoutes::open() else {
            return;
        };
        assert!(matches!(
            source.link(u32::MAX),
            Err(NetlinkError::LinkNotFound { index: u32::MAX })
        ));
    }

    #[test]
    fn live_route_dump() {
        let Ok(source) = NetlinkRoutes::open() else {
            return;
        };
        let Ok(routes) = source.routes() else {
            return;
        };
        for route in routes.iter().filter(|route| route.out_interface_index != 0) {
            if let Ok(info) = source.link(route.out_interface_index) {
                assert_eq!(info.index, route.out_interface_index);
            }
        }
        assert!(source.link(i32::MAX as u32).is_err());
    }
}

//! routemtu - effective MTU of the host's default route
//!
//! Overlays and tunnels must size their encapsulated packets so they never
//! exceed what the underlying default path carries without fragmentation.
//! This crate walks the routing table, picks out the default routes
//! (including every leg of a multipath default), and returns the smallest MTU
//! configured on their outbound interfaces.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> Result<(), routemtu::Error> {
//! let mtu = routemtu::resolve_default_mtu()?;
//!
//! // Leave room for an outer IPv4 + UDP header.
//! let inner_mtu = mtu.saturating_sub(28).max(routemtu::MIN_MTU_V4);
//! # let _ = inner_mtu;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```
//!
//! # Custom sources
//!
//! The resolver only talks to a [`RouteSource`] and an [`InterfaceSource`].
//! On Linux both are provided by [`NetlinkRoutes`]; anything else (a
//! snapshot, a test double, another OS API) can implement the two traits and
//! be handed to [`MtuResolver::new`].
//!
//! # Limitations
//!
//! Default routes of every address family are reduced together; there is no
//! special handling for IPv6-only hosts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[cfg(target_os = "linux")]
pub mod netlink;
pub mod route;

#[cfg(target_os = "linux")]
pub use netlink::{NetlinkConfig, NetlinkError, NetlinkRoutes};
pub use route::{
    Error, InterfaceInfo, InterfaceSource, IpVersion, MAX_MTU, MIN_MTU_V4, MIN_MTU_V6,
    MtuResolver, PathHop, Result, RouteDestination, RouteEntry, RouteSource,
};

/// Resolve the default-path MTU from the kernel routing table.
///
/// Opens a fresh rtnetlink socket for the call, so concurrent callers do not
/// share any state.
#[cfg(target_os = "linux")]
pub fn resolve_default_mtu() -> Result<u32> {
    let source = NetlinkRoutes::open()?;
    MtuResolver::new(&source, &source).resolve()
}

//! Default-route MTU resolution
//!
//! This module reduces the routing table to the smallest interface MTU among
//! the routes that carry default traffic, including every leg of a multipath
//! default.

mod error;
mod resolver;
mod source;
mod types;

pub use error::{Error, Result};
pub use resolver::MtuResolver;
pub use source::{InterfaceSource, RouteSource};
pub use types::{InterfaceInfo, IpVersion, PathHop, RouteDestination, RouteEntry};

/// Smallest MTU every IPv4 host must accept (RFC 791)
pub const MIN_MTU_V4: u32 = 576;

/// Smallest MTU an IPv6 link may have (RFC 8200)
pub const MIN_MTU_V6: u32 = 1280;

/// Largest interface MTU taken into account
pub const MAX_MTU: u32 = 65536;

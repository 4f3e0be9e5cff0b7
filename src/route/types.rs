//! Routing-table snapshot types

use core::fmt;
use std::net::IpAddr;

use super::{MAX_MTU, MIN_MTU_V4, MIN_MTU_V6};

/// Destination prefix of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDestination {
    /// Network address
    pub addr: IpAddr,
    /// Prefix length in bits
    pub prefix_len: u8,
}

impl RouteDestination {
    /// Create a destination prefix.
    #[must_use]
    pub const fn new(addr: IpAddr, prefix_len: u8) -> Self {
        Self { addr, prefix_len }
    }
}

impl fmt::Display for RouteDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

/// One leg of a multipath route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathHop {
    /// Outbound interface index of this leg
    pub interface_index: u32,
}

impl PathHop {
    /// Create a hop leaving through `interface_index`.
    #[must_use]
    pub const fn new(interface_index: u32) -> Self {
        Self { interface_index }
    }
}

/// A single routing-table record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEntry {
    /// Destination prefix; `None` for a default route
    pub destination: Option<RouteDestination>,
    /// Outbound interface index; 0 when unset (see `multipath`)
    pub out_interface_index: u32,
    /// Legs of a multipath route, in kernel order
    pub multipath: Vec<PathHop>,
}

impl RouteEntry {
    /// Default route leaving through a single interface.
    #[must_use]
    pub fn default_via(out_interface_index: u32) -> Self {
        Self {
            destination: None,
            out_interface_index,
            multipath: Vec::new(),
        }
    }

    /// Default route spread over several interfaces.
    #[must_use]
    pub fn default_multipath<I>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            destination: None,
            out_interface_index: 0,
            multipath: interfaces.into_iter().map(PathHop::new).collect(),
        }
    }

    /// Route towards a specific prefix.
    #[must_use]
    pub fn to_prefix(destination: RouteDestination, out_interface_index: u32) -> Self {
        Self {
            destination: Some(destination),
            out_interface_index,
            multipath: Vec::new(),
        }
    }

    /// Whether this entry is a default route.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.destination.is_none()
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.destination {
            Some(dst) => write!(f, "dst {dst}")?,
            None => f.write_str("dst default")?,
        }
        write!(f, " oif {}", self.out_interface_index)?;
        if !self.multipath.is_empty() {
            f.write_str(" multipath [")?;
            for (i, hop) in self.multipath.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", hop.interface_index)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Interface attributes looked up by index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceInfo {
    /// Interface index
    pub index: u32,
    /// Interface name, when the source reports one
    pub name: Option<String>,
    /// Configured MTU in bytes; zero or negative means unknown
    pub mtu: i64,
}

impl InterfaceInfo {
    /// Create an unnamed interface record.
    #[must_use]
    pub const fn new(index: u32, mtu: i64) -> Self {
        Self {
            index,
            name: None,
            mtu,
        }
    }

    /// The MTU if it is usable for the default-path minimum.
    ///
    /// Zero and negative values mean the MTU is unset. Values above
    /// [`MAX_MTU`] are out of range and ignored as well.
    #[must_use]
    pub fn valid_mtu(&self) -> Option<u32> {
        u32::try_from(self.mtu)
            .ok()
            .filter(|mtu| (1..=MAX_MTU).contains(mtu))
    }
}

/// IP protocol version, for callers clamping against the RFC floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpVersion {
    /// Minimum link MTU for this version.
    #[must_use]
    pub const fn min_mtu(self) -> u32 {
        match self {
            Self::V4 => MIN_MTU_V4,
            Self::V6 => MIN_MTU_V6,
        }
    }
}

impl From<IpAddr> for IpVersion {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn only_missing_destination_is_default() {
        assert!(RouteEntry::default_via(2).is_default());
        assert!(RouteEntry::default_multipath([2, 3]).is_default());

        let zero_prefix = RouteDestination::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        assert!(!RouteEntry::to_prefix(zero_prefix, 2).is_default());
    }

    #[test]
    fn route_display_names_interfaces() {
        let route = RouteEntry::default_multipath([3, 7]);
        assert_eq!(route.to_string(), "dst default oif 0 multipath [3, 7]");

        let dst = RouteDestination::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 8);
        assert_eq!(RouteEntry::to_prefix(dst, 4).to_string(), "dst 10.0.0.0/8 oif 4");
    }

    #[test]
    fn valid_mtu_excludes_unset_and_out_of_range() {
        assert_eq!(InterfaceInfo::new(1, 1500).valid_mtu(), Some(1500));
        assert_eq!(InterfaceInfo::new(1, 65536).valid_mtu(), Some(65536));
        assert_eq!(InterfaceInfo::new(1, 0).valid_mtu(), None);
        assert_eq!(InterfaceInfo::new(1, -1).valid_mtu(), None);
        assert_eq!(InterfaceInfo::new(1, 65537).valid_mtu(), None);
    }

    #[test]
    fn version_floors() {
        assert_eq!(IpVersion::V4.min_mtu(), 576);
        assert_eq!(IpVersion::V6.min_mtu(), 1280);
        assert_eq!(
            IpVersion::from(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            IpVersion::V4
        );
    }
}

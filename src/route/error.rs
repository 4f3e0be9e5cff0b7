//! Resolver error types

use thiserror::Error;

#[cfg(target_os = "linux")]
use crate::netlink::NetlinkError;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Default-route MTU resolution errors
#[derive(Error, Debug)]
pub enum Error {
    /// Routing table could not be read
    #[error("could not list routes")]
    RouteQueryFailed {
        /// Error reported by the route source
        #[source]
        source: Source,
    },

    /// Routing table was empty
    #[error("got no routes")]
    NoRoutesFound,

    /// Default route with neither an interface index nor multipath legs
    #[error("[{route}] route has an unset link index and is not a multipath route")]
    MalformedRoute {
        /// Rendering of the offending route
        route: String,
    },

    /// Interface lookup failed
    #[error("could not retrieve link id {index}")]
    InterfaceLookupFailed {
        /// Interface index being looked up
        index: u32,
        /// Error reported by the interface source
        #[source]
        source: Source,
    },

    /// No default-route interface reported a usable MTU
    #[error("unable to determine MTU")]
    NoMtuDetermined,

    /// Netlink socket could not be opened
    #[cfg(target_os = "linux")]
    #[error("netlink error: {0}")]
    Netlink(#[from] NetlinkError),
}

impl Error {
    pub(crate) fn route_query<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RouteQueryFailed {
            source: Box::new(err),
        }
    }

    pub(crate) fn interface_lookup<E>(index: u32, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InterfaceLookupFailed {
            index,
            source: Box::new(err),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

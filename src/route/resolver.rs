//! Default-path MTU resolver.

use tracing::{debug, instrument, trace};

use super::{Error, InterfaceSource, Result, RouteEntry, RouteSource};

/// Resolves the MTU of the host's default path.
///
/// Every default route (a route without a destination) contributes the MTU of
/// its outbound interface, or of each leg when it is a multipath route. The
/// result is the smallest usable value among them.
///
/// A default route with neither an interface index nor multipath legs aborts
/// the whole resolution, while an interface reporting no usable MTU is only
/// skipped.
#[derive(Debug, Clone)]
pub struct MtuResolver<R, I> {
    routes: R,
    interfaces: I,
}

impl<R, I> MtuResolver<R, I>
where
    R: RouteSource,
    I: InterfaceSource,
{
    /// Create a resolver over the given route and interface sources.
    pub const fn new(routes: R, interfaces: I) -> Self {
        Self { routes, interfaces }
    }

    /// Resolve the default-path MTU.
    ///
    /// The routing table and the interfaces are queried afresh on every call;
    /// nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The route source fails
    /// - The routing table is empty
    /// - A default route has no interface index and no multipath legs
    /// - An interface lookup fails
    /// - No default-route interface reports a usable MTU
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self) -> Result<u32> {
        let routes = self.routes.list_routes().map_err(Error::route_query)?;
        if routes.is_empty() {
            return Err(Error::NoRoutesFound);
        }

        let mut best: Option<u32> = None;
        for route in &routes {
            if !route.is_default() {
                trace!(%route, "skipping non-default route");
                continue;
            }
            for index in Self::route_interfaces(route)? {
                self.observe(index, &mut best)?;
            }
        }

        let mtu = best.ok_or(Error::NoMtuDetermined)?;
        debug!(mtu, "resolved default path mtu");
        Ok(mtu)
    }

    fn route_interfaces(route: &RouteEntry) -> Result<Vec<u32>> {
        if route.out_interface_index != 0 {
            return Ok(vec![route.out_interface_index]);
        }
        if route.multipath.is_empty() {
            debug!(%route, "default route without link index");
            return Err(Error::MalformedRoute {
                route: route.to_string(),
            });
        }
        Ok(route
            .multipath
            .iter()
            .map(|hop| hop.interface_index)
            .collect())
    }

    fn observe(&self, index: u32, best: &mut Option<u32>) -> Result<()> {
        let info = self
            .interfaces
            .interface_by_index(index)
            .map_err(|err| Error::interface_lookup(index, err))?;

        let Some(mtu) = info.valid_mtu() else {
            trace!(index, mtu = info.mtu, "ignoring unusable interface mtu");
            return Ok(());
        };

        if best.is_none_or(|current| mtu < current) {
            debug!(index, name = ?info.name, mtu, "new minimum mtu");
            *best = Some(mtu);
        }
        Ok(())
    }
}

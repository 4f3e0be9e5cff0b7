//! Collaborator seams queried by the resolver.

use super::{InterfaceInfo, RouteEntry};

/// Source of routing-table snapshots.
pub trait RouteSource {
    /// Error returned when the table cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List every route across all address families, unfiltered.
    fn list_routes(&self) -> Result<Vec<RouteEntry>, Self::Error>;
}

/// Source of interface attributes keyed by index.
pub trait InterfaceSource {
    /// Error returned when the lookup fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up one interface. Unknown indices must produce an error.
    fn interface_by_index(&self, index: u32) -> Result<InterfaceInfo, Self::Error>;
}

impl<T: RouteSource + ?Sized> RouteSource for &T {
    type Error = T::Error;

    fn list_routes(&self) -> Result<Vec<RouteEntry>, Self::Error> {
        (**self).list_routes()
    }
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    type Error = T::Error;

    fn interface_by_index(&self, index: u32) -> Result<InterfaceInfo, Self::Error> {
        (**self).interface_by_index(index)
    }
}

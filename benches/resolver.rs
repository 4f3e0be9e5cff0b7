use std::collections::HashMap;
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routemtu::{
    InterfaceInfo, InterfaceSource, MtuResolver, RouteDestination, RouteEntry, RouteSource,
};

struct Snapshot {
    routes: Vec<RouteEntry>,
    links: HashMap<u32, InterfaceInfo>,
}

impl Snapshot {
    /// `prefixes` specific routes plus one multipath default over `hops` links.
    fn new(prefixes: u32, hops: u32) -> Self {
        let mut routes: Vec<RouteEntry> = (0..prefixes)
            .map(|i| {
                let [_, a, b, c] = i.to_be_bytes();
                let dst = RouteDestination::new(IpAddr::V4(Ipv4Addr::new(10, a, b, c)), 32);
                RouteEntry::to_prefix(dst, 1 + i % hops)
            })
            .collect();
        routes.push(RouteEntry::default_multipath(1..=hops));

        let links = (1..=hops)
            .map(|index| (index, InterfaceInfo::new(index, 1400 + i64::from(index))))
            .collect();
        Self { routes, links }
    }
}

impl RouteSource for Snapshot {
    type Error = Infallible;

    fn list_routes(&self) -> Result<Vec<RouteEntry>, Infallible> {
        Ok(self.routes.clone())
    }
}

impl InterfaceSource for Snapshot {
    type Error = std::io::Error;

    fn interface_by_index(&self, index: u32) -> Result<InterfaceInfo, std::io::Error> {
        self.links
            .get(&index)
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");

    // Home router: a handful of routes, single uplink
    let small = Snapshot::new(8, 1);
    group.bench_function("resolve_8_routes", |b| {
        b.iter(|| {
            black_box(MtuResolver::new(&small, &small).resolve().unwrap());
        });
    });

    // Host with a full-ish table and a wide ECMP default
    let large = Snapshot::new(10_000, 16);
    group.bench_function("resolve_10k_routes_16_hops", |b| {
        b.iter(|| {
            black_box(MtuResolver::new(&large, &large).resolve().unwrap());
        });
    });

    group.finish();
}

#[cfg(target_os = "linux")]
fn bench_kernel(c: &mut Criterion) {
    let Ok(source) = routemtu::NetlinkRoutes::open() else {
        return;
    };
    if MtuResolver::new(&source, &source).resolve().is_err() {
        return;
    }
    c.bench_function("resolve_kernel", |b| {
        b.iter(|| {
            black_box(MtuResolver::new(&source, &source).resolve().unwrap());
        });
    });
}

#[cfg(not(target_os = "linux"))]
fn bench_kernel(_c: &mut Criterion) {}

criterion_group!(benches, bench_resolve, bench_kernel);
criterion_main!(benches);

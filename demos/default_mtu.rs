//! Print the MTU of the default route
//!
//! Set `RUST_LOG=routemtu=trace` to see every route and link the resolver
//! inspects.

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let source = routemtu::NetlinkRoutes::open()?;
    for route in source.routes()?.iter().filter(|route| route.is_default()) {
        println!("default route: {route}");
    }

    let mtu = routemtu::MtuResolver::new(&source, &source).resolve()?;
    println!("default path MTU: {mtu}");
    println!(
        "IPv4 floor {} / IPv6 floor {}",
        routemtu::MIN_MTU_V4,
        routemtu::MIN_MTU_V6
    );
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("default_mtu needs rtnetlink and only runs on Linux");
}

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use latmap_common::error::ProbeError;
use tokio::time::timeout;

/// Resolves `host` to a single address, preferring IPv4.
///
/// IP literals are returned as is.
pub async fn resolve(host: &str, limit: Duration) -> Result<IpAddr, ProbeError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let failed = |reason: String| ProbeError::Resolution {
        host: host.to_string(),
        reason,
    };

    let addrs: Vec<SocketAddr> = match timeout(limit, tokio::net::lookup_host((host, 0))).await {
        Ok(Ok(addrs)) => addrs.collect(),
        Ok(Err(e)) => return Err(failed(e.to_string())),
        Err(_elapsed) => return Err(failed("lookup timed out".into())),
    };

    pick_address(&addrs).ok_or_else(|| failed("no addresses returned".into()))
}

fn pick_address(addrs: &[SocketAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .map(SocketAddr::ip)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use latmap_common::error::ProbeError;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::resolver;
use crate::prober::Pinger;

/// Times TCP handshakes.
///
/// A refused or reset connection still needed a full round trip to the host, so
/// it counts as a sample just like an accepted one.
pub struct TcpPinger {
    port: u16,
    probe_timeout: Duration,
}

impl TcpPinger {
    pub fn new(port: u16, probe_timeout: Duration) -> Self {
        Self {
            port,
            probe_timeout,
        }
    }
}

#[async_trait]
impl Pinger for TcpPinger {
    fn name(&self) -> &'static str {
        "tcp"
    }

    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError> {
        resolver::resolve(host, self.probe_timeout).await
    }

    async fn ping(&self, addr: IpAddr) -> Result<Duration, ProbeError> {
        let socket_addr: SocketAddr = SocketAddr::new(addr, self.port);
        let start = Instant::now();

        match timeout(self.probe_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => Ok(start.elapsed()),
            Ok(Err(e)) if host_answered(&e) => Ok(start.elapsed()),
            Ok(Err(e)) => Err(ProbeError::Unreachable(e.to_string())),
            Err(_elapsed) => Err(ProbeError::Timeout),
        }
    }
}

fn host_answered(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

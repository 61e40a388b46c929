use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use latmap_common::catalog::{Catalog, Endpoint};
use latmap_common::error::ProbeError;
use latmap_common::geo::Coordinates;
use latmap_core::prober::Pinger;

/// How a host in the [`LatencyTable`] answers.
#[derive(Clone, Copy)]
pub enum Answer {
    /// Every sample takes this many milliseconds.
    Rtt(u64),
    /// Answers with `rtt` after actually waiting `wait`.
    Delayed { wait: Duration, rtt: u64 },
    /// Resolves but never answers.
    Silent,
    /// Does not resolve.
    Unknown,
}

/// A fake network where every host has a fixed answer.
///
/// Host number `i` lives at `10.0.0.(i + 1)`.
pub struct LatencyTable {
    hosts: Vec<(String, Answer)>,
}

impl LatencyTable {
    pub fn new(hosts: &[(&str, Answer)]) -> Self {
        Self {
            hosts: hosts.iter().map(|(h, a)| (h.to_string(), *a)).collect(),
        }
    }

    fn lookup(&self, addr: IpAddr) -> Option<Answer> {
        let IpAddr::V4(v4) = addr else { return None };
        let idx = usize::from(v4.octets()[3]).checked_sub(1)?;
        self.hosts.get(idx).map(|(_, answer)| *answer)
    }
}

#[async_trait]
impl Pinger for LatencyTable {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError> {
        let unknown = || ProbeError::Resolution {
            host: host.to_string(),
            reason: "NXDOMAIN".into(),
        };
        let idx = self.hosts.iter().position(|(h, _)| h == host).ok_or_else(unknown)?;
        match self.hosts[idx].1 {
            Answer::Unknown => Err(unknown()),
            _ => Ok(IpAddr::V4(Ipv4Addr::new(10, 0, 0, idx as u8 + 1))),
        }
    }

    async fn ping(&self, addr: IpAddr) -> Result<Duration, ProbeError> {
        match self.lookup(addr) {
            Some(Answer::Rtt(ms)) => Ok(Duration::from_millis(ms)),
            Some(Answer::Delayed { wait, rtt }) => {
                tokio::time::sleep(wait).await;
                Ok(Duration::from_millis(rtt))
            }
            Some(Answer::Silent) => Err(ProbeError::Timeout),
            Some(Answer::Unknown) | None => Err(ProbeError::Unreachable(addr.to_string())),
        }
    }
}

/// A catalog whose endpoint `id` has the address `id`.
pub fn catalog(ids: &[&str]) -> Catalog {
    let endpoints: Vec<Endpoint> = ids
        .iter()
        .map(|id| Endpoint::new(*id, *id, Coordinates::new(0.0, 0.0)))
        .collect();
    Catalog::new(endpoints).expect("valid test catalog")
}

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use latmap_common::error::ProbeError;

use super::Pinger;

/// Canned behaviour for one host.
pub(crate) enum Script {
    /// Successive pings answer with these round trips (ms), cycling. `None` times out.
    Samples(Vec<Option<u64>>),
    Unresolvable,
    /// Every ping sleeps for `delay` before answering with `rtt_ms`.
    Slow { delay: Duration, rtt_ms: u64 },
    Panic,
}

impl Script {
    pub(crate) fn samples(samples: &[Option<u64>]) -> Self {
        Script::Samples(samples.to_vec())
    }

    pub(crate) fn fixed(rtt_ms: u64) -> Self {
        Script::Samples(vec![Some(rtt_ms)])
    }
}

/// A [`Pinger`] that never touches the network.
///
/// Host number `i` resolves to `0.0.0.(i + 1)` so pings can find their script again.
pub(crate) struct ScriptedPinger {
    scripts: Vec<(String, Script)>,
    cursors: Vec<AtomicUsize>,
}

impl ScriptedPinger {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Vec::new(),
            cursors: Vec::new(),
        }
    }

    pub(crate) fn with(mut self, host: &str, script: Script) -> Self {
        self.scripts.push((host.to_string(), script));
        self.cursors.push(AtomicUsize::new(0));
        self
    }
}

#[async_trait]
impl Pinger for ScriptedPinger {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError> {
        let unresolvable = || ProbeError::Resolution {
            host: host.to_string(),
            reason: "no such host".into(),
        };
        let idx = self
            .scripts
            .iter()
            .position(|(name, _)| name == host)
            .ok_or_else(unresolvable)?;
        if let Script::Unresolvable = self.scripts[idx].1 {
            return Err(unresolvable());
        }
        Ok(IpAddr::V4(Ipv4Addr::from(idx as u32 + 1)))
    }

    async fn ping(&self, addr: IpAddr) -> Result<Duration, ProbeError> {
        let IpAddr::V4(v4) = addr else {
            return Err(ProbeError::Unsupported(addr.to_string()));
        };
        let idx = u32::from(v4) as usize - 1;
        match &self.scripts[idx].1 {
            Script::Samples(samples) => {
                let cursor = self.cursors[idx].fetch_add(1, Ordering::Relaxed);
                match samples[cursor % samples.len()] {
                    Some(ms) => Ok(Duration::from_millis(ms)),
                    None => Err(ProbeError::Timeout),
                }
            }
            Script::Slow { delay, rtt_ms } => {
                tokio::time::sleep(*delay).await;
                Ok(Duration::from_millis(*rtt_ms))
            }
            Script::Panic => panic!("scripted pinger asked to panic"),
            Script::Unresolvable => Err(ProbeError::Unreachable(addr.to_string())),
        }
    }
}

//! The central **abstraction** for latency measurements.
//!
//! A [`Pinger`] knows how to time a single round trip to an address. Everything
//! above it (the [`ProbeExecutor`], the [`BatchProber`] and the
//! [`BaselineProber`]) only depends on this trait, so the transport used for the
//! measurement (raw ICMP, TCP handshake, a scripted fake in tests) can be swapped
//! without touching the aggregation logic.
//!
//! **Failure isolation:** the executor is the boundary where [`ProbeError`]s stop.
//! Whatever goes wrong while probing one endpoint is turned into a
//! [`ProbeOutcome::Failure`] and never reaches other endpoints.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use latmap_common::{
    catalog::Endpoint,
    error::ProbeError,
    outcome::{ProbeOutcome, round_latency},
};
use tracing::{debug, warn};

mod baseline;
mod batch;
#[cfg(test)]
pub(crate) mod mock;

pub use baseline::BaselineProber;
pub use batch::{BatchProber, ProgressCallback};

/// Times single round trips to a host.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// Short name of the transport, used in log lines.
    fn name(&self) -> &'static str;

    /// Resolves an endpoint address (hostname or IP literal) to the address samples are sent to.
    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError>;

    /// Performs one round trip and returns its duration.
    async fn ping(&self, addr: IpAddr) -> Result<Duration, ProbeError>;
}

/// Measures one endpoint: resolve once, then take a fixed number of samples.
pub struct ProbeExecutor {
    pinger: Arc<dyn Pinger>,
    samples: u8,
}

impl ProbeExecutor {
    pub fn new(pinger: Arc<dyn Pinger>, samples: u8) -> Self {
        Self {
            pinger,
            samples: samples.max(1),
        }
    }

    pub fn samples(&self) -> u8 {
        self.samples
    }

    /// Probes `endpoint`, converting any error into a failure outcome.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        match self.measure(&endpoint.address).await {
            Ok(latency_ms) => {
                debug!("{} ({}) answered in {latency_ms} ms", endpoint.id, endpoint.address);
                ProbeOutcome::success(latency_ms)
            }
            Err(e) => {
                warn!("Failed to measure latency for {}: {e}", endpoint.id);
                ProbeOutcome::from(e)
            }
        }
    }

    /// Mean round trip to `address` in milliseconds, rounded to two decimals.
    ///
    /// Samples that fail are left out of the mean. Only when every sample fails
    /// is the error of the last one returned.
    pub async fn measure(&self, address: &str) -> Result<f64, ProbeError> {
        let addr: IpAddr = self.pinger.resolve(address).await?;

        let mut total = Duration::ZERO;
        let mut answered: u32 = 0;
        let mut last_err: Option<ProbeError> = None;

        for sample in 1..=self.samples {
            match self.pinger.ping(addr).await {
                Ok(rtt) => {
                    total += rtt;
                    answered += 1;
                }
                Err(e) => {
                    debug!(
                        "{} sample {sample}/{} to {address} ({addr}) failed: {e}",
                        self.pinger.name(),
                        self.samples
                    );
                    last_err = Some(e);
                }
            }
        }

        if answered == 0 {
            return Err(last_err.unwrap_or(ProbeError::Timeout));
        }

        let mean_ms: f64 = total.as_secs_f64() * 1_000.0 / f64::from(answered);
        Ok(round_latency(mean_ms))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

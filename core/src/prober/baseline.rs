use std::sync::Arc;

use latmap_common::{config::Config, error::ProbeError, report::Baseline};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::ProbeExecutor;

/// Measures the local baseline: the quickest of a few well-connected reference hosts.
///
/// All references are measured concurrently and the lowest mean wins (ties go to
/// the reference listed first), the same way a speed test client settles on its
/// best server. The baseline never fails outright; it degrades to
/// [`Baseline::Unavailable`].
pub struct BaselineProber {
    executor: Arc<ProbeExecutor>,
    references: Vec<String>,
}

impl BaselineProber {
    pub fn new(executor: Arc<ProbeExecutor>, cfg: &Config) -> Self {
        Self {
            executor,
            references: cfg.baseline_hosts.clone(),
        }
    }

    pub async fn measure(&self) -> Baseline {
        if self.references.is_empty() {
            return Baseline::Unavailable {
                reason: "no reference hosts configured".into(),
            };
        }

        let mut tasks: JoinSet<(usize, Result<f64, ProbeError>)> = JoinSet::new();
        for (idx, host) in self.references.iter().enumerate() {
            let executor = Arc::clone(&self.executor);
            let host = host.clone();
            tasks.spawn(async move { (idx, executor.measure(&host).await) });
        }

        let mut results: Vec<Option<Result<f64, ProbeError>>> =
            self.references.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, result)) => results[idx] = Some(result),
                Err(e) => warn!("Baseline probe task died: {e}"),
            }
        }

        let mut best: Option<(&str, f64)> = None;
        let mut errors: Vec<String> = Vec::new();
        for (host, result) in self.references.iter().zip(results) {
            match result {
                Some(Ok(latency_ms)) => {
                    debug!("Baseline candidate {host}: {latency_ms} ms");
                    if best.is_none_or(|(_, current)| latency_ms < current) {
                        best = Some((host.as_str(), latency_ms));
                    }
                }
                Some(Err(e)) => errors.push(format!("{host}: {e}")),
                None => errors.push(format!("{host}: probe aborted")),
            }
        }

        match best {
            Some((reference, latency_ms)) => {
                info!("Local baseline is {latency_ms} ms via {reference}");
                Baseline::Measured {
                    reference: reference.to_string(),
                    latency_ms,
                }
            }
            None => {
                let reason = format!("no reference host answered ({})", errors.join("; "));
                warn!("Local baseline unavailable: {reason}");
                Baseline::Unavailable { reason }
            }
        }
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

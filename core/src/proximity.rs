//! # Proximity Service
//!
//! Implements the "how close am I to each endpoint" use case.
//!
//! The service probes the catalog and the local reference path side by side,
//! classifies the batch and assembles the immutable [`Report`].

use std::sync::Arc;

use latmap_common::{
    catalog::Catalog,
    config::Config,
    error::ReportError,
    outcome::BatchResult,
    report::{Baseline, Classification, Report},
};
use tracing::info;

use crate::classifier;
use crate::network;
use crate::prober::{BaselineProber, BatchProber, Pinger, ProbeExecutor, ProgressCallback};

/// Application service for one probing run.
///
/// Orchestrates the run by:
/// 1. measuring the local baseline through the [`BaselineProber`].
/// 2. probing every catalog endpoint through the [`BatchProber`], concurrently with 1.
/// 3. classifying the batch and building the [`Report`].
pub struct ProximityService {
    batch: BatchProber,
    baseline: BaselineProber,
}

impl ProximityService {
    pub fn new(pinger: Arc<dyn Pinger>, cfg: &Config) -> Self {
        let executor = Arc::new(ProbeExecutor::new(pinger, cfg.samples));
        Self {
            batch: BatchProber::new(Arc::clone(&executor), cfg),
            baseline: BaselineProber::new(executor, cfg),
        }
    }

    /// Uses the best [`Pinger`] the process is allowed to open.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(network::select_pinger(cfg), cfg)
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.batch = self.batch.with_progress(callback);
        self
    }

    /// Runs the whole pipeline against `catalog`.
    ///
    /// Fails only with [`ReportError::EmptyResultSet`], when not a single
    /// endpoint could be measured.
    pub async fn run(&self, catalog: &Catalog) -> Result<Report, ReportError> {
        let (local_latency, results): (Baseline, BatchResult) =
            tokio::join!(self.baseline.measure(), self.batch.probe_all(catalog));

        info!(
            "Batch finished: {} measured, {} failed",
            results.success_count(),
            results.failure_count()
        );

        let classification: Classification = classifier::classify(&results)?;
        Ok(Report::build(local_latency, results, classification))
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

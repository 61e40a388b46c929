use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use latmap_common::{
    catalog::{Catalog, Endpoint},
    config::Config,
    error::ProbeError,
    outcome::{BatchResult, ProbeOutcome},
};
use tokio::{
    sync::Semaphore,
    task::{Id, JoinSet},
    time::{Instant, timeout_at},
};
use tracing::{error, info, warn};

use super::ProbeExecutor;

/// Stand-in for deadlines too large to represent as an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Called with `(completed, total)` every time an endpoint probe finishes.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Runs the [`ProbeExecutor`] over a whole catalog.
pub struct BatchProber {
    executor: Arc<ProbeExecutor>,
    concurrency: usize,
    deadline: Duration,
    on_probe_done: Option<ProgressCallback>,
}

impl BatchProber {
    pub fn new(executor: Arc<ProbeExecutor>, cfg: &Config) -> Self {
        Self {
            executor,
            concurrency: cfg.concurrency.clamp(1, Semaphore::MAX_PERMITS),
            deadline: cfg.deadline,
            on_probe_done: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_probe_done = Some(callback);
        self
    }

    /// Probes every endpoint of `catalog` and returns their outcomes in catalog order.
    ///
    /// Probes run concurrently, at most `concurrency` at a time. Endpoints whose
    /// probe has not finished when the deadline expires are recorded as timeouts.
    pub async fn probe_all(&self, catalog: &Catalog) -> BatchResult {
        let total: usize = catalog.len();
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(usize, ProbeOutcome)> = JoinSet::new();
        let mut task_slots: HashMap<Id, usize> = HashMap::with_capacity(total);

        info!(
            "Probing {total} endpoints ({} samples each, {} at a time)",
            self.executor.samples(),
            self.concurrency
        );

        for (idx, endpoint) in catalog.iter().enumerate() {
            let executor = Arc::clone(&self.executor);
            let permits = Arc::clone(&permits);
            let endpoint: Endpoint = endpoint.clone();

            let handle = tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                (idx, executor.probe(&endpoint).await)
            });
            task_slots.insert(handle.id(), idx);
        }

        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; total];
        let start = Instant::now();
        let deadline: Instant = start
            .checked_add(self.deadline)
            .unwrap_or_else(|| start + FAR_FUTURE);
        let mut completed: usize = 0;

        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((idx, outcome)))) => slots[idx] = Some(outcome),
                Ok(Some(Err(join_err))) => {
                    if let Some(&idx) = task_slots.get(&join_err.id()) {
                        error!("Probe task for {} died: {join_err}", catalog.endpoints()[idx].id);
                        slots[idx] = Some(ProbeOutcome::failure("probe task panicked"));
                    }
                }
                Ok(None) => break,
                Err(_elapsed) => {
                    warn!(
                        "Batch deadline of {:.1}s reached with {} probes pending",
                        self.deadline.as_secs_f64(),
                        tasks.len()
                    );
                    tasks.abort_all();
                    break;
                }
            }

            completed += 1;
            if let Some(callback) = &self.on_probe_done {
                callback(completed, total);
            }
        }

        catalog
            .iter()
            .zip(slots)
            .map(|(endpoint, slot)| {
                let outcome = slot.unwrap_or_else(|| ProbeOutcome::from(ProbeError::Timeout));
                (endpoint.id.clone(), outcome)
            })
            .collect()
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

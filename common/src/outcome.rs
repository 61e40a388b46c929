use std::fmt::Display;

use serde::Serialize;

use crate::error::ProbeError;

/// The result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    Success { latency_ms: f64 },
    Failure { reason: String },
}

impl ProbeOutcome {
    pub fn success(latency_ms: f64) -> Self {
        debug_assert!(latency_ms >= 0.0, "negative latency {latency_ms}");
        Self::Success { latency_ms }
    }

    pub fn failure(reason: impl Display) -> Self {
        Self::Failure {
            reason: reason.to_string(),
        }
    }

    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency_ms } => Some(*latency_ms),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<ProbeError> for ProbeOutcome {
    fn from(err: ProbeError) -> Self {
        Self::failure(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointResult {
    pub endpoint_id: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

/// One outcome per catalog endpoint, kept in catalog order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    entries: Vec<EndpointResult>,
}

impl BatchResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends the outcome for `endpoint_id`. Ids are expected to be unique.
    pub fn push(&mut self, endpoint_id: impl Into<String>, outcome: ProbeOutcome) {
        let endpoint_id = endpoint_id.into();
        debug_assert!(
            self.get(&endpoint_id).is_none(),
            "endpoint {endpoint_id} recorded twice"
        );
        self.entries.push(EndpointResult {
            endpoint_id,
            outcome,
        });
    }

    pub fn get(&self, endpoint_id: &str) -> Option<&ProbeOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.endpoint_id == endpoint_id)
            .map(|entry| &entry.outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointResult> {
        self.entries.iter()
    }

    /// Successful endpoints and their latency, in insertion order.
    pub fn successes(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().filter_map(|entry| {
            entry
                .outcome
                .latency_ms()
                .map(|latency| (entry.endpoint_id.as_str(), latency))
        })
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ProbeOutcome)> for BatchResult {
    fn from_iter<I: IntoIterator<Item = (S, ProbeOutcome)>>(iter: I) -> Self {
        let mut batch = BatchResult::default();
        for (id, outcome) in iter {
            batch.push(id, outcome);
        }
        batch
    }
}

/// Rounds a latency to two decimal places.
pub fn round_latency(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

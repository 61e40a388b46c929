//! # Proximity Report
//!
//! The immutable result of one probing run, handed to whatever renders it.

use serde::Serialize;

use crate::outcome::{BatchResult, ProbeOutcome};

/// Fastest and slowest successful endpoint of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub min_id: String,
    pub min_latency: f64,
    pub max_id: String,
    pub max_latency: f64,
}

/// Latency to the local reference path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Baseline {
    Measured { reference: String, latency_ms: f64 },
    Unavailable { reason: String },
}

impl Baseline {
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Measured { latency_ms, .. } => Some(*latency_ms),
            Self::Unavailable { .. } => None,
        }
    }
}

/// How an endpoint compares to the rest of the batch, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Fastest,
    Slowest,
    Regular,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    local_latency: Baseline,
    results: BatchResult,
    classification: Classification,
}

impl Report {
    /// Assembles a report from already computed parts.
    ///
    /// # Panics
    /// If `classification` does not agree with `results`: an extremal id that
    /// is missing, failed, or carries a different latency is a classifier bug.
    pub fn build(local_latency: Baseline, results: BatchResult, classification: Classification) -> Self {
        assert_extremum(&results, &classification.min_id, classification.min_latency, "min");
        assert_extremum(&results, &classification.max_id, classification.max_latency, "max");
        assert!(
            classification.min_latency <= classification.max_latency,
            "classification min {} exceeds max {}",
            classification.min_latency,
            classification.max_latency
        );

        Self {
            local_latency,
            results,
            classification,
        }
    }

    pub fn local_latency(&self) -> &Baseline {
        &self.local_latency
    }

    pub fn results(&self) -> &BatchResult {
        &self.results
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Every endpoint sharing the minimum latency is `Fastest`, every one sharing
    /// the maximum is `Slowest`. When both coincide `Fastest` wins.
    pub fn latency_class(&self, endpoint_id: &str) -> LatencyClass {
        match self.results.get(endpoint_id) {
            Some(ProbeOutcome::Success { latency_ms }) => {
                if *latency_ms == self.classification.min_latency {
                    LatencyClass::Fastest
                } else if *latency_ms == self.classification.max_latency {
                    LatencyClass::Slowest
                } else {
                    LatencyClass::Regular
                }
            }
            _ => LatencyClass::Failed,
        }
    }
}

fn assert_extremum(results: &BatchResult, id: &str, latency: f64, which: &str) {
    match results.get(id) {
        Some(ProbeOutcome::Success { latency_ms }) => assert!(
            *latency_ms == latency,
            "{which} endpoint {id} recorded {latency_ms} ms but classified as {latency} ms"
        ),
        Some(ProbeOutcome::Failure { reason }) => {
            panic!("{which} endpoint {id} failed ({reason}) but was classified")
        }
        None => panic!("{which} endpoint {id} is not part of the batch"),
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

//! # latmap core
//!
//! The latency probing and aggregation engine.
//!
//! * **[`prober`]**: the [`prober::Pinger`] abstraction, the per-endpoint probe
//!   executor, the batch prober and the local baseline prober.
//! * **[`network`]**: concrete pingers (raw ICMP echo, TCP handshake).
//! * **[`classifier`]**: fastest/slowest selection over a batch.
//! * **[`proximity`]**: the service wiring it all into a [`latmap_common::report::Report`].

pub mod classifier;
pub mod network;
pub mod prober;
pub mod proximity;

//! Concrete [`Pinger`]s.
//!
//! * [`icmp::IcmpPinger`]: raw ICMP echo, needs root (or `CAP_NET_RAW`).
//! * [`tcp::TcpPinger`]: TCP handshake timing, works for everyone.

use std::sync::Arc;

use is_root::is_root;
use latmap_common::config::Config;
use tracing::{info, warn};

use crate::prober::Pinger;

pub mod icmp;
pub mod resolver;
pub mod tcp;

/// Picks the most accurate pinger the current privileges allow.
pub fn select_pinger(cfg: &Config) -> Arc<dyn Pinger> {
    if !cfg.unprivileged && is_root() {
        match icmp::IcmpPinger::new(cfg.payload_size, cfg.probe_timeout) {
            Ok(pinger) => {
                info!("Using ICMP echo with a {} byte payload", cfg.payload_size);
                return Arc::new(pinger);
            }
            Err(e) => warn!("Raw sockets unavailable, falling back to TCP: {e:#}"),
        }
    }

    info!("Using TCP handshakes on port {}", cfg.tcp_port);
    Arc::new(tcp::TcpPinger::new(cfg.tcp_port, cfg.probe_timeout))
}

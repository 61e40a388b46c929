use std::time::Duration;

pub const DEFAULT_SAMPLES: u8 = 3;
pub const DEFAULT_PAYLOAD_SIZE: usize = 56;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);
pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_TCP_PORT: u16 = 443;
pub const DEFAULT_BASELINE_HOSTS: &[&str] = &["1.1.1.1", "8.8.8.8", "9.9.9.9"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Round trips per endpoint; the reported latency is their mean.
    pub samples: u8,
    /// ICMP echo payload size in bytes.
    pub payload_size: usize,
    /// Upper bound for a single sample, name resolution included.
    pub probe_timeout: Duration,
    /// Upper bound for the whole batch.
    ///
    /// Probes still pending when it expires are recorded as timeouts.
    pub deadline: Duration,
    /// Maximum number of endpoints probed at the same time.
    pub concurrency: usize,
    /// Port used by the TCP handshake prober.
    pub tcp_port: u16,
    /// Forces the TCP handshake prober even when raw sockets are available.
    pub unprivileged: bool,
    /// Reference hosts competing for the local baseline.
    pub baseline_hosts: Vec<String>,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
            concurrency: DEFAULT_CONCURRENCY,
            tcp_port: DEFAULT_TCP_PORT,
            unprivileged: false,
            baseline_hosts: DEFAULT_BASELINE_HOSTS.iter().map(|h| h.to_string()).collect(),
            quiet: 0,
        }
    }
}

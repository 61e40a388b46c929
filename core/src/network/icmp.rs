use std::io;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use latmap_common::error::ProbeError;
use latmap_protocols::icmp::{self as proto, EchoResponse};
use pnet::{
    packet::{Packet, icmp::IcmpPacket, ip::IpNextHeaderProtocols},
    transport::{
        self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
        icmp_packet_iter,
    },
};
use tracing::trace;

use super::resolver;
use crate::prober::Pinger;

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

/// ICMP echo over a raw socket. IPv4 only.
///
/// Every round trip opens its own channel on a blocking thread, so concurrent
/// probes each see every incoming ICMP message and keep only the one answering
/// their `(identifier, sequence)` pair.
pub struct IcmpPinger {
    payload_size: usize,
    probe_timeout: Duration,
    identifier: u16,
    next_sequence: AtomicU16,
}

struct EchoRequest {
    addr: IpAddr,
    identifier: u16,
    sequence: u16,
    payload_size: usize,
    limit: Duration,
}

impl IcmpPinger {
    /// Fails when raw sockets cannot be opened (missing privileges).
    pub fn new(payload_size: usize, probe_timeout: Duration) -> anyhow::Result<Self> {
        open_channel().context("opening raw ICMP socket")?;
        Ok(Self {
            payload_size,
            probe_timeout,
            identifier: rand::random(),
            next_sequence: AtomicU16::new(0),
        })
    }
}

#[async_trait]
impl Pinger for IcmpPinger {
    fn name(&self) -> &'static str {
        "icmp"
    }

    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError> {
        resolver::resolve(host, self.probe_timeout).await
    }

    async fn ping(&self, addr: IpAddr) -> Result<Duration, ProbeError> {
        if addr.is_ipv6() {
            return Err(ProbeError::Unsupported(format!("ICMP echo to IPv6 address {addr}")));
        }

        let request = EchoRequest {
            addr,
            identifier: self.identifier,
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
            payload_size: self.payload_size,
            limit: self.probe_timeout,
        };

        tokio::task::spawn_blocking(move || echo_round_trip(request))
            .await
            .map_err(|e| ProbeError::Socket(io::Error::other(e)))?
    }
}

fn open_channel() -> io::Result<(TransportSender, TransportReceiver)> {
    transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)
}

fn echo_round_trip(req: EchoRequest) -> Result<Duration, ProbeError> {
    let (mut tx, mut rx) = open_channel()?;
    let buffer: Vec<u8> = proto::create_echo_request(req.identifier, req.sequence, req.payload_size)
        .map_err(|e| ProbeError::Socket(io::Error::other(e)))?;
    let packet: IcmpPacket = IcmpPacket::new(&buffer)
        .ok_or_else(|| ProbeError::Socket(io::Error::other("echo request buffer too short")))?;

    let start = Instant::now();
    tx.send_to(packet, req.addr)?;

    let mut replies = icmp_packet_iter(&mut rx);
    loop {
        let remaining: Duration = req
            .limit
            .checked_sub(start.elapsed())
            .filter(|left| !left.is_zero())
            .ok_or(ProbeError::Timeout)?;

        let Some((icmp, source)) = replies.next_with_timeout(remaining)? else {
            return Err(ProbeError::Timeout);
        };

        match answer_for(&req, icmp.packet(), source) {
            Some(Ok(())) => return Ok(start.elapsed()),
            Some(Err(e)) => return Err(e),
            None => trace!("Ignoring ICMP message from {source}"),
        }
    }
}

/// Whether `bytes` from `source` answers `req`: `Some(Ok)` for our echo reply,
/// `Some(Err)` for an unreachable quoting our request, `None` for anything else.
fn answer_for(req: &EchoRequest, bytes: &[u8], source: IpAddr) -> Option<Result<(), ProbeError>> {
    if !proto::has_valid_checksum(bytes) {
        return None;
    }

    match proto::parse_response(bytes)? {
        resp @ EchoResponse::Reply { .. }
            if source == req.addr && resp.matches(req.identifier, req.sequence) =>
        {
            Some(Ok(()))
        }
        // Unreachables usually come from a router on the path, not the target.
        resp @ EchoResponse::Unreachable { code, .. } if resp.matches(req.identifier, req.sequence) => {
            Some(Err(ProbeError::Unreachable(proto::unreachable_reason(code).into())))
        }
        _ => None,
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

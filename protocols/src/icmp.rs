//! ICMPv4 echo request construction and response parsing.
//!
//! Only the ICMP message itself is handled here; the IPv4 header is added and
//! stripped by the layer 4 transport channel.

use anyhow::Context;
use pnet::packet::{
    icmp::{
        self, IcmpCode, IcmpPacket, IcmpTypes, MutableIcmpPacket,
        echo_reply::EchoReplyPacket,
        echo_request::MutableEchoRequestPacket,
    },
    ipv4::Ipv4Packet,
};
use tracing::trace;

pub const ECHO_HDR_LEN: usize = 8;
/// type, code, checksum and the 4 unused bytes preceding the quoted datagram.
const ERROR_HDR_LEN: usize = 8;

/// A response that can be attributed to one of our echo requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoResponse {
    Reply { identifier: u16, sequence: u16 },
    Unreachable { code: u8, identifier: u16, sequence: u16 },
}

impl EchoResponse {
    pub fn matches(&self, identifier: u16, sequence: u16) -> bool {
        match *self {
            EchoResponse::Reply {
                identifier: id,
                sequence: seq,
            }
            | EchoResponse::Unreachable {
                identifier: id,
                sequence: seq,
                ..
            } => id == identifier && seq == sequence,
        }
    }
}

/// Builds an echo request with a `payload_size` byte payload and a valid checksum.
pub fn create_echo_request(identifier: u16, sequence: u16, payload_size: usize) -> anyhow::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = vec![0u8; ECHO_HDR_LEN + payload_size];
    let payload: Vec<u8> = (0..payload_size).map(|i| (i % 256) as u8).collect();
    {
        let mut echo: MutableEchoRequestPacket =
            MutableEchoRequestPacket::new(&mut buffer).context("creating echo request")?;
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_icmp_code(IcmpCode::new(0));
        echo.set_identifier(identifier);
        echo.set_sequence_number(sequence);
        echo.set_payload(&payload);
        echo.set_checksum(0);
    }
    {
        let mut icmp: MutableIcmpPacket =
            MutableIcmpPacket::new(&mut buffer).context("creating icmp packet")?;
        let csm: u16 = icmp::checksum(&icmp.to_immutable());
        icmp.set_checksum(csm);
    }
    Ok(buffer)
}

/// Parses an ICMP message received on the transport channel.
///
/// Returns `None` for anything that is neither an echo reply nor a destination
/// unreachable quoting an echo request.
pub fn parse_response(bytes: &[u8]) -> Option<EchoResponse> {
    let icmp: IcmpPacket = IcmpPacket::new(bytes)?;
    match icmp.get_icmp_type() {
        IcmpTypes::EchoReply => {
            let reply: EchoReplyPacket = EchoReplyPacket::new(bytes)?;
            Some(EchoResponse::Reply {
                identifier: reply.get_identifier(),
                sequence: reply.get_sequence_number(),
            })
        }
        IcmpTypes::DestinationUnreachable => {
            let (identifier, sequence) = quoted_echo(bytes)?;
            Some(EchoResponse::Unreachable {
                code: icmp.get_icmp_code().0,
                identifier,
                sequence,
            })
        }
        other => {
            trace!("ignoring icmp type {}", other.0);
            None
        }
    }
}

/// Extracts identifier and sequence of the echo request quoted in an ICMP error.
fn quoted_echo(bytes: &[u8]) -> Option<(u16, u16)> {
    let quoted: &[u8] = bytes.get(ERROR_HDR_LEN..)?;
    let ip: Ipv4Packet = Ipv4Packet::new(quoted)?;
    let ihl: usize = ip.get_header_length() as usize * 4;
    let echo: &[u8] = quoted.get(ihl..ihl + ECHO_HDR_LEN)?;
    if echo[0] != IcmpTypes::EchoRequest.0 {
        return None;
    }
    let identifier = u16::from_be_bytes([echo[4], echo[5]]);
    let sequence = u16::from_be_bytes([echo[6], echo[7]]);
    Some((identifier, sequence))
}

/// Human readable meaning of a destination unreachable code.
pub fn unreachable_reason(code: u8) -> &'static str {
    match code {
        0 => "network unreachable",
        1 => "host unreachable",
        2 => "protocol unreachable",
        3 => "port unreachable",
        9 | 10 | 13 => "administratively prohibited",
        _ => "destination unreachable",
    }
}

/// Verifies the checksum of a received ICMP message.
pub fn has_valid_checksum(bytes: &[u8]) -> bool {
    IcmpPacket::new(bytes)
        .map(|icmp| icmp::checksum(&icmp) == icmp.get_checksum())
        .unwrap_or(false)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn as_reply(mut request: Vec<u8>) -> Vec<u8> {
        let mut icmp = MutableIcmpPacket::new(&mut request).unwrap();
        icmp.set_icmp_type(IcmpTypes::EchoReply);
        let csm = icmp::checksum(&icmp.to_immutable());
        icmp.set_checksum(csm);
        request
    }

    fn unreachable_quoting(request: &[u8], code: u8) -> Vec<u8> {
        let mut pkt = vec![IcmpTypes::DestinationUnreachable.0, code, 0, 0, 0, 0, 0, 0];
        let mut ip_header = [0u8; 20];
        ip_header[0] = 0x45;
        ip_header[9] = 1;
        pkt.extend_from_slice(&ip_header);
        pkt.extend_from_slice(&request[..ECHO_HDR_LEN]);
        pkt
    }

    #[test]
    fn echo_request_has_expected_layout() {
        let pkt = create_echo_request(0xBEEF, 2, 56).unwrap();
        assert_eq!(pkt.len(), ECHO_HDR_LEN + 56);
        assert_eq!(pkt[0], 8, "type must be echo request");
        assert_eq!(pkt[1], 0);
        assert_eq!(&pkt[4..6], &0xBEEFu16.to_be_bytes());
        assert_eq!(&pkt[6..8], &2u16.to_be_bytes());
        assert_eq!(pkt[ECHO_HDR_LEN + 10], 10);
        assert!(has_valid_checksum(&pkt));
    }

    #[test]
    fn checksum_detects_corruption() {
        let mut pkt = create_echo_request(1, 1, 56).unwrap();
        pkt[20] ^= 0xFF;
        assert!(!has_valid_checksum(&pkt));
    }

    #[test]
    fn parses_matching_echo_reply() {
        let reply = as_reply(create_echo_request(0x1234, 7, 56).unwrap());
        let parsed = parse_response(&reply).unwrap();
        assert_eq!(
            parsed,
            EchoResponse::Reply {
                identifier: 0x1234,
                sequence: 7
            }
        );
        assert!(parsed.matches(0x1234, 7));
        assert!(!parsed.matches(0x1234, 8));
        assert!(!parsed.matches(0x4321, 7));
    }

    #[test]
    fn parses_unreachable_quoting_our_request() {
        let request = create_echo_request(0xABCD, 3, 56).unwrap();
        let parsed = parse_response(&unreachable_quoting(&request, 1)).unwrap();
        assert_eq!(
            parsed,
            EchoResponse::Unreachable {
                code: 1,
                identifier: 0xABCD,
                sequence: 3
            }
        );
        assert_eq!(unreachable_reason(1), "host unreachable");
    }

    #[test]
    fn ignores_requests_and_truncated_packets() {
        let request = create_echo_request(1, 1, 56).unwrap();
        assert_eq!(parse_response(&request), None);
        assert_eq!(parse_response(&[0u8, 0]), None);

        let truncated = unreachable_quoting(&request, 3);
        assert_eq!(parse_response(&truncated[..20]), None);
    }
}

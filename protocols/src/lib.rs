//! Packet builders and parsers for the probes sent by `latmap-core`.

pub mod icmp;

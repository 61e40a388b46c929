use std::net::Ipv4Addr;
use std::time::Duration;
use std::sync::Arc;

use latmap_common::catalog::{Catalog, Endpoint};
use latmap_common::config::Config;
use latmap_common::geo::Coordinates;
use latmap_core::network::tcp::TcpPinger;
use latmap_core::proximity::ProximityService;
use tokio::net::TcpListener;

/// Runs the whole engine with real TCP handshakes against a local listener.
#[tokio::test]
async fn tcp_engine_against_loopback() -> anyhow::Result<()> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    let cfg = Config {
        baseline_hosts: vec!["127.0.0.1".into()],
        probe_timeout: Duration::from_secs(1),
        deadline: Duration::from_secs(5),
        tcp_port: port,
        ..Config::default()
    };
    let catalog = Catalog::new(vec![
        Endpoint::new("loopback", "127.0.0.1", Coordinates::new(0.0, 0.0)),
        Endpoint::new("localhost", "localhost", Coordinates::new(0.0, 0.0)),
    ])?;

    let pinger = Arc::new(TcpPinger::new(cfg.tcp_port, cfg.probe_timeout));
    let report = ProximityService::new(pinger, &cfg).run(&catalog).await?;

    assert!(report.results().get("loopback").is_some_and(|o| o.is_success()));
    assert!(report.local_latency().latency_ms().is_some());
    assert!(report.classification().max_latency < 1_000.0);
    Ok(())
}

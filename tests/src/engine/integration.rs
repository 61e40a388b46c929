use std::sync::Arc;
use std::time::Duration;

use latmap_common::config::Config;
use latmap_common::error::ReportError;
use latmap_common::outcome::ProbeOutcome;
use latmap_common::report::{Baseline, LatencyClass, Report};
use latmap_core::proximity::ProximityService;

use super::table::{Answer, LatencyTable, catalog};

fn config() -> Config {
    Config {
        baseline_hosts: vec!["local".into()],
        deadline: Duration::from_secs(5),
        ..Config::default()
    }
}

async fn run(hosts: &[(&str, Answer)], ids: &[&str], cfg: &Config) -> Result<Report, ReportError> {
    let service = ProximityService::new(Arc::new(LatencyTable::new(hosts)), cfg);
    service.run(&catalog(ids)).await
}

#[tokio::test]
async fn tie_goes_to_the_first_endpoint() {
    let hosts = [
        ("local", Answer::Rtt(2)),
        ("a", Answer::Rtt(10)),
        ("b", Answer::Rtt(10)),
        ("c", Answer::Rtt(30)),
    ];

    let report = run(&hosts, &["a", "b", "c"], &config()).await.unwrap();

    let class = report.classification();
    assert_eq!(class.min_id, "a");
    assert_eq!(class.min_latency, 10.0);
    assert_eq!(class.max_id, "c");
    assert_eq!(class.max_latency, 30.0);
    assert_eq!(
        report.local_latency(),
        &Baseline::Measured {
            reference: "local".into(),
            latency_ms: 2.0
        }
    );
}

#[tokio::test]
async fn failed_endpoints_stay_in_the_report() {
    let hosts = [
        ("local", Answer::Rtt(2)),
        ("a", Answer::Unknown),
        ("b", Answer::Rtt(15)),
        ("c", Answer::Silent),
    ];

    let report = run(&hosts, &["a", "b", "c"], &config()).await.unwrap();

    let ids: Vec<&str> = report.results().iter().map(|e| e.endpoint_id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(report.classification().min_id, "b");
    assert_eq!(report.classification().max_id, "b");
    assert_eq!(report.results().get("c"), Some(&ProbeOutcome::failure("timeout")));
    assert_eq!(report.latency_class("a"), LatencyClass::Failed);
    assert_eq!(report.latency_class("b"), LatencyClass::Fastest);
}

#[tokio::test]
async fn nothing_measured_is_an_error() {
    let hosts = [("local", Answer::Rtt(2)), ("a", Answer::Unknown), ("b", Answer::Silent)];

    let err = run(&hosts, &["a", "b"], &config()).await.unwrap_err();

    assert_eq!(err, ReportError::EmptyResultSet);
}

#[tokio::test]
async fn every_endpoint_is_reported_when_all_succeed() {
    let ids = ["us-east-1", "eu-west-1", "ap-south-1", "sa-east-1", "af-south-1"];
    let mut hosts: Vec<(&str, Answer)> = vec![("local", Answer::Rtt(1))];
    hosts.extend(ids.iter().zip([80, 20, 140, 110, 160]).map(|(id, ms)| (*id, Answer::Rtt(ms))));

    let report = run(&hosts, &ids, &config()).await.unwrap();

    assert_eq!(report.results().len(), ids.len());
    assert_eq!(report.results().success_count(), ids.len());
    assert_eq!(report.classification().min_id, "eu-west-1");
    assert_eq!(report.classification().max_id, "af-south-1");
    for entry in report.results().iter() {
        let latency = entry.outcome.latency_ms().unwrap();
        assert!(latency >= report.classification().min_latency);
        assert!(latency <= report.classification().max_latency);
    }
}

#[tokio::test]
async fn completion_order_does_not_change_the_report() {
    let hosts = [
        ("local", Answer::Rtt(1)),
        ("slow-start", Answer::Delayed { wait: Duration::from_millis(80), rtt: 12 }),
        ("quick", Answer::Delayed { wait: Duration::from_millis(1), rtt: 12 }),
        ("mid", Answer::Delayed { wait: Duration::from_millis(40), rtt: 50 }),
    ];
    let cfg = Config {
        samples: 1,
        ..config()
    };

    let report = run(&hosts, &["slow-start", "quick", "mid"], &cfg).await.unwrap();

    let ids: Vec<&str> = report.results().iter().map(|e| e.endpoint_id.as_str()).collect();
    assert_eq!(ids, ["slow-start", "quick", "mid"]);
    assert_eq!(report.classification().min_id, "slow-start");
    assert_eq!(report.classification().max_id, "mid");
}

#[tokio::test]
async fn deadline_turns_stragglers_into_timeouts() {
    let hosts = [
        ("local", Answer::Rtt(1)),
        ("stuck", Answer::Delayed { wait: Duration::from_secs(60), rtt: 1 }),
        ("ok", Answer::Rtt(25)),
    ];
    let cfg = Config {
        samples: 1,
        deadline: Duration::from_millis(300),
        ..config()
    };

    let report = run(&hosts, &["stuck", "ok"], &cfg).await.unwrap();

    assert_eq!(report.results().get("stuck"), Some(&ProbeOutcome::failure("timeout")));
    assert_eq!(report.classification().min_id, "ok");
}

#[tokio::test]
async fn report_serializes_for_external_renderers() {
    let hosts = [("local", Answer::Unknown), ("a", Answer::Rtt(10)), ("b", Answer::Silent)];

    let report = run(&hosts, &["a", "b"], &config()).await.unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["local_latency"]["status"], "unavailable");
    assert_eq!(json["results"][0]["endpoint_id"], "a");
    assert_eq!(json["results"][0]["latency_ms"], 10.0);
    assert_eq!(json["results"][1]["status"], "failure");
    assert_eq!(json["classification"]["min_id"], "a");
}

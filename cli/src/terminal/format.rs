use colored::*;
use latmap_common::{
    catalog::Endpoint,
    geo::Coordinates,
    outcome::ProbeOutcome,
    report::{Baseline, LatencyClass},
};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn latency(latency_ms: f64) -> String {
    format!("{latency_ms:.2} ms")
}

pub fn latency_to_detail(outcome: &ProbeOutcome, class: LatencyClass) -> Detail {
    let value: ColoredString = match (outcome, class) {
        (ProbeOutcome::Failure { reason }, _) => format!("failed ({reason})").color(colors::FAILED),
        (ProbeOutcome::Success { latency_ms }, LatencyClass::Fastest) => {
            latency(*latency_ms).color(colors::FASTEST).bold()
        }
        (ProbeOutcome::Success { latency_ms }, LatencyClass::Slowest) => {
            latency(*latency_ms).color(colors::SLOWEST).bold()
        }
        (ProbeOutcome::Success { latency_ms }, _) => latency(*latency_ms).color(colors::TEXT_DEFAULT),
    };
    ("Latency".to_string(), value)
}

pub fn address_to_detail(endpoint: &Endpoint) -> Detail {
    ("Address".to_string(), endpoint.address.color(colors::ADDRESS))
}

pub fn distance_to_detail(location: Option<Coordinates>, target: Option<Coordinates>) -> Option<Detail> {
    let km: f64 = location?.distance_km(&target?);
    Some(("Distance".to_string(), format!("{km:.0} km").color(colors::DISTANCE)))
}

pub fn baseline_value(baseline: &Baseline) -> ColoredString {
    match baseline {
        Baseline::Measured { latency_ms, .. } => latency(*latency_ms).bold().green(),
        Baseline::Unavailable { reason } => format!("unavailable ({reason})").color(colors::FAILED),
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

#[cfg(test)]
mod tests {
    use super::*;
    use latmap_common::catalog::Catalog;

    fn plain(detail: &Detail) -> String {
        console::strip_ansi_codes(&detail.1.to_string()).into_owned()
    }

    #[test]
    fn failures_show_their_reason() {
        let detail = latency_to_detail(&ProbeOutcome::failure("timeout"), LatencyClass::Failed);
        assert_eq!(detail.0, "Latency");
        assert_eq!(plain(&detail), "failed (timeout)");
    }

    #[test]
    fn latencies_have_two_decimals() {
        let detail = latency_to_detail(&ProbeOutcome::success(12.5), LatencyClass::Regular);
        assert_eq!(plain(&detail), "12.50 ms");
    }

    #[test]
    fn distance_needs_both_ends() {
        let catalog = Catalog::aws_regions();
        let frankfurt = catalog.coordinates_of("eu-central-1");
        assert!(distance_to_detail(None, frankfurt).is_none());

        let here = Coordinates::new(50.11, 8.68);
        assert!(distance_to_detail(Some(here), catalog.coordinates_of("mars-north-1")).is_none());

        let detail = distance_to_detail(Some(here), frankfurt).unwrap();
        assert_eq!(detail.0, "Distance");
        assert!(plain(&detail).ends_with(" km"));
    }
}

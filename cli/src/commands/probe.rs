use std::time::{Duration, Instant};

use colored::*;
use latmap_common::{
    catalog::Catalog,
    config::Config,
    geo::Coordinates,
    report::{Baseline, Report},
};
use latmap_core::proximity::ProximityService;
use tracing::{Instrument, Span, info_span};

use super::{ProbeArgs, load_catalog};
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn probe(args: ProbeArgs, quiet: u8) -> anyhow::Result<()> {
    let cfg: Config = build_config(&args, quiet);
    let catalog: Catalog = load_catalog(args.catalog.as_deref())?;

    let start_time: Instant = Instant::now();
    let result = {
        let span: Span = info_span!("probe");
        spinner::start_probe_progress(&span, catalog.len());

        let service = ProximityService::from_config(&cfg)
            .with_progress(spinner::probe_progress_callback(span.clone()));
        service.run(&catalog).instrument(span).await
    };

    let report: Report = match result {
        Ok(report) => report,
        Err(e) => {
            print::header("zero endpoints answered", cfg.quiet);
            print::no_results();
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    probing_ends(&report, &catalog, args.location, start_time.elapsed(), cfg.quiet);
    Ok(())
}

fn build_config(args: &ProbeArgs, quiet: u8) -> Config {
    Config {
        samples: args.samples,
        probe_timeout: Duration::from_millis(args.timeout_ms),
        deadline: Duration::from_secs(args.deadline_secs),
        concurrency: args.concurrency,
        tcp_port: args.port,
        unprivileged: args.unprivileged,
        quiet,
        ..Config::default()
    }
}

fn probing_ends(report: &Report, catalog: &Catalog, location: Option<Coordinates>, total_time: Duration, q: u8) {
    if q > 0 {
        mprint!();
    }

    print::header("local baseline", q);
    if q < 2 {
        print_baseline(report.local_latency(), location);
        mprint!();
    }

    print::header("endpoint latency", q);
    if q < 2 {
        print_endpoints(report, catalog, location);
    }

    print_summary(report, total_time, q);
}

fn print_baseline(baseline: &Baseline, location: Option<Coordinates>) {
    print::set_key_width(&["Reference", "Latency", "Location"]);
    if let Baseline::Measured { reference, .. } = baseline {
        print::aligned_line("Reference", reference.color(colors::TEXT_DEFAULT));
    }
    print::aligned_line("Latency", format::baseline_value(baseline));
    if let Some(here) = location {
        print::aligned_line("Location", here.to_string().color(colors::DISTANCE));
    }
}

fn print_endpoints(report: &Report, catalog: &Catalog, location: Option<Coordinates>) {
    let total: usize = report.results().len();
    for (idx, entry) in report.results().iter().enumerate() {
        let id: &str = entry.endpoint_id.as_str();
        print::tree_head(idx, id);

        let mut details: Vec<format::Detail> = Vec::with_capacity(3);
        if let Some(endpoint) = catalog.get(id) {
            details.push(format::address_to_detail(endpoint));
        }
        details.push(format::latency_to_detail(&entry.outcome, report.latency_class(id)));
        if let Some(distance) = format::distance_to_detail(location, catalog.coordinates_of(id)) {
            details.push(distance);
        }
        print::as_tree_one_level(details);

        if idx + 1 != total {
            mprint!();
        }
    }
}

fn print_summary(report: &Report, total_time: Duration, q: u8) {
    let results = report.results();
    let class = report.classification();

    let measured: ColoredString = format!("{}/{} endpoints", results.success_count(), results.len())
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Probing Complete: {measured} measured in {total_time}").color(colors::TEXT_DEFAULT);

    let fastest: ColoredString = format!("{} ({})", class.min_id, format::latency(class.min_latency))
        .color(colors::FASTEST)
        .bold();
    let slowest: ColoredString = format!("{} ({})", class.max_id, format::latency(class.max_latency))
        .color(colors::SLOWEST)
        .bold();
    let extremes: ColoredString =
        format!("Fastest: {fastest}  Slowest: {slowest}").color(colors::TEXT_DEFAULT);

    match q {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::centerln(&extremes.to_string());
        }
        _ => {
            mprint!();
            print::print_status(output.to_string());
            print::print_status(extremes.to_string());
        }
    }
}

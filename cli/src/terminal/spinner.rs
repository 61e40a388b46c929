use std::sync::Arc;

use indicatif::ProgressStyle;
use latmap_core::prober::ProgressCallback;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn probe_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:24.green/white}] {pos}/{len} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("━╸ ")
}

/// Turns `span` into a progress bar over `total` endpoints.
pub fn start_probe_progress(span: &Span, total: usize) {
    span.pb_set_style(&probe_style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Probing endpoints");
}

/// A [`ProgressCallback`] moving the bar of `span`.
pub fn probe_progress_callback(span: Span) -> ProgressCallback {
    Arc::new(move |done: usize, _total: usize| span.pb_set_position(done as u64))
}

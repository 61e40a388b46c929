use latmap_common::{
    error::ReportError,
    outcome::BatchResult,
    report::Classification,
};

/// Picks the fastest and slowest successful endpoint of a batch.
///
/// Endpoints are scanned in batch order with strict comparisons, so when several
/// endpoints share the extreme value the first one encountered is reported.
pub fn classify(results: &BatchResult) -> Result<Classification, ReportError> {
    let mut successes = results.successes();
    let (first_id, first_latency) = successes.next().ok_or(ReportError::EmptyResultSet)?;

    let (mut min_id, mut min_latency) = (first_id, first_latency);
    let (mut max_id, mut max_latency) = (first_id, first_latency);

    for (id, latency) in successes {
        if latency < min_latency {
            min_id = id;
            min_latency = latency;
        }
        if latency > max_latency {
            max_id = id;
            max_latency = latency;
        }
    }

    Ok(Classification {
        min_id: min_id.to_string(),
        min_latency,
        max_id: max_id.to_string(),
        max_latency,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

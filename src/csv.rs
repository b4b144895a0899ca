/// CSV rendering of the per-query report.
use crate::results::{QueryMetric, ResultsDocument};
use std::io::Write;

/// First line of every report.
pub const HEADER: &str = "Query, Count, Mean, Min, Max, 50th, 90th, 95th, 99th";

const SEPARATOR: &str = ", ";

/// Render one query as a report line, without the trailing newline.
///
/// Names are written verbatim, no quoting.
pub fn format_row(q: &QueryMetric) -> String {
    let s = &q.run_time;
    let fields = [
        q.name.clone(),
        s.count.to_string(),
        s.mean.to_string(),
        s.min.to_string(),
        s.max.to_string(),
        s.p50.to_string(),
        s.p90.to_string(),
        s.p95.to_string(),
        s.p99.to_string(),
    ];
    fields.join(SEPARATOR)
}

/// Write the header and one line per query to `out`, in document order.
///
/// Each line goes out in a single `write_all`. Returns the number of data
/// rows written.
pub fn write_report<W: Write>(doc: &ResultsDocument, mut out: W) -> std::io::Result<usize> {
    writeln!(out, "{HEADER}")?;
    for q in &doc.all_metrics {
        let mut line = format_row(q);
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;
    Ok(doc.all_metrics.len())
}

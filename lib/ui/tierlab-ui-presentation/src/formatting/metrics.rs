use std::fmt::Write;

use tierlab_domain::SimResult;

use super::units::{count, error_percent, millis, money, percent, rps};

/// One-line summary: status, load, tail latency, errors and spend.
pub fn status_bar(result: &SimResult) -> String {
    format!(
        "{} | {} | p95 {} | errors {} | {}/mo | bottleneck {}",
        result.status.as_str().to_uppercase(),
        rps(result.traffic.rps),
        millis(result.latency.p95),
        error_percent(result.errors.rate),
        money(result.cost.monthly_total),
        result.saturation.bottleneck,
    )
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<20} {value:>10}");
}

/// Metrics panel: performance, saturation, traffic and cost sections.
pub fn render_metrics(result: &SimResult) -> String {
    let mut out = String::new();

    out.push_str("Performance\n");
    row(&mut out, "p50 latency", &millis(result.latency.p50));
    row(&mut out, "p95 latency", &millis(result.latency.p95));
    row(&mut out, "Error rate", &error_percent(result.errors.rate));
    row(&mut out, "Error cause", result.errors.cause.label());
    if !result.latency.notes.is_empty() {
        out.push_str("  Notes:\n");
        for note in &result.latency.notes {
            let _ = writeln!(out, "    - {note}");
        }
    }

    let saturation = &result.saturation;
    out.push_str("\nSaturation\n");
    row(&mut out, "App", &percent(saturation.app));
    row(&mut out, "Cache", &percent(saturation.cache));
    row(&mut out, "DB", &percent(saturation.db));
    row(
        &mut out,
        "Worst",
        &format!("{} ({})", percent(saturation.worst), saturation.bottleneck),
    );

    out.push_str("\nTraffic breakdown\n");
    row(&mut out, "Total RPS", &count(result.traffic.rps));
    row(&mut out, "Reads", &count(result.traffic.reads));
    row(&mut out, "Writes", &count(result.traffic.writes));

    out.push_str("\nCost (monthly estimate)\n");
    for line in &result.cost.breakdown {
        row(&mut out, &line.label, &money(line.value));
    }
    row(&mut out, "Total", &money(result.cost.monthly_total));
    out
}

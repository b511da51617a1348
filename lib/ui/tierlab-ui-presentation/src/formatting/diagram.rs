use std::fmt::Write;

use tierlab_domain::{Diagram, SystemStatus};

fn status_marker(status: SystemStatus) -> &'static str {
    match status {
        SystemStatus::Healthy => "[ok]",
        SystemStatus::Degraded => "[!!]",
        SystemStatus::Overloaded => "[XX]",
    }
}

/// Plain-text architecture view: nodes in request order, then edges and
/// hotspots.
pub fn render_diagram(diagram: &Diagram) -> String {
    let mut out = String::new();
    for node in &diagram.nodes {
        let metrics = node
            .metrics
            .iter()
            .map(|metric| format!("{} {}", metric.key, metric.value))
            .collect::<Vec<_>>()
            .join(" · ");
        let _ = writeln!(
            out,
            "{} {:<14} {:<28} {}",
            status_marker(node.status),
            node.title,
            node.subtitle,
            metrics
        );
    }

    out.push_str("\nEdges:\n");
    for edge in &diagram.edges {
        let _ = writeln!(out, "  {} → {} ({})", edge.from, edge.to, edge.label);
    }

    out.push_str("\nHotspots:\n");
    for hotspot in &diagram.hotspots {
        let _ = writeln!(out, "  [{}] {}", hotspot.severity.as_str(), hotspot.label);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierlab_application::simulate;
    use tierlab_domain::SimConfig;

    #[test]
    fn test_render_baseline() {
        let result = simulate(&SimConfig::baseline());
        let text = render_diagram(&result.diagram);
        assert!(text.contains("[ok] App Servers"));
        assert!(text.contains("Hit 67%"));
        assert!(text.contains("client → lb (HTTP)"));
        assert!(text.contains("[low] No hotspots"));
    }

    #[test]
    fn test_render_overloaded() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 2000.0;
        let text = render_diagram(&simulate(&config).diagram);
        assert!(text.contains("[XX] App Servers"));
        assert!(text.contains("[high] App tier saturation"));
    }
}

use std::fmt::Write;

use tierlab_domain::Recommendation;

pub fn render_recommendations(recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    for (index, recommendation) in recommendations.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}. {}", index + 1, recommendation.title);
        let _ = writeln!(out, "   {}", recommendation.reason);
        for action in &recommendation.actions {
            let _ = writeln!(out, "   - {action}");
        }
    }
    out
}

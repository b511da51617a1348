use tierlab_domain::MetricValue;

/// Ratio as a whole percentage: `0.672` renders as `67%`.
pub fn percent(ratio: f64) -> String {
    MetricValue::Percent(ratio).to_string()
}

pub fn millis(ms: f64) -> String {
    MetricValue::Millis(ms).to_string()
}

pub fn money(amount: f64) -> String {
    format!("${}", amount.round())
}

pub fn rps(value: f64) -> String {
    MetricValue::Rps(value).to_string()
}

pub fn count(value: f64) -> String {
    MetricValue::Count(value).to_string()
}

/// Error rates keep two decimals so small rates stay visible.
pub fn error_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

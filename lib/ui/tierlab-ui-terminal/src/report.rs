//! Command output in text or JSON form.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use tierlab_application::{Runtime, SweepPoint, first_overload};
use tierlab_domain::{
    ComponentInfo, Knob, KnobRange, Preset, Recommendation, SimConfig, SimResult,
};
use tierlab_ui_presentation::formatting::units::{error_percent, millis, money, percent};
use tierlab_ui_presentation::{
    FlowRow, LiveValue, flow_rows, render_diagram, render_metrics, render_recommendations,
    status_bar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub preset: Option<String>,
    pub config: SimConfig,
    pub result: SimResult,
    pub recommendations: Vec<Recommendation>,
    pub flows: Vec<FlowRow>,
}

impl EvaluationReport {
    pub fn from_runtime(runtime: &Runtime) -> Self {
        Self {
            preset: runtime.preset_key().map(str::to_string),
            config: runtime.config().clone(),
            result: runtime.result().clone(),
            recommendations: runtime.recommendations().to_vec(),
            flows: flow_rows(runtime.result(), runtime.config()),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(preset) = &self.preset {
            let _ = writeln!(out, "Preset: {preset}");
        }
        let _ = writeln!(out, "{}\n", status_bar(&self.result));
        out.push_str(&render_diagram(&self.result.diagram));
        out.push_str("\nRequest flow:\n");
        for flow in self.flows.iter().filter(|flow| flow.active) {
            let _ = writeln!(
                out,
                "  {:<28} {:>5}  [{}]",
                flow.label,
                percent(flow.share),
                flow.emphasis.as_str()
            );
        }
        out.push('\n');
        out.push_str(&render_metrics(&self.result));
        out.push_str("\nRecommendations:\n");
        out.push_str(&render_recommendations(&self.recommendations));
        out
    }
}

pub fn render_presets(presets: &[Preset], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(presets);
    }
    let mut out = String::new();
    for preset in presets {
        let _ = writeln!(
            out,
            "{:<16} {:<16} {}",
            preset.key, preset.name, preset.description
        );
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub knob: Knob,
    pub points: Vec<SweepPoint>,
    pub first_overload: Option<f64>,
}

impl SweepReport {
    pub fn new(knob: Knob, points: Vec<SweepPoint>) -> Self {
        let first_overload = first_overload(&points).map(|point| point.value);
        Self {
            knob,
            points,
            first_overload,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return to_json(self);
        }
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>10}  {:<10} {:>6}  {:<6} {:>8} {:>8} {:>8} {:>8}",
            self.knob.name(),
            "status",
            "worst",
            "tier",
            "p50",
            "p95",
            "errors",
            "monthly"
        );
        for point in &self.points {
            let _ = writeln!(
                out,
                "{:>10}  {:<10} {:>6}  {:<6} {:>8} {:>8} {:>8} {:>8}",
                format!("{:.2}", point.value),
                point.status.as_str(),
                percent(point.worst),
                point.bottleneck.as_str(),
                millis(point.p50),
                millis(point.p95),
                error_percent(point.error_rate),
                money(point.monthly_total)
            );
        }
        match self.first_overload {
            Some(value) => {
                let _ = writeln!(out, "\nFirst overload at {} = {value:.2}", self.knob);
            }
            None => out.push_str("\nNo overload in range\n"),
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub info: ComponentInfo,
    pub live: Vec<LiveValue>,
}

impl InfoReport {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return to_json(self);
        }
        let info = &self.info;
        let mut out = String::new();
        let _ = writeln!(out, "{}\n\n{}", info.title, info.overview);
        let sections = [
            ("Affected by", &info.affected_by),
            ("Affects", &info.affects),
            ("Symptoms", &info.symptoms),
            ("Fixes", &info.fixes),
            ("Notes", &info.notes),
        ];
        for (heading, items) in sections {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{heading}:");
            for item in items {
                let _ = writeln!(out, "  - {item}");
            }
        }
        out.push_str("\nLive values:\n");
        for value in &self.live {
            let _ = writeln!(out, "  {:<14} {}", value.key, value.value);
        }
        Ok(out)
    }
}

pub fn render_knobs() -> String {
    let mut out = String::new();
    for knob in Knob::ALL {
        let range = match knob.range() {
            KnobRange::Slider { min, max, step } => format!("{min}..{max} step {step}"),
            KnobRange::Toggle => "on/off".to_string(),
        };
        let _ = writeln!(out, "{:<22} {:<26} {}", knob.name(), knob.label(), range);
    }
    out
}

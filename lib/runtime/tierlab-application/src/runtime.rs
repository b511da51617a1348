use anyhow::{Result, anyhow};
use tracing::{debug, info};

use tierlab_domain::{
    Event, EventBus, EventLevel, Knob, Recommendation, SimConfig, SimResult, SystemStatus,
};
use tierlab_ports::PortSet;

use crate::model::Evaluator;
use crate::recommendations::RecommendationEngine;

/// Interactive session: owns the current configuration and re-evaluates it
/// after every change. Only the latest result is kept.
pub struct Runtime {
    config: SimConfig,
    result: SimResult,
    recommendations: Vec<Recommendation>,
    preset_key: Option<String>,
    evaluator: Evaluator,
    engine: RecommendationEngine,
    events: EventBus,
    evaluation_count: u64,
    ports: PortSet,
}

impl Runtime {
    pub fn new(config: SimConfig) -> Self {
        Self::new_with_ports(config, PortSet::empty())
    }

    pub fn new_with_ports(config: SimConfig, ports: PortSet) -> Self {
        let evaluator = Evaluator::new(ports.pricing.cost_table());
        let engine = RecommendationEngine::default();
        let result = evaluator.evaluate(&config);
        let recommendations = engine.recommend(&result, &config);

        let mut events = EventBus::default();
        events.push(Event::new(
            EventLevel::Info,
            format!("Session started ({})", result.status),
        ));

        Self {
            config,
            result,
            recommendations,
            preset_key: None,
            evaluator,
            engine,
            events,
            evaluation_count: 1,
            ports,
        }
    }

    /// Starts from a catalogue preset.
    pub fn from_preset(ports: PortSet, key: &str) -> Result<Self> {
        let preset = ports
            .presets
            .preset(key)
            .ok_or_else(|| anyhow!("Unknown preset: {key}"))?;
        let mut runtime = Self::new_with_ports(preset.config, ports);
        runtime.preset_key = Some(preset.key);
        Ok(runtime)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn result(&self) -> &SimResult {
        &self.result
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn preset_key(&self) -> Option<&str> {
        self.preset_key.as_deref()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn evaluation_count(&self) -> u64 {
        self.evaluation_count
    }

    pub fn ports(&self) -> &PortSet {
        &self.ports
    }

    pub fn apply_preset(&mut self, key: &str) -> Result<()> {
        let preset = self
            .ports
            .presets
            .preset(key)
            .ok_or_else(|| anyhow!("Unknown preset: {key}"))?;
        info!(preset = %preset.key, "applying preset");
        self.events.push(Event::new(
            EventLevel::Info,
            format!("Applied preset: {}", preset.name),
        ));
        self.config = preset.config;
        self.preset_key = Some(preset.key);
        self.refresh();
        Ok(())
    }

    /// Sets a knob, clamped into the control's range.
    pub fn set_knob(&mut self, knob: Knob, value: f64) {
        let clamped = knob.clamp(value);
        if clamped != value {
            debug!(%knob, value, clamped, "knob value clamped to control range");
        }
        knob.write(&mut self.config, clamped);
        self.events.push(Event::new(
            EventLevel::Info,
            format!("{} set to {}", knob.label(), clamped),
        ));
        self.refresh();
    }

    pub fn toggle(&mut self, knob: Knob) -> Result<bool> {
        let enabled = knob.toggle(&mut self.config)?;
        self.events.push(Event::new(
            EventLevel::Info,
            format!(
                "{} turned {}",
                knob.label(),
                if enabled { "on" } else { "off" }
            ),
        ));
        self.refresh();
        Ok(enabled)
    }

    pub fn replace_config(&mut self, config: SimConfig) {
        self.config = config;
        self.preset_key = None;
        self.events
            .push(Event::new(EventLevel::Info, "Configuration replaced"));
        self.refresh();
    }

    fn refresh(&mut self) {
        let previous = self.result.status;
        self.result = self.evaluator.evaluate(&self.config);
        self.recommendations = self.engine.recommend(&self.result, &self.config);
        self.evaluation_count = self.evaluation_count.saturating_add(1);

        let current = self.result.status;
        debug!(
            status = %current,
            bottleneck = %self.result.saturation.bottleneck,
            worst = self.result.saturation.worst,
            "re-evaluated configuration"
        );
        if current != previous {
            let level = match current {
                SystemStatus::Healthy => EventLevel::Info,
                SystemStatus::Degraded => EventLevel::Warn,
                SystemStatus::Overloaded => EventLevel::Error,
            };
            self.events.push(Event::new(
                level,
                format!(
                    "Status changed: {previous} → {current} (bottleneck: {})",
                    self.result.saturation.bottleneck
                ),
            ));
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(SimConfig::baseline())
    }
}

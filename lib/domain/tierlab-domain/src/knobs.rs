//! Tunable configuration fields and the ranges the interactive controls
//! expose for them.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    Rps,
    ReadRatio,
    PayloadKb,
    AppInstances,
    AppRpsPerInstance,
    Autoscale,
    CacheEnabled,
    CacheHitRate,
    CacheCapacity,
    DbEnabled,
    DbCapacity,
    DbWritePenalty,
    Replication,
    Partitioning,
    BaseLatencyMs,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnobRange {
    Slider { min: f64, max: f64, step: f64 },
    Toggle,
}

impl Knob {
    pub const ALL: [Knob; 15] = [
        Knob::Rps,
        Knob::ReadRatio,
        Knob::PayloadKb,
        Knob::AppInstances,
        Knob::AppRpsPerInstance,
        Knob::Autoscale,
        Knob::CacheEnabled,
        Knob::CacheHitRate,
        Knob::CacheCapacity,
        Knob::DbEnabled,
        Knob::DbCapacity,
        Knob::DbWritePenalty,
        Knob::Replication,
        Knob::Partitioning,
        Knob::BaseLatencyMs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rps => "rps",
            Self::ReadRatio => "read_ratio",
            Self::PayloadKb => "payload_kb",
            Self::AppInstances => "app_instances",
            Self::AppRpsPerInstance => "app_rps_per_instance",
            Self::Autoscale => "autoscale",
            Self::CacheEnabled => "cache_enabled",
            Self::CacheHitRate => "cache_hit_rate",
            Self::CacheCapacity => "cache_capacity",
            Self::DbEnabled => "db_enabled",
            Self::DbCapacity => "db_capacity",
            Self::DbWritePenalty => "db_write_penalty",
            Self::Replication => "replication",
            Self::Partitioning => "partitioning",
            Self::BaseLatencyMs => "base_latency_ms",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rps => "Requests per second",
            Self::ReadRatio => "Read ratio",
            Self::PayloadKb => "Payload size (KB)",
            Self::AppInstances => "Instances",
            Self::AppRpsPerInstance => "RPS / instance",
            Self::Autoscale => "Autoscaling",
            Self::CacheEnabled => "Cache enabled",
            Self::CacheHitRate => "Cache hit rate",
            Self::CacheCapacity => "Cache capacity (RPS)",
            Self::DbEnabled => "Database enabled",
            Self::DbCapacity => "DB capacity (QPS)",
            Self::DbWritePenalty => "Write penalty",
            Self::Replication => "Replication",
            Self::Partitioning => "Partitioning",
            Self::BaseLatencyMs => "Base latency (ms)",
        }
    }

    pub fn range(self) -> KnobRange {
        let slider = |min, max, step| KnobRange::Slider { min, max, step };
        match self {
            Self::Rps => slider(10.0, 2000.0, 10.0),
            Self::ReadRatio => slider(0.1, 0.98, 0.01),
            Self::PayloadKb => slider(2.0, 200.0, 1.0),
            Self::AppInstances => slider(1.0, 30.0, 1.0),
            Self::AppRpsPerInstance => slider(30.0, 300.0, 5.0),
            Self::CacheHitRate => slider(0.15, 0.95, 0.01),
            Self::CacheCapacity => slider(100.0, 3000.0, 25.0),
            Self::DbCapacity => slider(80.0, 1200.0, 10.0),
            Self::DbWritePenalty => slider(1.0, 2.2, 0.05),
            Self::BaseLatencyMs => slider(10.0, 180.0, 1.0),
            Self::Autoscale
            | Self::CacheEnabled
            | Self::DbEnabled
            | Self::Replication
            | Self::Partitioning => KnobRange::Toggle,
        }
    }

    pub fn is_toggle(self) -> bool {
        matches!(self.range(), KnobRange::Toggle)
    }

    /// Clamps into the control's range. Toggles collapse to 0 or 1.
    pub fn clamp(self, value: f64) -> f64 {
        match self.range() {
            KnobRange::Slider { min, max, .. } => {
                if value.is_nan() {
                    min
                } else {
                    value.clamp(min, max)
                }
            }
            KnobRange::Toggle => {
                if value != 0.0 && !value.is_nan() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Reads the knob from a config; toggles read as 0 or 1.
    pub fn read(self, config: &SimConfig) -> f64 {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        match self {
            Self::Rps => config.traffic.rps,
            Self::ReadRatio => config.traffic.read_ratio,
            Self::PayloadKb => config.traffic.payload_kb,
            Self::AppInstances => f64::from(config.app.instances),
            Self::AppRpsPerInstance => config.app.rps_per_instance,
            Self::Autoscale => flag(config.app.autoscale),
            Self::CacheEnabled => flag(config.cache.enabled),
            Self::CacheHitRate => config.cache.base_hit_rate,
            Self::CacheCapacity => config.cache.rps_capacity,
            Self::DbEnabled => flag(config.db.enabled),
            Self::DbCapacity => config.db.qps_capacity,
            Self::DbWritePenalty => config.db.write_penalty,
            Self::Replication => flag(config.db.replication),
            Self::Partitioning => flag(config.db.partitioning),
            Self::BaseLatencyMs => config.base_latency_ms,
        }
    }

    /// Writes the raw value without range clamping; the model clamps on use.
    pub fn write(self, config: &mut SimConfig, value: f64) {
        let on = value != 0.0 && !value.is_nan();
        match self {
            Self::Rps => config.traffic.rps = value,
            Self::ReadRatio => config.traffic.read_ratio = value,
            Self::PayloadKb => config.traffic.payload_kb = value,
            Self::AppInstances => {
                config.app.instances = if value.is_nan() {
                    0
                } else {
                    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
                }
            }
            Self::AppRpsPerInstance => config.app.rps_per_instance = value,
            Self::Autoscale => config.app.autoscale = on,
            Self::CacheEnabled => config.cache.enabled = on,
            Self::CacheHitRate => config.cache.base_hit_rate = value,
            Self::CacheCapacity => config.cache.rps_capacity = value,
            Self::DbEnabled => config.db.enabled = on,
            Self::DbCapacity => config.db.qps_capacity = value,
            Self::DbWritePenalty => config.db.write_penalty = value,
            Self::Replication => config.db.replication = on,
            Self::Partitioning => config.db.partitioning = on,
            Self::BaseLatencyMs => config.base_latency_ms = value,
        }
    }

    /// Flips a toggle knob.
    pub fn toggle(self, config: &mut SimConfig) -> Result<bool> {
        if !self.is_toggle() {
            bail!("{} is not a toggle", self.name());
        }
        let next = self.read(config) == 0.0;
        self.write(config, if next { 1.0 } else { 0.0 });
        Ok(next)
    }

    /// Parses `value` for this knob; toggles accept on/off, true/false, 1/0.
    pub fn parse_value(self, raw: &str) -> Result<f64> {
        let raw = raw.trim();
        if self.is_toggle() {
            return match raw.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => Ok(1.0),
                "off" | "false" | "no" | "0" => Ok(0.0),
                _ => Err(anyhow!("{} expects on/off, got {raw}", self.name())),
            };
        }
        let value: f64 = raw
            .parse()
            .map_err(|_| anyhow!("{} expects a number, got {raw}", self.name()))?;
        if !value.is_finite() {
            bail!("{} expects a finite number, got {raw}", self.name());
        }
        Ok(value)
    }
}

impl fmt::Display for Knob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Knob {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|knob| knob.name() == wanted)
            .ok_or_else(|| anyhow!("Unknown knob: {raw}"))
    }
}

/// Parses a `name=value` assignment.
pub fn parse_assignment(raw: &str) -> Result<(Knob, f64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected knob=value, got {raw}"))?;
    let knob: Knob = name.parse()?;
    let value = knob.parse_value(value)?;
    Ok((knob, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_knob_round_trips_through_config() {
        for knob in Knob::ALL {
            let mut config = SimConfig::baseline();
            let value = match knob.range() {
                KnobRange::Slider { max, .. } => max,
                KnobRange::Toggle => 1.0 - knob.read(&config),
            };
            knob.write(&mut config, value);
            assert_eq!(knob.read(&config), value, "knob {knob}");
        }
    }

    #[test]
    fn test_clamp_respects_slider_range() {
        assert_eq!(Knob::Rps.clamp(5000.0), 2000.0);
        assert_eq!(Knob::ReadRatio.clamp(-1.0), 0.1);
        assert_eq!(Knob::DbWritePenalty.clamp(f64::NAN), 1.0);
        assert_eq!(Knob::Replication.clamp(3.0), 1.0);
    }

    #[test]
    fn test_toggle_flips_flag() {
        let mut config = SimConfig::baseline();
        assert!(config.cache.enabled);
        assert!(!Knob::CacheEnabled.toggle(&mut config).unwrap());
        assert!(!config.cache.enabled);
        assert!(Knob::Rps.toggle(&mut config).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("rps=900").unwrap(), (Knob::Rps, 900.0));
        assert_eq!(
            parse_assignment("cache-enabled=off").unwrap(),
            (Knob::CacheEnabled, 0.0)
        );
        assert!(parse_assignment("rps").is_err());
        assert!(parse_assignment("rps=fast").is_err());
        assert!(parse_assignment("rps=inf").is_err());
        assert!(parse_assignment("queue_depth=3").is_err());
    }

    #[test]
    fn test_instances_written_as_whole_numbers() {
        let mut config = SimConfig::baseline();
        Knob::AppInstances.write(&mut config, 6.6);
        assert_eq!(config.app.instances, 7);
        Knob::AppInstances.write(&mut config, -3.0);
        assert_eq!(config.app.instances, 0);
    }
}

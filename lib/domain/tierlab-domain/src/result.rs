//! Derived-metrics snapshot produced by one evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Healthy,
    Degraded,
    Overloaded,
}

impl SystemStatus {
    /// Saturation threshold below which a tier counts as healthy.
    pub const DEGRADED_AT: f64 = 0.75;
    /// Saturation threshold at which a tier counts as overloaded.
    pub const OVERLOADED_AT: f64 = 1.0;

    pub fn from_saturation(saturation: f64) -> Self {
        if saturation < Self::DEGRADED_AT {
            Self::Healthy
        } else if saturation < Self::OVERLOADED_AT {
            Self::Degraded
        } else {
            Self::Overloaded
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Overloaded => "overloaded",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalable stage whose saturation is modeled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    App,
    Cache,
    Db,
}

impl Tier {
    /// Order in which tiers win a saturation tie.
    pub const TIE_BREAK: [Tier; 3] = [Tier::Db, Tier::Cache, Tier::App];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Cache => "cache",
            Self::Db => "db",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Med,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    pub status: SystemStatus,
    pub traffic: TrafficBreakdown,
    pub saturation: Saturation,
    pub capacity: TierCapacity,
    pub cache: CacheStats,
    pub database: DatabaseLoad,
    pub latency: Latency,
    pub errors: ErrorEstimate,
    pub cost: CostBreakdown,
    pub diagram: Diagram,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficBreakdown {
    pub rps: f64,
    pub reads: f64,
    pub writes: f64,
}

/// Offered load over effective capacity per tier. Values above 1.0 mean the
/// tier is overloaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    pub app: f64,
    pub cache: f64,
    pub db: f64,
    pub worst: f64,
    pub bottleneck: Tier,
}

impl Saturation {
    pub fn of(&self, tier: Tier) -> f64 {
        match tier {
            Tier::App => self.app,
            Tier::Cache => self.cache,
            Tier::Db => self.db,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierCapacity {
    pub app: f64,
    pub cache: f64,
    pub db_read: f64,
    pub db_write: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    /// Effective hit rate after penalties; 0 when the cache is disabled.
    pub hit_rate: f64,
    pub hits: f64,
    pub misses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatabaseLoad {
    pub enabled: bool,
    pub read_load: f64,
    pub write_load: f64,
    pub read_saturation: f64,
    pub write_saturation: f64,
}

impl DatabaseLoad {
    pub fn total_qps(&self) -> f64 {
        self.read_load + self.write_load
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Latency {
    pub p50: f64,
    pub p95: f64,
    pub notes: Vec<LatencyNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyNote {
    DbWritePressure,
    DbReadPressure,
    CacheDisabled,
    LowCacheHitRate,
    AutoscaleHeadroom,
}

impl LatencyNote {
    pub fn message(self) -> &'static str {
        match self {
            Self::DbWritePressure => "Write pressure is dominating DB saturation.",
            Self::DbReadPressure => "Read pressure (cache misses) is dominating DB saturation.",
            Self::CacheDisabled => "Cache disabled; DB reads will increase.",
            Self::LowCacheHitRate => "Cache hit rate is low; consider bigger cache or better keys.",
            Self::AutoscaleHeadroom => {
                "Autoscaling helps slightly; add instances for more headroom."
            }
        }
    }
}

impl fmt::Display for LatencyNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorEstimate {
    /// Modeled fraction of failed requests.
    pub rate: f64,
    pub cause: ErrorCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCause {
    None,
    TailLatencySpikes,
    DbSaturation,
    AppQueueOverflow,
    CacheSaturation,
}

impl ErrorCause {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::TailLatencySpikes => "Tail latency spikes",
            Self::DbSaturation => "DB saturation",
            Self::AppQueueOverflow => "App queue overflow",
            Self::CacheSaturation => "Cache saturation",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub monthly_compute: f64,
    pub monthly_cache: f64,
    pub monthly_db: f64,
    pub monthly_total: f64,
    pub breakdown: Vec<CostLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub hotspots: Vec<Hotspot>,
}

impl Diagram {
    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: NodeId,
    pub title: String,
    pub subtitle: String,
    pub status: SystemStatus,
    pub metrics: Vec<NodeMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetric {
    pub key: String,
    pub value: MetricValue,
}

impl NodeMetric {
    pub fn new(key: impl Into<String>, value: MetricValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Display value with its unit kept separate from formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// Ratio where 1.0 renders as 100%.
    Percent(f64),
    Rps(f64),
    Millis(f64),
    Count(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(ratio) => write!(f, "{}%", (ratio * 100.0).round()),
            Self::Rps(rps) => write!(f, "{} rps", rps.round()),
            Self::Millis(ms) => write!(f, "{} ms", ms.round()),
            Self::Count(count) => write!(f, "{}", count.round()),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub label: String,
    pub severity: Severity,
}

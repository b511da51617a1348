//! Domain models and invariants.

pub mod component;
pub mod config;
pub mod events;
pub mod knobs;
pub mod preset;
pub mod pricing;
pub mod recommendation;
pub mod result;

pub use component::{ComponentId, ComponentInfo, NodeId};
pub use config::{AppTierConfig, CacheConfig, DatabaseConfig, SimConfig, TrafficConfig};
pub use events::{Event, EventBus, EventLevel, now_millis};
pub use knobs::{Knob, KnobRange, parse_assignment};
pub use preset::{Preset, load_presets};
pub use pricing::CostTable;
pub use recommendation::{Recommendation, RecommendationKind};
pub use result::{
    CacheStats, CostBreakdown, CostLine, DatabaseLoad, Diagram, DiagramEdge, DiagramNode,
    ErrorCause, ErrorEstimate, Hotspot, Latency, LatencyNote, MetricValue, NodeMetric, Saturation,
    Severity, SimResult, SystemStatus, Tier, TierCapacity, TrafficBreakdown,
};

//! Identifiers for diagram nodes and control sections, plus the reference
//! text shown for each of them.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// A box in the architecture diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeId {
    Client,
    Lb,
    App,
    Cache,
    Db,
}

impl NodeId {
    pub const ALL: [NodeId; 5] = [
        NodeId::Client,
        NodeId::Lb,
        NodeId::App,
        NodeId::Cache,
        NodeId::Db,
    ];

    pub fn as_str(self) -> &'static str {
        ComponentId::from(self).as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the informational layer can describe: a diagram node or a
/// section of the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentId {
    Client,
    Lb,
    App,
    Cache,
    Db,
    PresetSection,
    TrafficSection,
    AppSection,
    CacheSection,
    DbSection,
    LatencySection,
}

impl ComponentId {
    pub const ALL: [ComponentId; 11] = [
        ComponentId::Client,
        ComponentId::Lb,
        ComponentId::App,
        ComponentId::Cache,
        ComponentId::Db,
        ComponentId::PresetSection,
        ComponentId::TrafficSection,
        ComponentId::AppSection,
        ComponentId::CacheSection,
        ComponentId::DbSection,
        ComponentId::LatencySection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Lb => "lb",
            Self::App => "app",
            Self::Cache => "cache",
            Self::Db => "db",
            Self::PresetSection => "preset_section",
            Self::TrafficSection => "traffic_section",
            Self::AppSection => "app_section",
            Self::CacheSection => "cache_section",
            Self::DbSection => "db_section",
            Self::LatencySection => "latency_section",
        }
    }

    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Client => Some(NodeId::Client),
            Self::Lb => Some(NodeId::Lb),
            Self::App => Some(NodeId::App),
            Self::Cache => Some(NodeId::Cache),
            Self::Db => Some(NodeId::Db),
            _ => None,
        }
    }
}

impl From<NodeId> for ComponentId {
    fn from(node: NodeId) -> Self {
        match node {
            NodeId::Client => Self::Client,
            NodeId::Lb => Self::Lb,
            NodeId::App => Self::App,
            NodeId::Cache => Self::Cache,
            NodeId::Db => Self::Db,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentId {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| anyhow!("Unknown component: {raw}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub id: ComponentId,
    pub title: String,
    pub overview: String,
    pub affects: Vec<String>,
    pub affected_by: Vec<String>,
    pub symptoms: Vec<String>,
    pub fixes: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

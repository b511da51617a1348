use serde::{Deserialize, Serialize};

use crate::result::Tier;

/// What a recommendation is about. At most one recommendation per kind is
/// produced by a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tier", rename_all = "snake_case")]
pub enum RecommendationKind {
    Healthy,
    Bottleneck(Tier),
    TailLatency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub reason: String,
    /// Suggested actions, most impactful first.
    pub actions: Vec<String>,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        title: impl Into<String>,
        reason: impl Into<String>,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            reason: reason.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

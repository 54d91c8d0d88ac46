//! Lead priority classification.
//!
//! Two scorers serve different call sites and can disagree on the same lead:
//! the weighted scorer for rich signal sets and the timeline-first scorer for
//! thin ones. Callers pick one with [`ScoringVariant`].

mod timeline_first;
mod weighted;

pub use timeline_first::score_timeline_first;
pub use weighted::{score_weighted, SignalContribution, SignalKind, WeightedScore};

use super::domain::{LeadQuality, LeadSignals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringVariant {
    #[default]
    Weighted,
    TimelineFirst,
}

impl ScoringVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "weighted" | "rich" | "a" => Some(Self::Weighted),
            "timeline-first" | "timeline" | "b" => Some(Self::TimelineFirst),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::TimelineFirst => "timeline-first",
        }
    }
}

pub fn score_lead_quality(signals: &LeadSignals, variant: ScoringVariant) -> LeadQuality {
    match variant {
        ScoringVariant::Weighted => score_weighted(signals).quality,
        ScoringVariant::TimelineFirst => score_timeline_first(signals),
    }
}

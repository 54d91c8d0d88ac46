use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{EngagementCounters, LeadPreferences, LeadQuality, LeadSignals};
use super::scoring::{score_lead_quality, score_weighted, ScoringVariant, WeightedScore};
use super::tags::{derive_tags, TagOptions, TagSet};
use crate::affordability::{solve_affordability, AffordabilityInput, AffordabilityResult};

/// Everything captured for one lead in the current conversational turn.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadIntake {
    pub affordability: Option<AffordabilityInput>,
    pub signals: LeadSignals,
    pub preferences: LeadPreferences,
    pub engagement: EngagementCounters,
    pub variant: ScoringVariant,
}

/// Solver output as carried on the lead record. A rejection keeps the
/// user-facing message so the caller can surface it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AffordabilityOutcome {
    Solved(AffordabilityResult),
    Rejected { kind: &'static str, message: String },
}

impl AffordabilityOutcome {
    pub fn result(&self) -> Option<&AffordabilityResult> {
        match self {
            Self::Solved(result) => Some(result),
            Self::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityOutcome>,
    pub quality: LeadQuality,
    pub variant: ScoringVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted: Option<WeightedScore>,
    pub tags: TagSet,
}

/// Runs solver, scorer, and tag deriver in order for one intake.
pub fn evaluate_lead(intake: &LeadIntake, options: &TagOptions) -> LeadEvaluation {
    let affordability = intake.affordability.as_ref().map(|input| {
        match solve_affordability(input) {
            Ok(result) => AffordabilityOutcome::Solved(result),
            Err(err) => {
                debug!(kind = err.kind(), "affordability input rejected");
                AffordabilityOutcome::Rejected {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        }
    });
    let solved = affordability.as_ref().and_then(AffordabilityOutcome::result);

    let signals = intake.signals.clone().with_affordability(solved);
    let (quality, weighted) = match intake.variant {
        ScoringVariant::Weighted => {
            let score = score_weighted(&signals);
            (score.quality, Some(score))
        }
        variant => (score_lead_quality(&signals, variant), None),
    };

    let tags = derive_tags(
        &intake.preferences,
        quality,
        solved,
        &intake.engagement,
        options,
    );

    info!(
        quality = quality.as_str(),
        variant = intake.variant.as_str(),
        tag_count = tags.len(),
        "lead evaluated"
    );

    LeadEvaluation {
        affordability,
        quality,
        variant: intake.variant,
        weighted,
        tags,
    }
}

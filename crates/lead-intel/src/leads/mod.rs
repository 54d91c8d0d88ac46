//! Lead scoring and CRM tagging.

pub mod domain;
mod pipeline;
pub mod scoring;
pub mod tags;

pub use domain::{
    Budget, EngagementCounters, LeadPreferences, LeadQuality, LeadSignals, LeadType,
    PropertyType, Timeline,
};
pub use pipeline::{evaluate_lead, AffordabilityOutcome, LeadEvaluation, LeadIntake};
pub use scoring::{
    score_lead_quality, score_timeline_first, score_weighted, ScoringVariant, SignalContribution,
    SignalKind, WeightedScore,
};
pub use tags::{derive_tags, BracketTable, BudgetBracket, Tag, TagCategory, TagOptions, TagSet};

//! Lead intelligence engine for the real-estate lead assistant.
//!
//! Three pure components share one downstream CRM record: the affordability
//! solver, the lead quality scorer, and the tag deriver. [`leads::evaluate_lead`]
//! runs them in order for a single intake.

pub mod affordability;
pub mod config;
pub mod error;
pub mod import;
pub mod leads;
pub mod telemetry;

pub use affordability::{
    solve_affordability, AffordabilityError, AffordabilityInput, AffordabilityResult,
};
pub use leads::{
    derive_tags, evaluate_lead, score_lead_quality, LeadEvaluation, LeadIntake, LeadQuality,
    LeadSignals, ScoringVariant, TagOptions, TagSet,
};

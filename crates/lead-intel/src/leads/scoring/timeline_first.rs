use crate::leads::domain::{LeadQuality, LeadSignals, Timeline};

/// Precedence classifier for call sites that only know timeline, urgency, and
/// pre-approval. Urgency is checked before browsing so an urgent browser is hot.
pub fn score_timeline_first(signals: &LeadSignals) -> LeadQuality {
    if matches!(
        signals.timeline,
        Some(Timeline::Immediate | Timeline::ThreeMonths | Timeline::Asap)
    ) {
        return LeadQuality::Hot;
    }

    if signals.urgency_count() > 0 {
        return LeadQuality::Hot;
    }

    if signals.pre_approved {
        return LeadQuality::Warm;
    }

    if matches!(
        signals.timeline,
        Some(Timeline::JustBrowsing | Timeline::JustExploring)
    ) {
        return LeadQuality::Cold;
    }

    LeadQuality::Warm
}

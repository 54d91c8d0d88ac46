use crate::leads::domain::{LeadQuality, LeadSignals, Timeline};
use serde::{Deserialize, Serialize};

const HOT_THRESHOLD: u8 = 5;
const WARM_THRESHOLD: u8 = 2;
const MAX_URGENCY_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Phone,
    PreApproval,
    Timeline,
    Urgency,
    FirstTimeBuyer,
    MortgageEstimate,
}

/// One scored signal, kept so the CRM notes can explain the tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub signal: SignalKind,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub total: u8,
    pub quality: LeadQuality,
    pub contributions: Vec<SignalContribution>,
}

fn timeline_points(timeline: Option<Timeline>) -> u8 {
    match timeline {
        Some(Timeline::Asap | Timeline::Immediate) => 3,
        Some(Timeline::OneToThreeMonths | Timeline::ThreeMonths) => 2,
        Some(Timeline::ThreeToSixMonths | Timeline::SixMonths) => 1,
        _ => 0,
    }
}

fn classify(total: u8) -> LeadQuality {
    if total >= HOT_THRESHOLD {
        LeadQuality::Hot
    } else if total >= WARM_THRESHOLD {
        LeadQuality::Warm
    } else {
        LeadQuality::Cold
    }
}

/// Additive score over the full signal set.
pub fn score_weighted(signals: &LeadSignals) -> WeightedScore {
    let mut contributions = Vec::new();

    if signals.has_phone {
        contributions.push(SignalContribution {
            signal: SignalKind::Phone,
            points: 3,
            notes: "phone number captured".to_string(),
        });
    }

    if signals.pre_approved {
        contributions.push(SignalContribution {
            signal: SignalKind::PreApproval,
            points: 3,
            notes: "mortgage pre-approval in hand".to_string(),
        });
    }

    let timeline = timeline_points(signals.timeline);
    if let (Some(value), true) = (signals.timeline, timeline > 0) {
        contributions.push(SignalContribution {
            signal: SignalKind::Timeline,
            points: timeline,
            notes: format!("timeline {}", value.as_str()),
        });
    }

    let urgency_count = signals.urgency_count();
    if urgency_count > 0 {
        contributions.push(SignalContribution {
            signal: SignalKind::Urgency,
            points: urgency_count.min(MAX_URGENCY_POINTS) as u8,
            notes: format!("{urgency_count} urgency factor(s)"),
        });
    }

    if signals.first_time_buyer {
        contributions.push(SignalContribution {
            signal: SignalKind::FirstTimeBuyer,
            points: 1,
            notes: "first-time buyer".to_string(),
        });
    }

    if signals.has_mortgage_estimate {
        contributions.push(SignalContribution {
            signal: SignalKind::MortgageEstimate,
            points: 1,
            notes: "affordability estimate attached".to_string(),
        });
    }

    let total = contributions.iter().map(|entry| entry.points).sum();
    WeightedScore {
        total,
        quality: classify(total),
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urgency(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("factor {index}")).collect()
    }

    #[test]
    fn five_points_is_hot() {
        let signals = LeadSignals {
            has_phone: true,
            timeline: Some(Timeline::OneToThreeMonths),
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 5);
        assert_eq!(score.quality, LeadQuality::Hot);
    }

    #[test]
    fn four_points_is_warm() {
        let signals = LeadSignals {
            pre_approved: true,
            first_time_buyer: true,
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 4);
        assert_eq!(score.quality, LeadQuality::Warm);
    }

    #[test]
    fn two_points_is_warm() {
        let signals = LeadSignals {
            urgency_factors: urgency(2),
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 2);
        assert_eq!(score.quality, LeadQuality::Warm);
    }

    #[test]
    fn one_point_is_cold() {
        let signals = LeadSignals {
            has_mortgage_estimate: true,
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 1);
        assert_eq!(score.quality, LeadQuality::Cold);
    }

    #[test]
    fn urgency_points_are_capped() {
        let signals = LeadSignals {
            urgency_factors: urgency(4),
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 2);
        assert_eq!(score.contributions.len(), 1);
        assert_eq!(score.contributions[0].signal, SignalKind::Urgency);
    }

    #[test]
    fn urgency_counts_list_length_as_given() {
        let signals = LeadSignals {
            urgency_factors: vec!["relocating".to_string(), String::new()],
            ..LeadSignals::default()
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 2);
        assert_eq!(score.quality, LeadQuality::Warm);
    }

    #[test]
    fn timeline_weights_decrease_with_horizon() {
        assert_eq!(timeline_points(Some(Timeline::Immediate)), 3);
        assert_eq!(timeline_points(Some(Timeline::ThreeMonths)), 2);
        assert_eq!(timeline_points(Some(Timeline::SixMonths)), 1);
        assert_eq!(timeline_points(Some(Timeline::SixToTwelveMonths)), 0);
        assert_eq!(timeline_points(Some(Timeline::JustBrowsing)), 0);
        assert_eq!(timeline_points(None), 0);
    }

    #[test]
    fn fully_qualified_lead_lists_every_contribution() {
        let signals = LeadSignals {
            has_phone: true,
            pre_approved: true,
            timeline: Some(Timeline::Asap),
            urgency_factors: urgency(1),
            first_time_buyer: true,
            has_mortgage_estimate: true,
        };

        let score = score_weighted(&signals);
        assert_eq!(score.total, 12);
        assert_eq!(score.contributions.len(), 6);
        assert_eq!(score.quality, LeadQuality::Hot);
    }

    #[test]
    fn empty_signals_are_cold() {
        let score = score_weighted(&LeadSignals::default());
        assert_eq!(score.total, 0);
        assert!(score.contributions.is_empty());
        assert_eq!(score.quality, LeadQuality::Cold);
    }
}

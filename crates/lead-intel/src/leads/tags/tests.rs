use super::*;
use crate::affordability::{solve_affordability, AffordabilityInput};
use crate::leads::domain::{Budget, LeadType, PropertyType, Timeline};

fn preferences() -> LeadPreferences {
    LeadPreferences {
        source: Some("Open House".to_string()),
        buyer_timeline: Some(Timeline::OneToThreeMonths),
        seller_timeline: Some(Timeline::SixMonths),
        lead_type: Some(LeadType::BuyerAndSeller),
        pre_approved: true,
        first_time_buyer: true,
        property_types: vec![PropertyType::Condo, PropertyType::Townhouse],
        budget: Some(Budget {
            min: Some(800_000.0),
            max: Some(1_000_000.0),
        }),
        city: Some("Toronto".to_string()),
        neighborhoods: vec!["Liberty  Village".to_string(), "The Annex".to_string()],
        urgency_factors: vec!["Lease ending".to_string()],
    }
}

#[test]
fn categories_follow_fixed_order() {
    let engagement = EngagementCounters {
        searches: 3,
        viewed_properties: 4,
    };

    let tags = derive_tags(
        &preferences(),
        LeadQuality::Hot,
        None,
        &engagement,
        &TagOptions::default(),
    );

    assert_eq!(
        tags.values(),
        vec![
            "website",
            "open-house",
            "hot-lead",
            "timeline-1-3-months",
            "seller-timeline-6-months",
            "buyer-seller",
            "pre-approved",
            "first-time-buyer",
            "condo",
            "townhouse",
            "750k-1m",
            "toronto",
            "liberty-village",
            "the-annex",
            "lease-ending",
            "multiple-searches",
            "engaged-browser",
            "viewed-4-listings",
        ]
    );
}

#[test]
fn minimal_lead_gets_site_and_quality_only() {
    let tags = derive_tags(
        &LeadPreferences::default(),
        LeadQuality::Cold,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.values(), vec!["website", "cold-lead"]);
}

#[test]
fn budget_bracket_uses_average_of_range() {
    let mut prefs = LeadPreferences::default();
    prefs.budget = Some(Budget {
        min: Some(1_100_000.0),
        max: Some(1_300_000.0),
    });

    let tags = derive_tags(
        &prefs,
        LeadQuality::Warm,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.in_category(TagCategory::BudgetBracket), vec!["1m-1.5m"]);
}

#[test]
fn budget_falls_back_to_affordability_and_marks_estimate() {
    let result = solve_affordability(&AffordabilityInput::new(120_000.0, 100_000.0))
        .expect("valid input");

    let tags = derive_tags(
        &LeadPreferences::default(),
        LeadQuality::Warm,
        Some(&result),
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(
        tags.in_category(TagCategory::Qualification),
        vec!["mortgage-estimated"]
    );
    assert_eq!(tags.in_category(TagCategory::BudgetBracket), vec!["500k-750k"]);
}

#[test]
fn explicit_budget_wins_over_affordability() {
    let result = solve_affordability(&AffordabilityInput::new(120_000.0, 100_000.0))
        .expect("valid input");
    let mut prefs = LeadPreferences::default();
    prefs.budget = Some(Budget {
        min: None,
        max: Some(2_400_000.0),
    });

    let tags = derive_tags(
        &prefs,
        LeadQuality::Warm,
        Some(&result),
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.in_category(TagCategory::BudgetBracket), vec!["2m-plus"]);
}

#[test]
fn compact_table_changes_bracket_vocabulary() {
    let options = TagOptions {
        bracket_table: BracketTable::Compact,
        ..TagOptions::default()
    };

    let tags = derive_tags(
        &preferences(),
        LeadQuality::Hot,
        None,
        &EngagementCounters::default(),
        &options,
    );

    assert!(tags.contains("750k-1m"));

    let mut prefs = preferences();
    prefs.budget = Some(Budget {
        min: Some(1_200_000.0),
        max: Some(1_200_000.0),
    });
    let tags = derive_tags(
        &prefs,
        LeadQuality::Hot,
        None,
        &EngagementCounters::default(),
        &options,
    );
    assert!(tags.contains("1m-2m"));
}

#[test]
fn duplicates_collapse_within_a_category_only() {
    let mut prefs = LeadPreferences::default();
    prefs.pre_approved = true;
    prefs.city = Some("Oakville".to_string());
    prefs.neighborhoods = vec!["oakville".to_string(), " Oakville ".to_string()];
    prefs.urgency_factors = vec!["Pre Approved".to_string()];

    let tags = derive_tags(
        &prefs,
        LeadQuality::Warm,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.in_category(TagCategory::Location), vec!["oakville"]);
    assert_eq!(
        tags.values()
            .iter()
            .filter(|value| **value == "pre-approved")
            .count(),
        2
    );
}

#[test]
fn site_tag_and_source_can_coincide_without_duplication() {
    let mut prefs = LeadPreferences::default();
    prefs.source = Some("Website".to_string());

    let tags = derive_tags(
        &prefs,
        LeadQuality::Cold,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.in_category(TagCategory::Source), vec!["website"]);
}

#[test]
fn engagement_tiers_pick_highest_view_threshold() {
    let counters = EngagementCounters {
        searches: 1,
        viewed_properties: 5,
    };

    let tags = derive_tags(
        &LeadPreferences::default(),
        LeadQuality::Warm,
        None,
        &counters,
        &TagOptions::default(),
    );

    assert_eq!(tags.in_category(TagCategory::Engagement), vec!["highly-engaged"]);
    assert_eq!(
        tags.in_category(TagCategory::ViewedCount),
        vec!["viewed-5-listings"]
    );
}

#[test]
fn blank_free_text_is_dropped() {
    let mut prefs = LeadPreferences::default();
    prefs.city = Some("   ".to_string());
    prefs.urgency_factors = vec![String::new()];

    let tags = derive_tags(
        &prefs,
        LeadQuality::Cold,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert!(tags.in_category(TagCategory::Location).is_empty());
    assert!(tags.in_category(TagCategory::Urgency).is_empty());
}

#[test]
fn derivation_is_idempotent() {
    let engagement = EngagementCounters {
        searches: 2,
        viewed_properties: 6,
    };
    let first = derive_tags(
        &preferences(),
        LeadQuality::Hot,
        None,
        &engagement,
        &TagOptions::default(),
    );
    let second = derive_tags(
        &preferences(),
        LeadQuality::Hot,
        None,
        &engagement,
        &TagOptions::default(),
    );

    assert_eq!(first, second);
}

#[test]
fn serializes_as_plain_strings() {
    let tags = derive_tags(
        &LeadPreferences::default(),
        LeadQuality::Hot,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    let json = serde_json::to_string(&tags).expect("serializes");
    assert_eq!(json, r#"["website","hot-lead"]"#);
}

#[test]
fn bracket_tag_is_the_bare_label() {
    let prefs = LeadPreferences {
        budget: Some(Budget {
            min: Some(900_000.0),
            max: None,
        }),
        ..LeadPreferences::default()
    };

    let tags = derive_tags(
        &prefs,
        LeadQuality::Warm,
        None,
        &EngagementCounters::default(),
        &TagOptions::default(),
    );

    assert_eq!(tags.values(), vec!["website", "warm-lead", "750k-1m"]);
}

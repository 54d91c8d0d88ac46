//! CRM tag derivation.
//!
//! Tags are emitted category by category in a fixed order. Within a category
//! repeated tokens collapse; across categories they do not, so an urgency
//! factor of "pre approved" still appears next to the qualification tag.

mod brackets;
pub(crate) mod normalize;

pub use brackets::{BracketTable, BudgetBracket};

use super::domain::{EngagementCounters, LeadPreferences, LeadQuality};
use crate::affordability::AffordabilityResult;
use normalize::slug;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

pub const DEFAULT_SITE_TAG: &str = "website";

const MULTIPLE_SEARCHES_AT: u32 = 2;
const ENGAGED_VIEWS_AT: u32 = 3;
const HIGHLY_ENGAGED_VIEWS_AT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagCategory {
    Source,
    Quality,
    Timeline,
    LeadType,
    Qualification,
    PropertyType,
    BudgetBracket,
    Location,
    Urgency,
    Engagement,
    ViewedCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub category: TagCategory,
    pub value: String,
}

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Ordered tags for one lead record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|tag| tag.value == value)
    }

    pub fn in_category(&self, category: TagCategory) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|tag| tag.category == category)
            .map(Tag::as_str)
            .collect()
    }

    pub fn values(&self) -> Vec<&str> {
        self.tags.iter().map(Tag::as_str).collect()
    }

    fn extend<I, S>(&mut self, category: TagCategory, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        for raw in values {
            let value = slug(raw.as_ref());
            if value.is_empty() || !seen.insert(value.clone()) {
                continue;
            }
            self.tags.push(Tag { category, value });
        }
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags.iter().map(Tag::as_str))
    }
}

/// Caller-supplied tagging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    pub site_tag: String,
    pub bracket_table: BracketTable,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            site_tag: DEFAULT_SITE_TAG.to_string(),
            bracket_table: BracketTable::default(),
        }
    }
}

fn budget_price(
    preferences: &LeadPreferences,
    affordability: Option<&AffordabilityResult>,
) -> Option<f64> {
    preferences
        .budget
        .as_ref()
        .and_then(|budget| budget.average())
        .or_else(|| affordability.map(|result| result.max_home_price))
        .filter(|price| *price > 0.0)
}

fn engagement_tags(engagement: &EngagementCounters) -> Vec<&'static str> {
    let mut tags = Vec::new();
    if engagement.searches >= MULTIPLE_SEARCHES_AT {
        tags.push("multiple-searches");
    }
    if engagement.viewed_properties >= HIGHLY_ENGAGED_VIEWS_AT {
        tags.push("highly-engaged");
    } else if engagement.viewed_properties >= ENGAGED_VIEWS_AT {
        tags.push("engaged-browser");
    }
    tags
}

pub fn derive_tags(
    preferences: &LeadPreferences,
    quality: LeadQuality,
    affordability: Option<&AffordabilityResult>,
    engagement: &EngagementCounters,
    options: &TagOptions,
) -> TagSet {
    let mut set = TagSet::default();

    set.extend(
        TagCategory::Source,
        std::iter::once(options.site_tag.as_str()).chain(preferences.source.as_deref()),
    );

    set.extend(TagCategory::Quality, [format!("{}-lead", quality.as_str())]);

    let timelines = preferences
        .buyer_timeline
        .map(|timeline| format!("timeline-{}", timeline.as_str()))
        .into_iter()
        .chain(
            preferences
                .seller_timeline
                .map(|timeline| format!("seller-timeline-{}", timeline.as_str())),
        );
    set.extend(TagCategory::Timeline, timelines);

    set.extend(
        TagCategory::LeadType,
        preferences.lead_type.map(|lead_type| lead_type.as_str()),
    );

    let mut qualifications = Vec::new();
    if preferences.pre_approved {
        qualifications.push("pre-approved");
    }
    if preferences.first_time_buyer {
        qualifications.push("first-time-buyer");
    }
    if affordability.is_some() {
        qualifications.push("mortgage-estimated");
    }
    set.extend(TagCategory::Qualification, qualifications);

    set.extend(
        TagCategory::PropertyType,
        preferences.property_types.iter().map(|kind| kind.as_str()),
    );

    set.extend(
        TagCategory::BudgetBracket,
        budget_price(preferences, affordability)
            .map(|price| options.bracket_table.bracket_for(price).label()),
    );

    set.extend(
        TagCategory::Location,
        preferences
            .city
            .iter()
            .chain(preferences.neighborhoods.iter()),
    );

    set.extend(TagCategory::Urgency, &preferences.urgency_factors);

    set.extend(TagCategory::Engagement, engagement_tags(engagement));

    if engagement.viewed_properties > 0 {
        set.extend(
            TagCategory::ViewedCount,
            [format!("viewed-{}-listings", engagement.viewed_properties)],
        );
    }

    set
}

#[cfg(test)]
mod tests;

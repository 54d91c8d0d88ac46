use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::tags::normalize::slug;
use crate::affordability::AffordabilityResult;

/// Buying or selling horizon captured from the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeline {
    Asap,
    Immediate,
    OneToThreeMonths,
    ThreeMonths,
    ThreeToSixMonths,
    SixMonths,
    SixToTwelveMonths,
    OverAYear,
    JustBrowsing,
    JustExploring,
}

impl Timeline {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Asap,
            Self::Immediate,
            Self::OneToThreeMonths,
            Self::ThreeMonths,
            Self::ThreeToSixMonths,
            Self::SixMonths,
            Self::SixToTwelveMonths,
            Self::OverAYear,
            Self::JustBrowsing,
            Self::JustExploring,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asap => "asap",
            Self::Immediate => "immediate",
            Self::OneToThreeMonths => "1-3-months",
            Self::ThreeMonths => "3-months",
            Self::ThreeToSixMonths => "3-6-months",
            Self::SixMonths => "6-months",
            Self::SixToTwelveMonths => "6-12-months",
            Self::OverAYear => "12-plus-months",
            Self::JustBrowsing => "just-browsing",
            Self::JustExploring => "just-exploring",
        }
    }

    /// Lenient parse of conversational values such as `"1–3 months"` or `"Just Browsing"`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = slug(&value.replace(['\u{2013}', '\u{2014}'], "-"));
        let normalized = normalized
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        match normalized.as_str() {
            "asap" | "as-soon-as-possible" => Some(Self::Asap),
            "immediate" | "immediately" | "now" => Some(Self::Immediate),
            "1-3-months" | "1-3months" | "1-to-3-months" => Some(Self::OneToThreeMonths),
            "3-months" | "3months" | "three-months" => Some(Self::ThreeMonths),
            "3-6-months" | "3-6months" | "3-to-6-months" => Some(Self::ThreeToSixMonths),
            "6-months" | "6months" | "six-months" => Some(Self::SixMonths),
            "6-12-months" | "6-12months" | "6-to-12-months" => Some(Self::SixToTwelveMonths),
            "12-plus-months" | "12+-months" | "over-a-year" | "1-year-plus" => {
                Some(Self::OverAYear)
            }
            "just-browsing" | "browsing" => Some(Self::JustBrowsing),
            "just-exploring" | "exploring" => Some(Self::JustExploring),
            _ => None,
        }
    }
}

/// What the lead intends to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadType {
    Buyer,
    Seller,
    BuyerAndSeller,
    Investor,
    Renter,
}

impl LeadType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::BuyerAndSeller => "buyer-seller",
            Self::Investor => "investor",
            Self::Renter => "renter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match slug(value).as_str() {
            "buyer" | "buying" | "buy" => Some(Self::Buyer),
            "seller" | "selling" | "sell" => Some(Self::Seller),
            "buyer-seller" | "both" | "buying-and-selling" | "buyer-and-seller" => {
                Some(Self::BuyerAndSeller)
            }
            "investor" | "investing" => Some(Self::Investor),
            "renter" | "renting" | "rent" => Some(Self::Renter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Detached,
    SemiDetached,
    Townhouse,
    Condo,
    Duplex,
    MultiFamily,
    Land,
    Cottage,
}

impl PropertyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detached => "detached",
            Self::SemiDetached => "semi-detached",
            Self::Townhouse => "townhouse",
            Self::Condo => "condo",
            Self::Duplex => "duplex",
            Self::MultiFamily => "multi-family",
            Self::Land => "land",
            Self::Cottage => "cottage",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match slug(value).as_str() {
            "detached" | "house" | "single-family" => Some(Self::Detached),
            "semi-detached" | "semi" => Some(Self::SemiDetached),
            "townhouse" | "townhome" | "row-house" => Some(Self::Townhouse),
            "condo" | "condominium" | "apartment" => Some(Self::Condo),
            "duplex" => Some(Self::Duplex),
            "multi-family" | "multiplex" | "triplex" | "fourplex" => Some(Self::MultiFamily),
            "land" | "lot" | "vacant-land" => Some(Self::Land),
            "cottage" | "cabin" | "recreational" => Some(Self::Cottage),
            _ => None,
        }
    }
}

/// Closed vocabularies that accept lenient free-text input.
pub(crate) trait Vocabulary: Sized {
    fn parse_term(value: &str) -> Option<Self>;
}

macro_rules! slug_serde {
    ($ty:ty, $expected:literal) => {
        impl Vocabulary for $ty {
            fn parse_term(value: &str) -> Option<Self> {
                <$ty>::parse(value)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty>::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown {} '{}'", $expected, raw))
                })
            }
        }
    };
}

slug_serde!(Timeline, "timeline");
slug_serde!(LeadType, "lead type");
slug_serde!(PropertyType, "property type");

/// Unknown terms become "signal not present" instead of failing the whole payload.
pub(crate) fn lenient_term<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Vocabulary,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(T::parse_term))
}

pub(crate) fn lenient_terms<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Vocabulary,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|value| T::parse_term(value))
        .collect())
}

/// Terminal priority tier handed to the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadQuality {
    Hot,
    Warm,
    Cold,
}

impl LeadQuality {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
        }
    }
}

/// Signals captured during the conversation that feed lead scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadSignals {
    pub has_phone: bool,
    pub pre_approved: bool,
    #[serde(deserialize_with = "lenient_term")]
    pub timeline: Option<Timeline>,
    pub urgency_factors: Vec<String>,
    pub first_time_buyer: bool,
    pub has_mortgage_estimate: bool,
}

impl LeadSignals {
    /// Marks the mortgage-estimate signal once affordability has been solved.
    pub fn with_affordability(mut self, result: Option<&AffordabilityResult>) -> Self {
        if result.is_some() {
            self.has_mortgage_estimate = true;
        }
        self
    }

    pub(crate) fn urgency_count(&self) -> usize {
        self.urgency_factors.len()
    }
}

/// Explicit budget range, when the lead named one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Budget {
    /// Midpoint of the range, or whichever bound was given.
    pub fn average(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (Some(bound), None) | (None, Some(bound)) => Some(bound),
            (None, None) => None,
        }
    }
}

/// Preferences captured during the conversation, used for CRM tagging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadPreferences {
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient_term")]
    pub buyer_timeline: Option<Timeline>,
    #[serde(deserialize_with = "lenient_term")]
    pub seller_timeline: Option<Timeline>,
    #[serde(deserialize_with = "lenient_term")]
    pub lead_type: Option<LeadType>,
    pub pre_approved: bool,
    pub first_time_buyer: bool,
    #[serde(deserialize_with = "lenient_terms")]
    pub property_types: Vec<PropertyType>,
    pub budget: Option<Budget>,
    pub city: Option<String>,
    pub neighborhoods: Vec<String>,
    pub urgency_factors: Vec<String>,
}

/// Tool-usage counts for the current conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngagementCounters {
    pub searches: u32,
    pub viewed_properties: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_parses_conversational_variants() {
        assert_eq!(Timeline::parse("ASAP"), Some(Timeline::Asap));
        assert_eq!(Timeline::parse("1–3 months"), Some(Timeline::OneToThreeMonths));
        assert_eq!(Timeline::parse(" 3 - 6 months "), Some(Timeline::ThreeToSixMonths));
        assert_eq!(Timeline::parse("Just Browsing"), Some(Timeline::JustBrowsing));
        assert_eq!(Timeline::parse("someday"), None);
    }

    #[test]
    fn every_timeline_round_trips_through_its_slug() {
        for timeline in Timeline::ordered() {
            assert_eq!(Timeline::parse(timeline.as_str()), Some(timeline));
        }
    }

    #[test]
    fn signals_deserialize_with_missing_fields_absent() {
        let signals: LeadSignals =
            serde_json::from_str(r#"{"hasPhone": true, "timeline": "3 months"}"#)
                .expect("deserializes");
        assert!(signals.has_phone);
        assert_eq!(signals.timeline, Some(Timeline::ThreeMonths));
        assert!(!signals.pre_approved);
        assert!(signals.urgency_factors.is_empty());
    }

    #[test]
    fn unknown_timeline_is_treated_as_absent() {
        let signals: LeadSignals =
            serde_json::from_str(r#"{"timeline": "whenever"}"#).expect("deserializes");
        assert_eq!(signals.timeline, None);
    }

    #[test]
    fn strict_deserialize_rejects_unknown_terms() {
        let err = serde_json::from_str::<PropertyType>(r#""castle""#).unwrap_err();
        assert!(err.to_string().contains("unknown property type"));
    }

    #[test]
    fn budget_average_uses_available_bounds() {
        let both = Budget {
            min: Some(800_000.0),
            max: Some(1_000_000.0),
        };
        assert_eq!(both.average(), Some(900_000.0));
        let ceiling = Budget {
            min: None,
            max: Some(650_000.0),
        };
        assert_eq!(ceiling.average(), Some(650_000.0));
        assert_eq!(Budget::default().average(), None);
    }

    #[test]
    fn preferences_drop_unknown_property_types() {
        let preferences: LeadPreferences = serde_json::from_str(
            r#"{"propertyTypes": ["Condo", "castle", "semi detached"], "leadType": "both"}"#,
        )
        .expect("deserializes");
        assert_eq!(
            preferences.property_types,
            vec![PropertyType::Condo, PropertyType::SemiDetached]
        );
        assert_eq!(preferences.lead_type, Some(LeadType::BuyerAndSeller));
    }

    #[test]
    fn every_urgency_factor_counts() {
        let signals = LeadSignals {
            urgency_factors: vec!["relocating".to_string(), "  ".to_string()],
            ..LeadSignals::default()
        };
        assert_eq!(signals.urgency_count(), 2);
    }
}

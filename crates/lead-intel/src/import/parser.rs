use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::affordability::AffordabilityInput;
use crate::leads::{
    Budget, EngagementCounters, LeadIntake, LeadPreferences, LeadSignals, LeadType, PropertyType,
    ScoringVariant, Timeline,
};

use super::LeadImportError;

pub(crate) struct LeadRecord {
    pub(crate) lead_id: String,
    pub(crate) intake: LeadIntake,
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
    variant: ScoringVariant,
    default_contract_rate: f64,
) -> Result<Vec<LeadRecord>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<LeadRow>().enumerate() {
        let row = record?;
        let line = index + 2;
        let lead_id = row
            .lead_id
            .clone()
            .unwrap_or_else(|| format!("row-{line}"));
        let intake = row.into_intake(line, variant, default_contract_rate)?;
        records.push(LeadRecord { lead_id, intake });
    }

    Ok(records)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LeadRow {
    #[serde(rename = "Lead ID", deserialize_with = "empty_string_as_none")]
    lead_id: Option<String>,
    #[serde(rename = "Annual Income", deserialize_with = "empty_string_as_none")]
    annual_income: Option<String>,
    #[serde(rename = "Down Payment", deserialize_with = "empty_string_as_none")]
    down_payment: Option<String>,
    #[serde(rename = "Monthly Debts", deserialize_with = "empty_string_as_none")]
    monthly_debts: Option<String>,
    #[serde(rename = "Contract Rate", deserialize_with = "empty_string_as_none")]
    contract_rate: Option<String>,
    #[serde(rename = "Phone", deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Pre-Approved", deserialize_with = "empty_string_as_none")]
    pre_approved: Option<String>,
    #[serde(rename = "First Time Buyer", deserialize_with = "empty_string_as_none")]
    first_time_buyer: Option<String>,
    #[serde(rename = "Timeline", deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(rename = "Seller Timeline", deserialize_with = "empty_string_as_none")]
    seller_timeline: Option<String>,
    #[serde(rename = "Urgency", deserialize_with = "empty_string_as_none")]
    urgency: Option<String>,
    #[serde(rename = "Lead Type", deserialize_with = "empty_string_as_none")]
    lead_type: Option<String>,
    #[serde(rename = "Property Types", deserialize_with = "empty_string_as_none")]
    property_types: Option<String>,
    #[serde(rename = "City", deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "Neighborhoods", deserialize_with = "empty_string_as_none")]
    neighborhoods: Option<String>,
    #[serde(rename = "Budget Min", deserialize_with = "empty_string_as_none")]
    budget_min: Option<String>,
    #[serde(rename = "Budget Max", deserialize_with = "empty_string_as_none")]
    budget_max: Option<String>,
    #[serde(rename = "Source", deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(rename = "Searches", deserialize_with = "empty_string_as_none")]
    searches: Option<String>,
    #[serde(rename = "Viewed Listings", deserialize_with = "empty_string_as_none")]
    viewed_listings: Option<String>,
}

impl LeadRow {
    fn into_intake(
        self,
        line: usize,
        variant: ScoringVariant,
        default_contract_rate: f64,
    ) -> Result<LeadIntake, LeadImportError> {
        let number = |column: &'static str, value: &Option<String>| {
            value
                .as_deref()
                .map(|raw| parse_amount(raw).ok_or_else(|| invalid(line, column, raw)))
                .transpose()
        };
        let count = |column: &'static str, value: &Option<String>| {
            value
                .as_deref()
                .map(|raw| raw.parse::<u32>().map_err(|_| invalid(line, column, raw)))
                .transpose()
                .map(Option::unwrap_or_default)
        };

        let annual_income = number("Annual Income", &self.annual_income)?;
        let down_payment = number("Down Payment", &self.down_payment)?;
        let monthly_debts = number("Monthly Debts", &self.monthly_debts)?;
        let contract_rate = number("Contract Rate", &self.contract_rate)?;
        let budget_min = number("Budget Min", &self.budget_min)?;
        let budget_max = number("Budget Max", &self.budget_max)?;
        let searches = count("Searches", &self.searches)?;
        let viewed_properties = count("Viewed Listings", &self.viewed_listings)?;

        let affordability = annual_income.map(|income| AffordabilityInput {
            annual_income: income,
            down_payment: down_payment.unwrap_or(0.0),
            monthly_debts: monthly_debts.unwrap_or(0.0),
            contract_rate: contract_rate.unwrap_or(default_contract_rate),
        });

        let pre_approved = flag(self.pre_approved.as_deref());
        let first_time_buyer = flag(self.first_time_buyer.as_deref());
        let timeline = self.timeline.as_deref().and_then(Timeline::parse);
        let urgency_factors = split_list(self.urgency.as_deref());

        let budget = (budget_min.is_some() || budget_max.is_some()).then_some(Budget {
            min: budget_min,
            max: budget_max,
        });

        let signals = LeadSignals {
            has_phone: self.phone.is_some(),
            pre_approved,
            timeline,
            urgency_factors: urgency_factors.clone(),
            first_time_buyer,
            has_mortgage_estimate: false,
        };

        let preferences = LeadPreferences {
            source: self.source,
            buyer_timeline: timeline,
            seller_timeline: self.seller_timeline.as_deref().and_then(Timeline::parse),
            lead_type: self.lead_type.as_deref().and_then(LeadType::parse),
            pre_approved,
            first_time_buyer,
            property_types: split_list(self.property_types.as_deref())
                .iter()
                .filter_map(|value| PropertyType::parse(value))
                .collect(),
            budget,
            city: self.city,
            neighborhoods: split_list(self.neighborhoods.as_deref()),
            urgency_factors,
        };

        Ok(LeadIntake {
            affordability,
            signals,
            preferences,
            engagement: EngagementCounters {
                searches,
                viewed_properties,
            },
            variant,
        })
    }
}

fn invalid(line: usize, column: &'static str, value: &str) -> LeadImportError {
    LeadImportError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    }
}

/// Accepts `$250,000`, `250000`, or `4.25%`.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | '%' | ' '))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1" | "x")
    )
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

//! Maximum affordable home price under Canadian mortgage-qualification rules.
//!
//! Qualification is sized at the stress-test rate while the quoted payment uses
//! the contract rate. Both debt-service ceilings (GDS 39%, TDS 44%) bound the
//! monthly housing budget.

mod amortization;
mod insurance;


use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GDS_LIMIT: f64 = 0.39;
pub const TDS_LIMIT: f64 = 0.44;
pub const STRESS_TEST_FLOOR: f64 = 5.25;
pub const STRESS_TEST_BUFFER: f64 = 2.0;
pub const PROPERTY_TAX_RATE: f64 = 0.012;
pub const MONTHLY_HEATING: f64 = 150.0;
pub const DEFAULT_CONTRACT_RATE: f64 = 4.5;

const SEARCH_SPAN: f64 = 2_000_000.0;
const SEARCH_TOLERANCE: f64 = 1_000.0;
const PRICE_STEP: f64 = 1_000.0;

/// Household financials captured during the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityInput {
    pub annual_income: f64,
    pub down_payment: f64,
    #[serde(default)]
    pub monthly_debts: f64,
    #[serde(default = "default_contract_rate")]
    pub contract_rate: f64,
}

fn default_contract_rate() -> f64 {
    DEFAULT_CONTRACT_RATE
}

impl AffordabilityInput {
    pub fn new(annual_income: f64, down_payment: f64) -> Self {
        Self {
            annual_income,
            down_payment,
            monthly_debts: 0.0,
            contract_rate: DEFAULT_CONTRACT_RATE,
        }
    }

    pub fn with_monthly_debts(mut self, monthly_debts: f64) -> Self {
        self.monthly_debts = monthly_debts;
        self
    }

    pub fn with_contract_rate(mut self, contract_rate: f64) -> Self {
        self.contract_rate = contract_rate;
        self
    }

    fn monthly_income(&self) -> f64 {
        self.annual_income / 12.0
    }

    fn validate(&self) -> Result<(), AffordabilityError> {
        if !self.annual_income.is_finite() || self.annual_income <= 0.0 {
            return Err(AffordabilityError::InvalidIncome);
        }
        if !self.down_payment.is_finite() || self.down_payment < 0.0 {
            return Err(AffordabilityError::NegativeDownPayment);
        }
        if !self.monthly_debts.is_finite() || self.monthly_debts >= self.monthly_income() {
            return Err(AffordabilityError::DebtsExceedIncome);
        }
        Ok(())
    }
}

/// Qualification outcome and the monthly cost breakdown at the quoted price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityResult {
    pub max_home_price: f64,
    pub max_mortgage: f64,
    pub down_payment_percent: f64,
    #[serde(rename = "cmhcPremium")]
    pub cmhc_premium: Option<f64>,
    #[serde(rename = "totalMortgageWithCMHC")]
    pub total_mortgage_with_cmhc: f64,
    pub monthly_payment: f64,
    pub monthly_property_tax: f64,
    pub monthly_heating: f64,
    pub total_monthly_housing: f64,
    pub stress_test_rate: f64,
    pub gds_ratio: f64,
    pub tds_ratio: f64,
}

impl AffordabilityResult {
    pub fn requires_mortgage_insurance(&self) -> bool {
        self.cmhc_premium.is_some()
    }

    pub fn summary(&self) -> String {
        let insurance = match self.cmhc_premium {
            Some(premium) => format!("CMHC premium ${premium:.0}"),
            None => "no CMHC premium".to_string(),
        };
        format!(
            "max price ${:.0} ({:.1}% down, {}), ${:.0}/month housing at {:.2}% stress test, GDS {:.0}% / TDS {:.0}%",
            self.max_home_price,
            self.down_payment_percent,
            insurance,
            self.total_monthly_housing,
            self.stress_test_rate,
            self.gds_ratio,
            self.tds_ratio
        )
    }
}

/// Input rejected before solving. The display text is meant for the end user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AffordabilityError {
    #[error("Annual income must be greater than zero to estimate affordability.")]
    InvalidIncome,
    #[error("Down payment cannot be negative.")]
    NegativeDownPayment,
    #[error("Monthly debt payments meet or exceed monthly income, so no mortgage would qualify.")]
    DebtsExceedIncome,
}

impl AffordabilityError {
    pub const fn kind(self) -> &'static str {
        match self {
            Self::InvalidIncome => "InvalidIncome",
            Self::NegativeDownPayment => "NegativeDownPayment",
            Self::DebtsExceedIncome => "DebtsExceedIncome",
        }
    }
}

/// Qualifying rate: contract rate plus the buffer, never below the floor.
pub fn stress_test_rate(contract_rate: f64) -> f64 {
    (contract_rate + STRESS_TEST_BUFFER).max(STRESS_TEST_FLOOR)
}

fn monthly_property_tax(price: f64) -> f64 {
    price * PROPERTY_TAX_RATE / 12.0
}

fn qualifies(price: f64, down_payment: f64, max_housing_cost: f64, qualifying_rate: f64) -> bool {
    let available_for_payment = max_housing_cost - monthly_property_tax(price) - MONTHLY_HEATING;
    let max_mortgage = amortization::supportable_principal(available_for_payment, qualifying_rate);
    price - down_payment <= max_mortgage
}

pub fn solve_affordability(
    input: &AffordabilityInput,
) -> Result<AffordabilityResult, AffordabilityError> {
    input.validate()?;

    let monthly_income = input.monthly_income();
    let qualifying_rate = stress_test_rate(input.contract_rate);
    let max_housing_by_gds = monthly_income * GDS_LIMIT;
    let max_housing_by_tds = monthly_income * TDS_LIMIT - input.monthly_debts;
    let max_housing_cost = max_housing_by_gds.min(max_housing_by_tds);

    let ceiling = input.down_payment + SEARCH_SPAN;
    let mut low = input.down_payment;
    let mut high = ceiling;
    while high - low > SEARCH_TOLERANCE {
        let candidate = (low + high) / 2.0;
        if qualifies(candidate, input.down_payment, max_housing_cost, qualifying_rate) {
            low = candidate;
        } else {
            high = candidate;
        }
    }

    // The bisection stops anywhere inside the last window, so settle on the
    // largest qualifying step rather than the floor of wherever it stopped.
    let mut max_home_price = (low / PRICE_STEP).floor() * PRICE_STEP;
    while max_home_price + PRICE_STEP <= ceiling
        && qualifies(
            max_home_price + PRICE_STEP,
            input.down_payment,
            max_housing_cost,
            qualifying_rate,
        )
    {
        max_home_price += PRICE_STEP;
    }
    let max_mortgage = (max_home_price - input.down_payment).max(0.0);
    let monthly_payment = amortization::monthly_payment(max_mortgage, input.contract_rate);
    let monthly_property_tax = monthly_property_tax(max_home_price);

    let down_payment_percent = if max_home_price > 0.0 {
        input.down_payment / max_home_price * 100.0
    } else {
        0.0
    };
    let cmhc_premium = insurance::premium(max_mortgage, down_payment_percent);
    let total_mortgage_with_cmhc = max_mortgage + cmhc_premium.unwrap_or(0.0);

    let gds_ratio = (max_housing_cost / monthly_income * 100.0).round();
    let tds_ratio = ((max_housing_cost + input.monthly_debts) / monthly_income * 100.0).round();

    debug!(
        max_home_price,
        max_mortgage,
        stress_test_rate = qualifying_rate,
        insured = cmhc_premium.is_some(),
        "affordability solved"
    );

    Ok(AffordabilityResult {
        max_home_price,
        max_mortgage,
        down_payment_percent,
        cmhc_premium,
        total_mortgage_with_cmhc,
        monthly_payment,
        monthly_property_tax,
        monthly_heating: MONTHLY_HEATING,
        total_monthly_housing: monthly_payment + monthly_property_tax + MONTHLY_HEATING,
        stress_test_rate: qualifying_rate,
        gds_ratio,
        tds_ratio,
    })
}

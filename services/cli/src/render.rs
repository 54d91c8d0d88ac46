use lead_intel::affordability::{AffordabilityInput, AffordabilityResult};
use lead_intel::import::ImportedLead;
use lead_intel::leads::AffordabilityOutcome;

fn dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub(crate) fn render_affordability_card(
    input: &AffordabilityInput,
    result: &AffordabilityResult,
) -> String {
    let insurance = match result.cmhc_premium {
        Some(premium) => format!(
            "- CMHC premium: {} (insured total {})",
            dollars(premium),
            dollars(result.total_mortgage_with_cmhc)
        ),
        None => "- CMHC premium: none (20%+ down)".to_string(),
    };

    let lines = [
        "Affordability estimate".to_string(),
        format!(
            "Income {} / year, {} down, {} monthly debts, {:.2}% contract rate",
            dollars(input.annual_income),
            dollars(input.down_payment),
            dollars(input.monthly_debts),
            input.contract_rate
        ),
        String::new(),
        "Purchase".to_string(),
        format!("- Maximum home price: {}", dollars(result.max_home_price)),
        format!(
            "- Mortgage: {} ({:.1}% down)",
            dollars(result.max_mortgage),
            result.down_payment_percent
        ),
        insurance,
        String::new(),
        "Monthly costs".to_string(),
        format!("- Mortgage payment: {}", dollars(result.monthly_payment)),
        format!("- Property tax: {}", dollars(result.monthly_property_tax)),
        format!("- Heating: {}", dollars(result.monthly_heating)),
        format!("- Total housing: {}", dollars(result.total_monthly_housing)),
        String::new(),
        "Qualification".to_string(),
        format!("- Stress test rate: {:.2}%", result.stress_test_rate),
        format!("- GDS {:.0}% / TDS {:.0}%", result.gds_ratio, result.tds_ratio),
    ];

    let mut card = lines.join("\n");
    card.push('\n');
    card
}

pub(crate) fn render_batch_line(lead: &ImportedLead) -> String {
    let evaluation = &lead.evaluation;
    let affordability = match &evaluation.affordability {
        Some(AffordabilityOutcome::Solved(result)) => {
            format!("max {}", dollars(result.max_home_price))
        }
        Some(AffordabilityOutcome::Rejected { kind, .. }) => format!("rejected ({kind})"),
        None => "no estimate".to_string(),
    };

    format!(
        "{} | {} | {} | {}",
        lead.lead_id,
        evaluation.quality.as_str(),
        affordability,
        evaluation.tags.values().join(", ")
    )
}

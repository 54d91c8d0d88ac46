/// 25-year amortization expressed in monthly payments.
pub(crate) const AMORTIZATION_MONTHS: i32 = 25 * 12;

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Level monthly payment that retires `principal` over the amortization period.
pub(crate) fn monthly_payment(principal: f64, annual_rate_percent: f64) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    if rate <= 0.0 {
        return principal / f64::from(AMORTIZATION_MONTHS);
    }

    let growth = (1.0 + rate).powi(AMORTIZATION_MONTHS);
    principal * rate * growth / (growth - 1.0)
}

/// Largest principal a monthly payment of `payment` can carry.
pub(crate) fn supportable_principal(payment: f64, annual_rate_percent: f64) -> f64 {
    if payment <= 0.0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    if rate <= 0.0 {
        return payment * f64::from(AMORTIZATION_MONTHS);
    }

    let discount = (1.0 + rate).powi(-AMORTIZATION_MONTHS);
    payment * (1.0 - discount) / rate
}

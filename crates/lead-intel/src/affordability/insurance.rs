/// Premium rate owed on the insured mortgage for a given down-payment share.
pub(crate) fn premium_rate(down_payment_percent: f64) -> f64 {
    if down_payment_percent >= 20.0 {
        0.0
    } else if down_payment_percent >= 15.0 {
        0.028
    } else if down_payment_percent >= 10.0 {
        0.031
    } else {
        0.04
    }
}

/// Premium in dollars, or `None` when the mortgage is uninsured.
pub(crate) fn premium(mortgage: f64, down_payment_percent: f64) -> Option<f64> {
    let amount = mortgage * premium_rate(down_payment_percent);
    (amount > 0.0).then_some(amount)
}

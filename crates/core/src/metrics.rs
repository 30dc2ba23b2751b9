use crate::domain::report::MetricSet;
use crate::domain::snapshot::DailySnapshot;
use crate::error::DivisionByZeroError;

/// Derives the day-over-day metric set from two validated snapshots.
///
/// Plain f64 arithmetic, no rounding; presentation-level rounding is the
/// caller's business. A zero denominator fails with the name of the metric
/// that could not be computed, so neither Infinity nor NaN ever escapes.
pub fn compute_metrics(
    current: &DailySnapshot,
    previous: &DailySnapshot,
) -> Result<MetricSet, DivisionByZeroError> {
    let profit = current.revenue - current.cost;

    let revenue_change_percent =
        percent_change(current.revenue, previous.revenue, "revenue_change_percent")?;
    let cost_change_percent = percent_change(current.cost, previous.cost, "cost_change_percent")?;

    let cac_today = ratio(current.cost, current.customers as f64, "cac_today")?;
    let cac_yesterday = ratio(
        previous.cost,
        previous.customers as f64,
        "cac_change_percent",
    )?;
    let cac_change_percent = percent_change(cac_today, cac_yesterday, "cac_change_percent")?;

    Ok(MetricSet {
        profit,
        revenue_change_percent,
        cost_change_percent,
        cac_today,
        cac_change_percent,
    })
}

fn percent_change(
    current: f64,
    previous: f64,
    metric: &'static str,
) -> Result<f64, DivisionByZeroError> {
    if previous == 0.0 {
        return Err(DivisionByZeroError { metric });
    }
    Ok((current - previous) / previous * 100.0)
}

fn ratio(
    numerator: f64,
    denominator: f64,
    metric: &'static str,
) -> Result<f64, DivisionByZeroError> {
    if denominator == 0.0 {
        return Err(DivisionByZeroError { metric });
    }
    Ok(numerator / denominator)
}

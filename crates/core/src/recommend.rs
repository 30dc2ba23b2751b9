use crate::domain::report::{MetricSet, ProfitStatus, RecommendationReport};

pub const DECISION_REDUCE_COSTS: &str = "Reduce costs.";
pub const DECISION_REVIEW_MARKETING: &str = "Review marketing campaigns.";
pub const DECISION_INCREASE_ADVERTISING: &str = "Consider increasing advertising budget.";
pub const ALERT_CAC_SPIKE: &str = "⚠️ CAC has increased by more than 20%!";

/// Rule thresholds, in percent. The defaults are part of the contract;
/// overrides exist for experimentation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// CAC growth above this triggers the marketing-review decision and the
    /// CAC-spike alert.
    pub cac_spike_percent: f64,

    /// Revenue growth above this triggers the advertising decision.
    pub revenue_growth_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cac_spike_percent: 20.0,
            revenue_growth_percent: 5.0,
        }
    }
}

impl Thresholds {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Ok(s) = std::env::var("CAC_SPIKE_THRESHOLD_PERCENT") {
            if let Ok(n) = s.parse::<f64>() {
                out.cac_spike_percent = n;
            }
        }

        if let Ok(s) = std::env::var("REVENUE_GROWTH_THRESHOLD_PERCENT") {
            if let Ok(n) = s.parse::<f64>() {
                out.revenue_growth_percent = n;
            }
        }

        out
    }
}

pub fn recommend(metrics: &MetricSet) -> RecommendationReport {
    recommend_with(metrics, Thresholds::default())
}

/// Applies the threshold rules to a metric set. Decisions are appended in
/// fixed rule order (costs, marketing, advertising) no matter which rules
/// fire; alerts are evaluated independently of decisions.
pub fn recommend_with(metrics: &MetricSet, thresholds: Thresholds) -> RecommendationReport {
    let mut decisions = Vec::new();
    if metrics.profit < 0.0 {
        decisions.push(DECISION_REDUCE_COSTS.to_string());
    }
    if metrics.cac_change_percent > thresholds.cac_spike_percent {
        decisions.push(DECISION_REVIEW_MARKETING.to_string());
    }
    if metrics.revenue_change_percent > thresholds.revenue_growth_percent {
        decisions.push(DECISION_INCREASE_ADVERTISING.to_string());
    }

    let mut alerts = Vec::new();
    if metrics.cac_change_percent > thresholds.cac_spike_percent {
        alerts.push(ALERT_CAC_SPIKE.to_string());
    }

    // Zero profit counts as Profit.
    let profit_status = if metrics.profit >= 0.0 {
        ProfitStatus::Profit
    } else {
        ProfitStatus::Loss
    };

    RecommendationReport {
        profit_status,
        alerts,
        decisions,
    }
}

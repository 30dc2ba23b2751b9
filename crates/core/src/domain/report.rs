use serde::{Deserialize, Serialize};

/// Metrics derived from the two validated snapshots. Percentages are
/// pre-multiplied by 100 (12.5 means 12.5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub profit: f64,
    pub revenue_change_percent: f64,
    pub cost_change_percent: f64,
    pub cac_today: f64,
    pub cac_change_percent: f64,
}

/// Serializes as "Profit" / "Loss". Zero profit counts as Profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitStatus {
    Profit,
    Loss,
}

/// Output of the recommendation stage. `alerts` and `decisions` keep rule
/// evaluation order, not severity order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub profit_status: ProfitStatus,
    pub alerts: Vec<String>,
    pub decisions: Vec<String>,
}

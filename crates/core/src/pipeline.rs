use crate::domain::contract::RawSnapshot;
use crate::domain::report::{MetricSet, RecommendationReport};
use crate::domain::snapshot::{DailySnapshot, SnapshotSide};
use crate::error::PipelineError;
use crate::recommend::Thresholds;
use crate::{metrics, recommend};
use serde::{Deserialize, Serialize};

/// A business record as submitted by the caller, before validation.
/// Tolerates extra keys (the upstream format carries empty `metrics` and
/// `recommendations` placeholders).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessInput {
    pub current_day: RawSnapshot,
    pub previous_day: RawSnapshot,
}

/// Record after the validator stage: both snapshots type-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedRecord {
    pub current_day: DailySnapshot,
    pub previous_day: DailySnapshot,
}

/// Record after the metric stage. Carrying the metrics in a new type
/// (rather than an optional field) keeps "metrics exist iff the record
/// passed the calculator" true by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalyzedRecord {
    pub current_day: DailySnapshot,
    pub previous_day: DailySnapshot,
    pub metrics: MetricSet,
}

/// Final record, after the recommendation stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessReport {
    pub current_day: DailySnapshot,
    pub previous_day: DailySnapshot,
    pub metrics: MetricSet,
    pub recommendations: RecommendationReport,
}

impl BusinessInput {
    /// Stage 1: snapshot validation.
    pub fn validate(self) -> Result<ValidatedRecord, PipelineError> {
        let current_day = self
            .current_day
            .validate_and_into_snapshot(SnapshotSide::CurrentDay)?;
        let previous_day = self
            .previous_day
            .validate_and_into_snapshot(SnapshotSide::PreviousDay)?;

        tracing::debug!(?current_day, ?previous_day, "snapshots validated");
        Ok(ValidatedRecord {
            current_day,
            previous_day,
        })
    }
}

impl ValidatedRecord {
    /// Stage 2: metric calculation.
    pub fn analyze(self) -> Result<AnalyzedRecord, PipelineError> {
        let metrics = metrics::compute_metrics(&self.current_day, &self.previous_day)?;
        tracing::debug!(profit = metrics.profit, "metrics computed");
        Ok(AnalyzedRecord {
            current_day: self.current_day,
            previous_day: self.previous_day,
            metrics,
        })
    }
}

impl AnalyzedRecord {
    /// Stage 3: rule-based recommendations.
    pub fn recommend(self, thresholds: Thresholds) -> BusinessReport {
        let recommendations = recommend::recommend_with(&self.metrics, thresholds);
        tracing::debug!(
            decisions = recommendations.decisions.len(),
            alerts = recommendations.alerts.len(),
            "recommendations produced"
        );
        BusinessReport {
            current_day: self.current_day,
            previous_day: self.previous_day,
            metrics: self.metrics,
            recommendations,
        }
    }
}

/// Runs the three stages in order with default thresholds. Stateless;
/// every invocation is independent and safe to run concurrently.
pub fn run(input: BusinessInput) -> Result<BusinessReport, PipelineError> {
    run_with(input, Thresholds::default())
}

pub fn run_with(
    input: BusinessInput,
    thresholds: Thresholds,
) -> Result<BusinessReport, PipelineError> {
    Ok(input.validate()?.analyze()?.recommend(thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ProfitStatus;
    use crate::error::ValidationError;
    use crate::recommend::{
        ALERT_CAC_SPIKE, DECISION_INCREASE_ADVERTISING, DECISION_REDUCE_COSTS,
        DECISION_REVIEW_MARKETING,
    };
    use serde_json::json;

    fn input(value: serde_json::Value) -> BusinessInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn losing_day_yields_loss_and_cost_cut() {
        // Includes the upstream placeholders to show they are tolerated.
        let report = run(input(json!({
            "current_day": {"revenue": 1200, "cost": 1300, "customers": 40},
            "previous_day": {"revenue": 1500, "cost": 1000, "customers": 50},
            "metrics": {},
            "recommendations": {},
        })))
        .unwrap();

        assert_eq!(report.metrics.profit, -100.0);
        assert_eq!(report.recommendations.profit_status, ProfitStatus::Loss);
        assert!(report
            .recommendations
            .decisions
            .contains(&DECISION_REDUCE_COSTS.to_string()));
        // CAC went from 20.0 to 32.5 (+62.5%), so the spike rules fire too.
        assert!(report
            .recommendations
            .alerts
            .contains(&ALERT_CAC_SPIKE.to_string()));
    }

    #[test]
    fn growing_day_suggests_more_advertising_only() {
        let report = run(input(json!({
            "current_day": {"revenue": 1000, "cost": 500, "customers": 100},
            "previous_day": {"revenue": 900, "cost": 480, "customers": 100},
        })))
        .unwrap();

        assert_eq!(report.recommendations.profit_status, ProfitStatus::Profit);
        assert_eq!(
            report.recommendations.decisions,
            vec![DECISION_INCREASE_ADVERTISING.to_string()]
        );
        assert!(report.recommendations.alerts.is_empty());
    }

    #[test]
    fn cac_jump_triggers_alert_and_marketing_review() {
        // CAC 4.0 -> 5.0 is a 25% jump.
        let report = run(input(json!({
            "current_day": {"revenue": 1000, "cost": 500, "customers": 100},
            "previous_day": {"revenue": 1000, "cost": 400, "customers": 100},
        })))
        .unwrap();

        assert_eq!(
            report.recommendations.alerts,
            vec![ALERT_CAC_SPIKE.to_string()]
        );
        assert!(report
            .recommendations
            .decisions
            .contains(&DECISION_REVIEW_MARKETING.to_string()));
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let payload = json!({
            "current_day": {"revenue": 1200, "cost": 1300, "customers": 40},
            "previous_day": {"revenue": 1500, "cost": 1000, "customers": 50},
        });

        let first = serde_json::to_string(&run(input(payload.clone())).unwrap()).unwrap();
        let second = serde_json::to_string(&run(input(payload)).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_field_is_attributed_to_its_snapshot() {
        let err = run(input(json!({
            "current_day": {"revenue": 1200, "cost": 1300, "customers": 40},
            "previous_day": {"revenue": 1500, "cost": 1000},
        })))
        .unwrap_err();

        assert_eq!(
            err,
            PipelineError::Validation(ValidationError::MissingField {
                snapshot: SnapshotSide::PreviousDay,
                field: "customers",
            })
        );
    }

    #[test]
    fn zero_denominator_fails_instead_of_producing_infinity() {
        let err = run(input(json!({
            "current_day": {"revenue": 1200, "cost": 1300, "customers": 40},
            "previous_day": {"revenue": 1500, "cost": 1000, "customers": 0},
        })))
        .unwrap_err();

        match err {
            PipelineError::DivisionByZero(e) => assert_eq!(e.metric, "cac_change_percent"),
            other => panic!("expected division-by-zero error, got {other:?}"),
        }
    }

    #[test]
    fn report_serializes_with_string_profit_status() {
        let report = run(input(json!({
            "current_day": {"revenue": 1000, "cost": 500, "customers": 100},
            "previous_day": {"revenue": 1000, "cost": 500, "customers": 100},
        })))
        .unwrap();

        let value = serde_json::to_value(&report.recommendations).unwrap();
        assert_eq!(value["profit_status"], json!("Profit"));
        assert_eq!(value["alerts"], json!([]));
        assert_eq!(value["decisions"], json!([]));
    }
}

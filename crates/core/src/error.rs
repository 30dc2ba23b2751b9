use crate::domain::snapshot::SnapshotSide;
use thiserror::Error;

/// A raw snapshot field that is missing or carries the wrong shape. Each
/// variant names the snapshot side and the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{snapshot}: missing required field '{field}'")]
    MissingField {
        snapshot: SnapshotSide,
        field: &'static str,
    },
    #[error("{snapshot}: field '{field}' must be a number")]
    NotANumber {
        snapshot: SnapshotSide,
        field: &'static str,
    },
    #[error("{snapshot}: field '{field}' must be finite")]
    NonFinite {
        snapshot: SnapshotSide,
        field: &'static str,
    },
    #[error("{snapshot}: field '{field}' must be a whole number")]
    NotAnInteger {
        snapshot: SnapshotSide,
        field: &'static str,
    },
}

/// A metric whose denominator was zero. The caller gets the metric name
/// instead of an Infinity/NaN value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot compute {metric}: denominator is zero")]
pub struct DivisionByZeroError {
    pub metric: &'static str,
}

/// Top-level error for a pipeline run. The core never catches these; the
/// surrounding cli/api layer is the single place that reports them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZeroError),
}

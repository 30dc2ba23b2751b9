use serde::{Deserialize, Serialize};
use std::fmt;

/// One day's business figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub revenue: f64,
    pub cost: f64,
    pub customers: i64,
}

/// Which side of the day-over-day comparison a snapshot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    CurrentDay,
    PreviousDay,
}

impl SnapshotSide {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotSide::CurrentDay => "current_day",
            SnapshotSide::PreviousDay => "previous_day",
        }
    }
}

impl fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

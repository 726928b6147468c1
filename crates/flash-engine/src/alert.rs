//! Negative-sentiment alert trigger and KPI grading, evaluated by callers
//! after a run.

use flash_core::KpiThresholds;
use serde::Serialize;

use crate::types::KpiSummary;

/// A crisis alert raised when negative sentiment crosses the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub message: String,
    /// Combined `negative` + `anger` percentage that triggered the alert.
    pub negative_pct: f64,
    pub urgency: u8,
    pub impact: u8,
}

/// Raise an alert when `negative% + anger%` strictly exceeds `threshold_pct`.
#[must_use]
pub fn evaluate_alert(summary: &KpiSummary, brand: &str, threshold_pct: f64) -> Option<Alert> {
    let negative_pct = summary.negative_pct();
    if negative_pct <= threshold_pct {
        return None;
    }
    Some(Alert {
        message: format!("High negative sentiment ({negative_pct:.1}%) detected for {brand}."),
        negative_pct,
        urgency: 1,
        impact: 1,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Bad,
}

impl Grade {
    fn at_least<T: PartialOrd>(value: T, threshold: T) -> Self {
        if value >= threshold {
            Grade::Good
        } else {
            Grade::Bad
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::Good => write!(f, "good"),
            Grade::Bad => write!(f, "bad"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KpiGrades {
    pub mis: Grade,
    pub mpi: Grade,
    pub engagement: Grade,
    pub reach: Grade,
}

/// Grade the headline KPIs; a value at or above its threshold is good.
#[must_use]
pub fn grade(summary: &KpiSummary, thresholds: &KpiThresholds) -> KpiGrades {
    KpiGrades {
        mis: Grade::at_least(summary.mis, thresholds.mis_good),
        mpi: Grade::at_least(summary.mpi, thresholds.mpi_good),
        engagement: Grade::at_least(summary.engagement_rate, thresholds.engagement_good),
        reach: Grade::at_least(summary.reach, thresholds.reach_good),
    }
}

//! Cross-session aggregation.

use serde::{Deserialize, Serialize};
use ta_core::{mean, population_std_dev};

use crate::metrics::AlignmentMetrics;

/// Mean and spread of one optional timing metric across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimingStat {
    /// No session produced a value.
    Unavailable,
    Available {
        count: usize,
        mean_s: f64,
        std_dev_s: f64,
    },
}

impl TimingStat {
    /// Aggregate the values that are present; `None` entries are skipped.
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let present: Vec<f64> = values.into_iter().flatten().collect();
        match (mean(&present), population_std_dev(&present)) {
            (Some(mean_s), Some(std_dev_s)) => Self::Available {
                count: present.len(),
                mean_s,
                std_dev_s,
            },
            _ => Self::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_count: usize,
    pub success_count: usize,
    /// `None` when there are no sessions
    pub success_rate_pct: Option<f64>,
    pub alignment_time: TimingStat,
    pub settling_time: TimingStat,
}

/// Reduce per-session metrics to summary statistics. Never fails.
pub fn summarize<'a>(metrics: impl IntoIterator<Item = &'a AlignmentMetrics>) -> SessionSummary {
    let metrics: Vec<&AlignmentMetrics> = metrics.into_iter().collect();
    let session_count = metrics.len();
    let success_count = metrics.iter().filter(|m| m.success).count();
    let success_rate_pct = if session_count == 0 {
        None
    } else {
        Some(success_count as f64 / session_count as f64 * 100.0)
    };

    SessionSummary {
        session_count,
        success_count,
        success_rate_pct,
        alignment_time: TimingStat::from_values(metrics.iter().map(|m| m.alignment_time_s)),
        settling_time: TimingStat::from_values(metrics.iter().map(|m| m.settling_time_s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(success: bool, alignment: Option<f64>, settling: Option<f64>) -> AlignmentMetrics {
        AlignmentMetrics {
            success,
            alignment_time_s: alignment,
            settling_time_s: settling,
            ..Default::default()
        }
    }

    #[test]
    fn empty_list() {
        let s = summarize(&[] as &[AlignmentMetrics]);
        assert_eq!(s.session_count, 0);
        assert_eq!(s.success_rate_pct, None);
        assert_eq!(s.alignment_time, TimingStat::Unavailable);
        assert_eq!(s.settling_time, TimingStat::Unavailable);
    }

    #[test]
    fn unavailable_timing_still_reports_success_rate() {
        let all = [metrics(false, None, None), metrics(false, None, None)];
        let s = summarize(&all);
        assert_eq!(s.success_rate_pct, Some(0.0));
        assert!(!s.alignment_time.is_available());
    }

    #[test]
    fn mean_and_population_std() {
        let all = [
            metrics(true, Some(1.0), Some(2.0)),
            metrics(true, Some(3.0), None),
            metrics(false, None, Some(0.0)),
            metrics(true, Some(2.0), None),
        ];
        let s = summarize(&all);
        assert_eq!(s.success_count, 3);
        assert!((s.success_rate_pct.unwrap() - 75.0).abs() < 1e-12);

        let TimingStat::Available {
            count,
            mean_s,
            std_dev_s,
        } = s.alignment_time
        else {
            panic!("alignment time should be available");
        };
        assert_eq!(count, 3);
        assert!((mean_s - 2.0).abs() < 1e-12);
        assert!((std_dev_s - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);

        // a zero settling time is a value, not a gap
        let TimingStat::Available { count, mean_s, .. } = s.settling_time else {
            panic!("settling time should be available");
        };
        assert_eq!(count, 2);
        assert!((mean_s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn timing_stat_serializes_with_status_tag() {
        let json = serde_json::to_value(TimingStat::Unavailable).unwrap();
        assert_eq!(json["status"], "unavailable");
        let json = serde_json::to_value(TimingStat::from_values([Some(1.5)])).unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["count"], 1);
        assert_eq!(json["std_dev_s"], 0.0);
    }
}

//! Export data types.
//!
//! The report is a flat, by-name projection of the analysis. Absent metrics
//! serialize as `null`, never as `0`.

use serde::{Deserialize, Serialize};
use ta_analysis::{Analysis, AlignmentSession, SessionEnd, SessionSignals, SessionSummary};
use ta_config::AlignModel;
use ta_core::AxisValues;

pub type ReportId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub report_id: ReportId,
    pub log_file: String,
    pub model: AlignModel,
    pub generated_at: String,
    pub tool_version: String,
}

impl ReportManifest {
    /// Stamp a manifest with the current time and this crate's version.
    pub fn new(report_id: ReportId, log_file: impl Into<String>, model: AlignModel) -> Self {
        Self {
            report_id,
            log_file: log_file.into(),
            model,
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One session, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// 1-based, in log order
    pub session_num: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub end_reason: SessionEnd,
    pub success: bool,
    pub alignment_time: Option<f64>,
    pub settling_time: Option<f64>,
    pub target_id: Option<i64>,
    pub final_errors: AxisValues<Option<f64>>,
    pub peak_errors: AxisValues<f64>,
    pub overshoot: AxisValues<f64>,
    pub oscillations: AxisValues<usize>,
    pub avg_speeds: AxisValues<f64>,
    pub target_lost_count: usize,
}

impl SessionRecord {
    pub fn from_session(session_num: usize, session: &AlignmentSession) -> Self {
        let m = &session.metrics;
        Self {
            session_num,
            start_time: session.start_time,
            end_time: session.end_time,
            duration: session.duration(),
            end_reason: session.end_reason(),
            success: m.success,
            alignment_time: m.alignment_time_s,
            settling_time: m.settling_time_s,
            target_id: m.target_id,
            final_errors: m.final_error,
            peak_errors: m.max_error,
            overshoot: m.overshoot_pct,
            oscillations: m.oscillations,
            avg_speeds: m.avg_speed,
            target_lost_count: m.target_lost_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub manifest: ReportManifest,
    pub sessions: Vec<SessionRecord>,
    pub summary: SessionSummary,
}

impl AnalysisReport {
    pub fn from_analysis(manifest: ReportManifest, analysis: &Analysis) -> Self {
        let sessions = analysis
            .sessions()
            .iter()
            .enumerate()
            .map(|(i, s)| SessionRecord::from_session(i + 1, s))
            .collect();
        Self {
            manifest,
            sessions,
            summary: analysis.summary.clone(),
        }
    }
}

/// One row of a session's resampled series CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub t: f64,
    pub forward_error: f64,
    pub lateral_error: f64,
    pub rotation_error: f64,
    pub forward_speed: f64,
    pub lateral_speed: f64,
    pub rotation_speed: f64,
    pub has_target: bool,
    pub aligned: bool,
}

impl SeriesRow {
    pub fn rows(signals: &SessionSignals) -> Vec<SeriesRow> {
        (0..signals.len())
            .map(|i| SeriesRow {
                t: signals.t[i],
                forward_error: signals.error.forward[i],
                lateral_error: signals.error.lateral[i],
                rotation_error: signals.error.rotation[i],
                forward_speed: signals.speed.forward[i],
                lateral_speed: signals.speed.lateral[i],
                rotation_speed: signals.speed.rotation[i],
                has_target: signals.has_target[i],
                aligned: signals.aligned[i],
            })
            .collect()
    }
}

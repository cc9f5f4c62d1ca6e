//! Per-session signal extraction.

use serde::{Deserialize, Serialize};
use ta_config::AnalysisConfig;
use ta_core::{Axis, AxisValues, Channel, Tolerances, at_least};

use crate::bound::BoundChannels;
use crate::metrics::{AlignmentMetrics, compute_metrics, dominant_tag_id};
use crate::resample::{resample_bool_window, resample_window};
use crate::segment::{SessionEnd, SessionSpan};

/// Resampled signals of one session on a shared, session-relative clock.
///
/// Every array has the same length as `t`, and `t[0] == 0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSignals {
    pub t: Vec<f64>,
    pub error: AxisValues<Vec<f64>>,
    pub speed: AxisValues<Vec<f64>>,
    pub has_target: Vec<bool>,
    pub aligned: Vec<bool>,
}

impl SessionSignals {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// One scored alignment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSession {
    /// Absolute log time of the opening status sample (s)
    pub start_time: f64,
    /// Absolute log time of the closing status sample (s)
    pub end_time: f64,
    /// Absolute log time that `signals.t` is measured from (s)
    pub time_origin: f64,
    pub span: SessionSpan,
    pub signals: SessionSignals,
    pub metrics: AlignmentMetrics,
}

impl AlignmentSession {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn end_reason(&self) -> SessionEnd {
        self.span.end
    }
}

/// Why a span did not produce a session. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionRejected {
    TooShort { duration: f64 },
    NoReferenceSamples,
}

/// Extract, resample and score the session bounded by `span`.
///
/// `status_times` are the status channel timestamps the span indexes into.
pub fn extract_session(
    span: SessionSpan,
    status_times: &[f64],
    channels: &BoundChannels,
    config: &AnalysisConfig,
) -> Result<AlignmentSession, SessionRejected> {
    let start_time = status_times[span.start_idx];
    let end_time = status_times[span.end_idx];
    let duration = end_time - start_time;

    if !at_least(
        duration,
        config.segmentation.min_duration_s,
        Tolerances::default(),
    ) {
        return Err(SessionRejected::TooShort { duration });
    }

    let reference = reference_channel(channels, start_time, end_time)
        .ok_or(SessionRejected::NoReferenceSamples)?;
    let (ref_times, _) = reference.window(start_time, end_time);
    let dest = ref_times.to_vec();
    let time_origin = dest[0];

    let threshold = config.signals.boolean_threshold;
    let signals = SessionSignals {
        t: dest.iter().map(|t| t - time_origin).collect(),
        error: AxisValues::from_fn(|axis| {
            resample_window(channels.error_channel(axis), start_time, end_time, &dest)
        }),
        speed: AxisValues::from_fn(|axis| {
            resample_window(channels.speed_channel(axis), start_time, end_time, &dest)
        }),
        has_target: resample_bool_window(
            channels.has_target.as_ref(),
            start_time,
            end_time,
            &dest,
            threshold,
        ),
        aligned: resample_bool_window(
            channels.fully_aligned.as_ref(),
            start_time,
            end_time,
            &dest,
            threshold,
        ),
    };

    let mut metrics = compute_metrics(&signals, config);
    metrics.target_id = channels
        .tag_id
        .as_ref()
        .and_then(|ch| dominant_tag_id(ch.window(start_time, end_time).1));

    Ok(AlignmentSession {
        start_time,
        end_time,
        time_origin,
        span,
        signals,
        metrics,
    })
}

/// Forward or rotation error channel with the most samples in the window.
///
/// Ties prefer forward error. `None` when neither has samples in the window.
fn reference_channel(channels: &BoundChannels, start: f64, end: f64) -> Option<&Channel<f64>> {
    let count = |axis: Axis| {
        channels
            .error_channel(axis)
            .map(|ch| (ch, ch.count_in(start, end)))
            .filter(|(_, n)| *n > 0)
    };
    match (count(Axis::Forward), count(Axis::Rotation)) {
        (Some((fwd, nf)), Some((rot, nr))) => Some(if nr > nf { rot } else { fwd }),
        (Some((fwd, _)), None) => Some(fwd),
        (None, Some((rot, _))) => Some(rot),
        (None, None) => None,
    }
}

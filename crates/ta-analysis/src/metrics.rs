//! Alignment performance metrics.
//!
//! Computes timing (alignment and settling time), accuracy (final and peak
//! error), stability (overshoot and zero crossings), control effort (mean
//! absolute speed) and target tracking metrics from one session's resampled
//! signals. Each metric is a standalone function over the arrays it needs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ta_config::{AnalysisConfig, SettlingConfig};
use ta_core::{AxisValues, Tolerances, at_least};

use crate::session::SessionSignals;

/// Metrics for a single alignment attempt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentMetrics {
    /// Fully-aligned flag was set at least once
    pub success: bool,
    /// Time of the first fully-aligned sample (s)
    pub alignment_time_s: Option<f64>,
    /// Time the errors entered tolerance for good (s)
    pub settling_time_s: Option<f64>,
    /// Error at the last sample (m, m, deg)
    pub final_error: AxisValues<Option<f64>>,
    /// Peak absolute error (m, m, deg)
    pub max_error: AxisValues<f64>,
    /// Swing past zero relative to the initial error (%)
    pub overshoot_pct: AxisValues<f64>,
    /// Sign changes between consecutive samples
    pub oscillations: AxisValues<usize>,
    /// Mean absolute commanded speed (m/s, m/s, rad/s)
    pub avg_speed: AxisValues<f64>,
    /// Number of times the target dropped out of view
    pub target_lost_count: usize,
    /// Most frequently observed tag id during the session
    pub target_id: Option<i64>,
}

/// Compute every signal-derived metric for one session.
///
/// `target_id` comes from the raw tag channel rather than the resampled
/// signals and is left `None` here.
pub fn compute_metrics(signals: &SessionSignals, config: &AnalysisConfig) -> AlignmentMetrics {
    let guard = config.signals.overshoot_guard;
    AlignmentMetrics {
        success: any_true(&signals.aligned),
        alignment_time_s: first_true_time(&signals.t, &signals.aligned),
        settling_time_s: settling_time(
            &signals.t,
            &signals.error.forward,
            &signals.error.lateral,
            &signals.error.rotation,
            &config.settling,
        ),
        final_error: signals.error.map(|e| final_value(e)),
        max_error: signals.error.map(|e| max_abs(e)),
        overshoot_pct: signals.error.map(|e| overshoot_pct(e, guard)),
        oscillations: signals.error.map(|e| count_zero_crossings(e)),
        avg_speed: signals.speed.map(|s| mean_abs(s)),
        target_lost_count: count_target_losses(&signals.has_target),
        target_id: None,
    }
}

pub fn any_true(flags: &[bool]) -> bool {
    flags.iter().any(|f| *f)
}

/// Timestamp of the first `true` flag.
pub fn first_true_time(t: &[f64], flags: &[bool]) -> Option<f64> {
    t.iter().zip(flags).find(|(_, f)| **f).map(|(t, _)| *t)
}

/// Earliest time after which every error stays strictly inside its tolerance.
///
/// A candidate qualifies only when all of its later samples are in tolerance
/// and the data continues for at least `hold_s` past it. Because later samples
/// must all be in tolerance, the candidate is the start of the in-tolerance
/// suffix; the hold check then applies to that single point.
pub fn settling_time(
    t: &[f64],
    forward: &[f64],
    lateral: &[f64],
    rotation: &[f64],
    config: &SettlingConfig,
) -> Option<f64> {
    let n = t.len().min(forward.len()).min(lateral.len()).min(rotation.len());
    if n == 0 {
        return None;
    }
    let within = |i: usize| {
        forward[i].abs() < config.forward_tol_m
            && lateral[i].abs() < config.lateral_tol_m
            && rotation[i].abs() < config.rotation_tol_deg
    };

    let mut suffix_start = n;
    while suffix_start > 0 && within(suffix_start - 1) {
        suffix_start -= 1;
    }
    if suffix_start == n {
        return None;
    }

    let t0 = t[suffix_start];
    if at_least(t[n - 1] - t0, config.hold_s, Tolerances::default()) {
        Some(t0)
    } else {
        None
    }
}

pub fn final_value(signal: &[f64]) -> Option<f64> {
    signal.last().copied()
}

/// Largest absolute value; `0.0` for an empty signal.
pub fn max_abs(signal: &[f64]) -> f64 {
    signal.iter().map(|v| v.abs()).fold(0.0, f64::max)
}

/// Mean absolute value; `0.0` for an empty signal.
pub fn mean_abs(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|v| v.abs()).sum::<f64>() / signal.len() as f64
}

/// Overshoot past zero as a percentage of the initial error.
///
/// Returns `0.0` for fewer than two samples or an initial error below `guard`.
pub fn overshoot_pct(signal: &[f64], guard: f64) -> f64 {
    if signal.len() < 2 {
        return 0.0;
    }
    let initial = signal[0];
    if !(initial.abs() >= guard) || initial == 0.0 {
        return 0.0;
    }

    let swing = if initial > 0.0 {
        -signal.iter().copied().fold(f64::INFINITY, f64::min)
    } else {
        signal.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };
    swing.max(0.0) / initial.abs() * 100.0
}

/// `-1`, `0` or `1`. Zero and NaN share the zero bucket.
fn sign_bucket(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Number of adjacent sample pairs whose sign bucket differs.
pub fn count_zero_crossings(signal: &[f64]) -> usize {
    signal
        .windows(2)
        .filter(|w| sign_bucket(w[0]) != sign_bucket(w[1]))
        .count()
}

/// Number of `true -> false` transitions of the target-visible flag.
pub fn count_target_losses(has_target: &[bool]) -> usize {
    has_target.windows(2).filter(|w| w[0] && !w[1]).count()
}

/// Most frequent non-negative integral tag id; ties go to the lower id.
pub fn dominant_tag_id(values: &[f64]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        if v.is_finite() && *v >= 0.0 && v.fract() == 0.0 {
            *counts.entry(*v as i64).or_default() += 1;
        }
    }
    let mut best: Option<(i64, usize)> = None;
    for (id, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settling_config() -> SettlingConfig {
        SettlingConfig::default()
    }

    /// 0.1 s grid from 0.0 to 2.0 inclusive.
    fn grid() -> Vec<f64> {
        (0..=20).map(|i| i as f64 * 0.1).collect()
    }

    #[test]
    fn overshoot_below_guard_is_zero() {
        assert_eq!(overshoot_pct(&[0.0005, 0.2, -0.3], 0.001), 0.0);
    }

    #[test]
    fn overshoot_positive_start() {
        let pct = overshoot_pct(&[1.0, 0.5, -0.3, 0.1], 0.001);
        assert!((pct - 30.0).abs() < 1e-9, "overshoot {pct}");
    }

    #[test]
    fn overshoot_negative_start() {
        let pct = overshoot_pct(&[-2.0, -1.0, 0.5, 0.0], 0.001);
        assert!((pct - 25.0).abs() < 1e-9, "overshoot {pct}");
    }

    #[test]
    fn overshoot_without_crossing_is_zero() {
        assert_eq!(overshoot_pct(&[1.0, 0.6, 0.2, 0.05], 0.001), 0.0);
        assert_eq!(overshoot_pct(&[-1.0, -0.5], 0.001), 0.0);
    }

    #[test]
    fn overshoot_degenerate_inputs() {
        assert_eq!(overshoot_pct(&[], 0.001), 0.0);
        assert_eq!(overshoot_pct(&[5.0], 0.001), 0.0);
        assert_eq!(overshoot_pct(&[f64::NAN, 1.0], 0.001), 0.0);
        assert_eq!(overshoot_pct(&[0.0, 1.0], 0.0), 0.0);
    }

    #[test]
    fn zero_crossings_alternating() {
        assert_eq!(count_zero_crossings(&[1.0, -1.0, 1.0, -1.0]), 3);
    }

    #[test]
    fn zero_crossings_through_zero_bucket() {
        // 1 -> 0 and 0 -> -1 are both bucket changes
        assert_eq!(count_zero_crossings(&[1.0, 0.0, -1.0]), 2);
        assert_eq!(count_zero_crossings(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(count_zero_crossings(&[0.5]), 0);
        assert_eq!(count_zero_crossings(&[]), 0);
    }

    #[test]
    fn negative_zero_is_zero_bucket() {
        assert_eq!(count_zero_crossings(&[0.0, -0.0]), 0);
    }

    #[test]
    fn target_losses() {
        assert_eq!(
            count_target_losses(&[true, true, false, false, true, false]),
            2
        );
        assert_eq!(count_target_losses(&[false, true]), 0);
        assert_eq!(count_target_losses(&[true]), 0);
    }

    #[test]
    fn peak_final_and_mean() {
        assert_eq!(max_abs(&[0.2, -0.7, 0.5]), 0.7);
        assert_eq!(max_abs(&[]), 0.0);
        assert_eq!(final_value(&[0.2, -0.7, 0.5]), Some(0.5));
        assert_eq!(final_value(&[]), None);
        assert!((mean_abs(&[1.0, -3.0]) - 2.0).abs() < 1e-12);
        assert_eq!(mean_abs(&[]), 0.0);
    }

    #[test]
    fn alignment_time_is_first_aligned_sample() {
        let t = [0.0, 0.1, 0.2, 0.3];
        assert_eq!(first_true_time(&t, &[false, false, true, false]), Some(0.2));
        assert_eq!(first_true_time(&t, &[false; 4]), None);
        assert!(!any_true(&[false; 4]));
    }

    #[test]
    fn settles_when_errors_stay_in_tolerance() {
        let t = grid();
        let fwd: Vec<f64> = t.iter().map(|x| if *x < 0.95 { 0.5 } else { 0.0 }).collect();
        let lat = vec![0.0; t.len()];
        let rot: Vec<f64> = t.iter().map(|x| if *x < 0.95 { 10.0 } else { 0.0 }).collect();

        let settle = settling_time(&t, &fwd, &lat, &rot, &settling_config()).unwrap();
        assert!((settle - 1.0).abs() < 1e-9, "settling {settle}");
    }

    #[test]
    fn late_excursion_prevents_settling() {
        let t = grid();
        let fwd: Vec<f64> = t
            .iter()
            .map(|x| if *x < 0.95 || (*x > 1.75 && *x < 1.85) { 0.5 } else { 0.0 })
            .collect();
        let zeros = vec![0.0; t.len()];

        assert_eq!(settling_time(&t, &fwd, &zeros, &zeros, &settling_config()), None);
    }

    #[test]
    fn late_excursion_with_long_tail_settles_after_it() {
        // 0.1 s grid to 3.0 s, excursion at 1.8 s
        let t: Vec<f64> = (0..=30).map(|i| i as f64 * 0.1).collect();
        let fwd: Vec<f64> = t
            .iter()
            .map(|x| if *x < 0.95 || (*x > 1.75 && *x < 1.85) { 0.5 } else { 0.0 })
            .collect();
        let zeros = vec![0.0; t.len()];

        let settle = settling_time(&t, &fwd, &zeros, &zeros, &settling_config()).unwrap();
        assert!((settle - 1.9).abs() < 1e-9, "settling {settle}");
    }

    #[test]
    fn tolerance_is_strict() {
        let t = grid();
        let lat = vec![0.05; t.len()];
        let zeros = vec![0.0; t.len()];
        assert_eq!(settling_time(&t, &zeros, &lat, &zeros, &settling_config()), None);
    }

    #[test]
    fn settling_needs_hold_duration_of_data() {
        let t = [0.0, 0.1, 0.2, 0.3];
        let zeros = [0.0; 4];
        assert_eq!(settling_time(&t, &zeros, &zeros, &zeros, &settling_config()), None);

        let mut config = settling_config();
        config.hold_s = 0.3;
        assert_eq!(settling_time(&t, &zeros, &zeros, &zeros, &config), Some(0.0));
    }

    #[test]
    fn settling_on_empty_signals() {
        assert_eq!(settling_time(&[], &[], &[], &[], &settling_config()), None);
    }

    #[test]
    fn nan_error_is_out_of_tolerance() {
        let t = grid();
        let mut fwd = vec![0.0; t.len()];
        fwd[15] = f64::NAN;
        let zeros = vec![0.0; t.len()];
        assert_eq!(settling_time(&t, &fwd, &zeros, &zeros, &settling_config()), None);
    }

    #[test]
    fn tag_id_selection() {
        assert_eq!(dominant_tag_id(&[]), None);
        assert_eq!(dominant_tag_id(&[-1.0, -1.0]), None);
        assert_eq!(dominant_tag_id(&[4.0, 9.0, 9.0, 4.0]), Some(4));
        assert_eq!(dominant_tag_id(&[4.0, 9.0, 9.0]), Some(9));
        assert_eq!(dominant_tag_id(&[2.5, 3.0]), Some(3));
    }

    #[test]
    fn metrics_for_absent_signals() {
        let signals = SessionSignals {
            t: vec![0.0, 0.1, 0.2],
            error: AxisValues::new(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]),
            speed: AxisValues::new(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]),
            has_target: vec![false; 3],
            aligned: vec![false; 3],
        };
        let m = compute_metrics(&signals, &AnalysisConfig::default());
        assert!(!m.success);
        assert_eq!(m.alignment_time_s, None);
        assert_eq!(m.final_error.forward, Some(0.0));
        assert_eq!(m.max_error.rotation, 0.0);
        assert_eq!(m.overshoot_pct.lateral, 0.0);
        assert_eq!(m.oscillations.forward, 0);
        assert_eq!(m.avg_speed.rotation, 0.0);
        assert_eq!(m.target_lost_count, 0);
        assert_eq!(m.target_id, None);
    }

    #[test]
    fn metrics_are_per_axis() {
        let signals = SessionSignals {
            t: vec![0.0, 0.1, 0.2, 0.3],
            error: AxisValues::new(
                vec![1.0, 0.5, -0.3, 0.1],
                vec![0.0, 0.0, 0.0, 0.0],
                vec![-4.0, -2.0, 1.0, -1.0],
            ),
            speed: AxisValues::new(
                vec![0.5, 0.5, -0.5, 0.5],
                vec![0.0; 4],
                vec![1.0, 2.0, 3.0, 2.0],
            ),
            has_target: vec![true, false, true, true],
            aligned: vec![false, false, false, true],
        };
        let m = compute_metrics(&signals, &AnalysisConfig::default());
        assert!(m.success);
        assert_eq!(m.alignment_time_s, Some(0.3));
        assert!((m.overshoot_pct.forward - 30.0).abs() < 1e-9);
        assert!((m.overshoot_pct.rotation - 25.0).abs() < 1e-9);
        assert_eq!(m.oscillations, AxisValues::new(2, 0, 2));
        assert_eq!(m.max_error.rotation, 4.0);
        assert_eq!(m.final_error.lateral, Some(0.0));
        assert!((m.avg_speed.forward - 0.5).abs() < 1e-12);
        assert!((m.avg_speed.rotation - 2.0).abs() < 1e-12);
        assert_eq!(m.target_lost_count, 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn crossings_bounded_by_pair_count(e in prop::collection::vec(-10.0_f64..10.0_f64, 0..80)) {
            let n = count_zero_crossings(&e);
            prop_assert!(n <= e.len().saturating_sub(1));
        }

        #[test]
        fn crossings_ignore_magnitude(
            e in prop::collection::vec(-10.0_f64..10.0_f64, 0..80),
            k in 0.01_f64..100.0_f64,
        ) {
            let scaled: Vec<f64> = e.iter().map(|v| v * k).collect();
            prop_assert_eq!(count_zero_crossings(&e), count_zero_crossings(&scaled));
        }

        #[test]
        fn single_signed_signal_never_crosses(e in prop::collection::vec(0.001_f64..10.0_f64, 0..80)) {
            prop_assert_eq!(count_zero_crossings(&e), 0);
            let negated: Vec<f64> = e.iter().map(|v| -v).collect();
            prop_assert_eq!(count_zero_crossings(&negated), 0);
        }

        #[test]
        fn overshoot_is_non_negative(e in prop::collection::vec(-10.0_f64..10.0_f64, 0..40)) {
            prop_assert!(overshoot_pct(&e, 0.001) >= 0.0);
        }
    }
}

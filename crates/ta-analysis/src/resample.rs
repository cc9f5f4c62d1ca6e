//! Linear resampling onto a reference time base.
//!
//! Channels are logged at independent, irregular rates. Before any per-sample
//! comparison, every signal of a session is interpolated onto the timestamps
//! of one reference channel. Destinations outside the source span take the
//! nearest edge value; an empty source resamples to all zeros (or all `false`).

use ta_core::Channel;

/// Linearly interpolate `(src_t, src_v)` at each destination timestamp.
///
/// `src_t` must be non-decreasing. Where several samples share a timestamp
/// the last one wins. The output always has `dest.len()` elements.
pub fn interpolate(src_t: &[f64], src_v: &[f64], dest: &[f64]) -> Vec<f64> {
    let n = src_t.len().min(src_v.len());
    if n == 0 {
        return vec![0.0; dest.len()];
    }
    let (src_t, src_v) = (&src_t[..n], &src_v[..n]);

    dest.iter()
        .map(|&x| {
            // first index strictly after x
            let hi = src_t.partition_point(|t| *t <= x);
            if hi == 0 {
                return src_v[0];
            }
            if hi == n {
                return src_v[n - 1];
            }
            let lo = hi - 1;
            // src_t[lo] <= x < src_t[hi], so the span is strictly positive
            let frac = (x - src_t[lo]) / (src_t[hi] - src_t[lo]);
            src_v[lo] + (src_v[hi] - src_v[lo]) * frac
        })
        .collect()
}

/// Interpolate a boolean signal as `{0.0, 1.0}` and threshold the result.
pub fn interpolate_bool(src_t: &[f64], src_v: &[bool], dest: &[f64], threshold: f64) -> Vec<bool> {
    let as_float: Vec<f64> = src_v.iter().map(|b| if *b { 1.0 } else { 0.0 }).collect();
    interpolate(src_t, &as_float, dest)
        .into_iter()
        .map(|v| v > threshold)
        .collect()
}

/// Resample the part of `channel` inside `[start, end]` onto `dest`.
///
/// An absent channel, or one with no samples in the window, yields zeros.
pub fn resample_window(channel: Option<&Channel<f64>>, start: f64, end: f64, dest: &[f64]) -> Vec<f64> {
    match channel {
        Some(ch) => {
            let (t, v) = ch.window(start, end);
            interpolate(t, v, dest)
        }
        None => vec![0.0; dest.len()],
    }
}

/// Boolean counterpart of [`resample_window`]; absent data yields `false`.
pub fn resample_bool_window(
    channel: Option<&Channel<bool>>,
    start: f64,
    end: f64,
    dest: &[f64],
    threshold: f64,
) -> Vec<bool> {
    match channel {
        Some(ch) => {
            let (t, v) = ch.window(start, end);
            interpolate_bool(t, v, dest, threshold)
        }
        None => vec![false; dest.len()],
    }
}

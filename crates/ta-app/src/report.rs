//! Console report formatting.
//!
//! Every formatter returns a `String` so the CLI owns all printing.

use std::fmt::Write;

use ta_analysis::{Analysis, BindingState, ChannelBinding, Segmentation, SessionSummary, TimingStat};
use ta_config::AlignModel;
use ta_core::AxisValues;
use ta_results::SessionRecord;

use crate::analysis_service::ChannelInfo;

const RULE: &str = "======================================================================";

pub fn format_bindings(model: AlignModel, bindings: &[ChannelBinding]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Channels for model {} ({}):", model, model.description());
    for b in bindings {
        let channel = b.channel.as_deref().unwrap_or("-");
        let _ = match b.state {
            BindingState::Present { samples } => {
                writeln!(out, "  [ok] {:<15} {} ({} samples)", b.role, channel, samples)
            }
            BindingState::Missing => writeln!(out, "  [--] {:<15} {} (not found)", b.role, channel),
            BindingState::Unmapped => writeln!(out, "  [  ] {:<15} not logged by this model", b.role),
        };
    }
    out
}

fn fmt_opt(value: Option<f64>, precision: usize, unit: &str, missing: &str) -> String {
    match value {
        Some(v) => format!("{v:.precision$} {unit}"),
        None => missing.to_string(),
    }
}

fn push_axes<T>(out: &mut String, heading: &str, values: &AxisValues<T>, fmt: impl Fn(&T, &str) -> String) {
    let _ = writeln!(out, "\n--- {heading} ---");
    let _ = writeln!(out, "Forward: {}", fmt(&values.forward, "m"));
    let _ = writeln!(out, "Lateral: {}", fmt(&values.lateral, "m"));
    let _ = writeln!(out, "Rotation: {}", fmt(&values.rotation, "deg"));
}

pub fn format_session(record: &SessionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Session {} Metrics", record.session_num);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Window: {:.3} s - {:.3} s ({})",
        record.start_time,
        record.end_time,
        record.end_reason.label()
    );
    let _ = writeln!(out, "Duration: {:.3} s", record.duration);
    let _ = writeln!(out, "Success: {}", if record.success { "yes" } else { "no" });
    if let Some(id) = record.target_id {
        let _ = writeln!(out, "Target tag: {id}");
    }

    let _ = writeln!(out, "\n--- Timing ---");
    let _ = writeln!(
        out,
        "Time to Aligned: {}",
        fmt_opt(record.alignment_time, 3, "s", "N/A (never reached)")
    );
    let _ = writeln!(
        out,
        "Settling Time: {}",
        fmt_opt(record.settling_time, 3, "s", "N/A (never settled)")
    );

    push_axes(&mut out, "Final Errors", &record.final_errors, |v, unit| {
        fmt_opt(*v, 4, unit, "N/A")
    });
    push_axes(&mut out, "Peak Errors", &record.peak_errors, |v, unit| {
        format!("{v:.4} {unit}")
    });
    push_axes(&mut out, "Overshoot", &record.overshoot, |v, _| format!("{v:.1}%"));
    push_axes(
        &mut out,
        "Oscillations (zero crossings)",
        &record.oscillations,
        |v, _| v.to_string(),
    );

    let _ = writeln!(out, "\n--- Average Control Effort ---");
    let _ = writeln!(out, "Forward Speed: {:.4} m/s", record.avg_speeds.forward);
    let _ = writeln!(out, "Lateral Speed: {:.4} m/s", record.avg_speeds.lateral);
    let _ = writeln!(out, "Rotation Speed: {:.4} rad/s", record.avg_speeds.rotation);

    let _ = writeln!(out, "\n--- Target Tracking ---");
    let _ = writeln!(out, "Target Lost Count: {}", record.target_lost_count);
    let _ = writeln!(out, "{RULE}");
    out
}

fn fmt_timing(stat: &TimingStat) -> String {
    match stat {
        TimingStat::Available {
            count,
            mean_s,
            std_dev_s,
        } => format!("{mean_s:.3} s (+/-{std_dev_s:.3} s, n={count})"),
        TimingStat::Unavailable => "N/A".to_string(),
    }
}

pub fn format_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Summary Statistics ({} sessions)", summary.session_count);
    let _ = writeln!(out, "{RULE}");
    match summary.success_rate_pct {
        Some(rate) => {
            let _ = writeln!(
                out,
                "Success Rate: {rate:.1}% ({}/{})",
                summary.success_count, summary.session_count
            );
        }
        None => {
            let _ = writeln!(out, "Success Rate: N/A");
        }
    }
    let _ = writeln!(out, "Avg Alignment Time: {}", fmt_timing(&summary.alignment_time));
    let _ = writeln!(out, "Avg Settling Time: {}", fmt_timing(&summary.settling_time));
    out
}

/// The session section of an `analyze` run: per-session blocks, plus a summary
/// when more than one session was found.
pub fn format_sessions(analysis: &Analysis, records: &[SessionRecord]) -> String {
    match &analysis.segmentation {
        Segmentation::NoStatusChannel => {
            return format!(
                "No status channel found for model {}. Cannot detect alignment sessions.\n",
                analysis.model
            );
        }
        Segmentation::Scanned { sessions, .. } if sessions.is_empty() => {
            return "No alignment sessions found in log file.\n\
                    Make sure you selected the correct model and the log contains alignment data.\n"
                .to_string();
        }
        Segmentation::Scanned { .. } => {}
    }

    let mut out = format!("Found {} alignment session(s)\n\n", records.len());
    for record in records {
        out.push_str(&format_session(record));
        out.push('\n');
    }
    if records.len() > 1 {
        out.push_str(&format_summary(&analysis.summary));
    }
    out
}

pub fn format_channels(channels: &[ChannelInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} channel(s):", channels.len());
    for ch in channels {
        let range = match ch.time_range {
            Some((start, end)) => format!("{start:.3} s - {end:.3} s"),
            None => "empty".to_string(),
        };
        let _ = writeln!(out, "  {:<40} {:>8} samples  {}", ch.name, ch.samples, range);
    }
    out
}

pub fn format_field_map(model: AlignModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Model {} ({}):", model, model.description());
    for (role, channel) in model.field_map().bindings() {
        let _ = writeln!(out, "  {:<15} {}", role.label(), channel.unwrap_or("-"));
    }
    out
}

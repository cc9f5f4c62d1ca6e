//! Session segmentation over the status channel.
//!
//! The status channel is scanned once in timestamp order with a two-state
//! machine. `STARTED`/`ALIGNING` opens a session while idle,
//! `COMPLETED`/`INTERRUPTED` closes it, every other label is ignored. A log
//! that ends mid-attempt still closes the open session at its final sample.

use serde::{Deserialize, Serialize};
use ta_core::AlignStatus;

/// How an alignment session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    Completed,
    Interrupted,
    /// The log ended while the session was still open.
    Truncated,
}

impl SessionEnd {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Truncated => "truncated",
        }
    }
}

/// Status sample indices bounding one session, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpan {
    pub start_idx: usize,
    pub end_idx: usize,
    pub end: SessionEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    InSession { start_idx: usize },
}

/// Split a status sequence into session spans.
pub fn find_spans(statuses: &[AlignStatus]) -> Vec<SessionSpan> {
    let mut spans = Vec::new();
    let mut state = ScanState::Idle;

    for (i, status) in statuses.iter().enumerate() {
        state = match state {
            ScanState::Idle if status.opens_session() => ScanState::InSession { start_idx: i },
            ScanState::InSession { start_idx } if status.closes_session() => {
                let end = if *status == AlignStatus::Completed {
                    SessionEnd::Completed
                } else {
                    SessionEnd::Interrupted
                };
                spans.push(SessionSpan {
                    start_idx,
                    end_idx: i,
                    end,
                });
                ScanState::Idle
            }
            unchanged => unchanged,
        };
    }

    if let ScanState::InSession { start_idx } = state {
        spans.push(SessionSpan {
            start_idx,
            end_idx: statuses.len() - 1,
            end: SessionEnd::Truncated,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(labels: &[&str]) -> Vec<AlignStatus> {
        labels.iter().map(|l| AlignStatus::from_label(l)).collect()
    }

    #[test]
    fn two_sessions_with_distinct_endings() {
        let s = statuses(&[
            "IDLE",
            "STARTED",
            "ALIGNING",
            "COMPLETED",
            "IDLE",
            "STARTED",
            "INTERRUPTED",
        ]);
        let spans = find_spans(&s);
        assert_eq!(
            spans,
            vec![
                SessionSpan {
                    start_idx: 1,
                    end_idx: 3,
                    end: SessionEnd::Completed
                },
                SessionSpan {
                    start_idx: 5,
                    end_idx: 6,
                    end: SessionEnd::Interrupted
                },
            ]
        );
    }

    #[test]
    fn aligning_alone_opens_a_session() {
        let spans = find_spans(&statuses(&["ALIGNING", "ALIGNING", "COMPLETED"]));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start_idx, 0);
    }

    #[test]
    fn repeated_start_does_not_restart() {
        let spans = find_spans(&statuses(&["STARTED", "ALIGNING", "STARTED", "COMPLETED"]));
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start_idx, spans[0].end_idx), (0, 3));
    }

    #[test]
    fn terminal_status_while_idle_is_ignored() {
        let spans = find_spans(&statuses(&["COMPLETED", "INTERRUPTED", "IDLE"]));
        assert!(spans.is_empty());
    }

    #[test]
    fn unknown_labels_keep_session_open() {
        let spans = find_spans(&statuses(&["STARTED", "NO_TARGET", "IDLE", "COMPLETED"]));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end_idx, 3);
    }

    #[test]
    fn truncated_log_closes_at_last_sample() {
        let spans = find_spans(&statuses(&["IDLE", "STARTED", "ALIGNING", "ALIGNING"]));
        assert_eq!(
            spans,
            vec![SessionSpan {
                start_idx: 1,
                end_idx: 3,
                end: SessionEnd::Truncated
            }]
        );
    }

    #[test]
    fn empty_status_has_no_spans() {
        assert!(find_spans(&[]).is_empty());
    }
}

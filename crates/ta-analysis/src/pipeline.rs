//! End-to-end analysis of one log.

use serde::Serialize;
use ta_config::{AlignModel, AnalysisConfig};
use ta_core::ChannelSource;

use crate::bound::{BoundChannels, ChannelBinding, describe_bindings};
use crate::segment::find_spans;
use crate::session::{AlignmentSession, SessionRejected, extract_session};
use crate::summary::{SessionSummary, summarize};

/// Outcome of segmentation.
///
/// A log without a status channel is reported separately from a log whose
/// status channel simply contains no complete attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segmentation {
    NoStatusChannel,
    Scanned {
        status_samples: usize,
        spans_found: usize,
        sessions: Vec<AlignmentSession>,
    },
}

impl Segmentation {
    pub fn sessions(&self) -> &[AlignmentSession] {
        match self {
            Self::NoStatusChannel => &[],
            Self::Scanned { sessions, .. } => sessions,
        }
    }

    pub fn has_status_channel(&self) -> bool {
        !matches!(self, Self::NoStatusChannel)
    }
}

/// Segment the status channel and extract every accepted session.
pub fn find_sessions(channels: &BoundChannels, config: &AnalysisConfig) -> Segmentation {
    let Some(status) = channels.status.as_ref() else {
        tracing::warn!("status channel missing, no sessions can be segmented");
        return Segmentation::NoStatusChannel;
    };

    let spans = find_spans(status.values());
    let mut sessions = Vec::with_capacity(spans.len());
    for span in &spans {
        match extract_session(*span, status.timestamps(), channels, config) {
            Ok(session) => sessions.push(session),
            Err(SessionRejected::TooShort { duration }) => {
                tracing::debug!(
                    start_idx = span.start_idx,
                    end_idx = span.end_idx,
                    duration,
                    "dropping session shorter than minimum duration"
                );
            }
            Err(SessionRejected::NoReferenceSamples) => {
                tracing::debug!(
                    start_idx = span.start_idx,
                    end_idx = span.end_idx,
                    "dropping session without reference error samples"
                );
            }
        }
    }

    tracing::info!(
        status_samples = status.len(),
        spans = spans.len(),
        sessions = sessions.len(),
        "segmentation complete"
    );

    Segmentation::Scanned {
        status_samples: status.len(),
        spans_found: spans.len(),
        sessions,
    }
}

/// Everything produced by analyzing one log under one model.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub model: AlignModel,
    pub bindings: Vec<ChannelBinding>,
    pub segmentation: Segmentation,
    pub summary: SessionSummary,
}

impl Analysis {
    pub fn sessions(&self) -> &[AlignmentSession] {
        self.segmentation.sessions()
    }
}

pub fn analyze<S: ChannelSource + ?Sized>(
    source: &S,
    model: AlignModel,
    config: &AnalysisConfig,
) -> Analysis {
    let map = model.field_map();
    let bindings = describe_bindings(source, &map);
    let channels = BoundChannels::resolve(source, &map);
    let segmentation = find_sessions(&channels, config);
    let summary = summarize(segmentation.sessions().iter().map(|s| &s.metrics));

    Analysis {
        model,
        bindings,
        segmentation,
        summary,
    }
}

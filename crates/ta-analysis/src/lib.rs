//! Alignment session segmentation and scoring.
//!
//! This crate turns a decoded telemetry log into scored alignment attempts.
//!
//! # Architecture
//!
//! - [`bound`]: resolves a model's field map against a log into typed channels
//! - [`segment`]: status-channel state machine producing session index spans
//! - [`resample`]: linear interpolation onto a common reference time base
//! - [`session`]: per-span extraction of the resampled signal bundle
//! - [`metrics`]: pure per-session metric functions
//! - [`summary`]: cross-session aggregation
//! - [`pipeline`]: the end-to-end analysis over one log
//!
//! Every stage is a pure function of its inputs; the loaded log is never mutated.

pub mod bound;
pub mod metrics;
pub mod pipeline;
pub mod resample;
pub mod segment;
pub mod session;
pub mod summary;

pub use bound::{BindingState, BoundChannels, ChannelBinding, describe_bindings};
pub use metrics::{AlignmentMetrics, compute_metrics};
pub use pipeline::{Analysis, Segmentation, analyze, find_sessions};
pub use segment::{SessionEnd, SessionSpan, find_spans};
pub use session::{AlignmentSession, SessionRejected, SessionSignals, extract_session};
pub use summary::{SessionSummary, TimingStat, summarize};
